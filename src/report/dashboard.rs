use std::fmt;

use crate::report::format::{fmt_money, fmt_percent};
use crate::report::TradeReport;

const RULE_WIDTH: usize = 70;
const CARD_WIDTH: usize = 16;
const MAX_CHART_WIDTH: usize = 60;
const MAX_CELL_WIDTH: usize = 24;
const AXIS_WIDTH: usize = 12;
const SECTION_RULE: &str = "  ───────────────────────────────────";

/// Terminal rendering of a `TradeReport`: metric cards, equity curve and the
/// trade table.
pub struct Dashboard<'a> {
    report: &'a TradeReport,
    pub max_rows: usize,
    pub chart_height: usize,
}

impl<'a> Dashboard<'a> {
    pub fn new(report: &'a TradeReport) -> Self {
        Self {
            report,
            max_rows: 50,
            chart_height: 12,
        }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_chart_height(mut self, chart_height: usize) -> Self {
        self.chart_height = chart_height.max(2);
        self
    }

    pub fn print(&self) {
        print!("{}", self);
    }

    /// The four headline numbers, label row above value row.
    pub fn metric_cards(&self) -> [(&'static str, String); 4] {
        let s = &self.report.summary;
        [
            ("Total P&L", fmt_money(s.total_pnl)),
            ("Win Rate", fmt_percent(s.win_rate)),
            ("Avg Win", fmt_money(s.avg_win)),
            ("Avg Loss", fmt_money(s.avg_loss)),
        ]
    }

    fn fmt_metrics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = self.metric_cards();
        let labels: String = cards
            .iter()
            .map(|(label, _)| format!(" {:<width$}", label, width = CARD_WIDTH))
            .collect();
        let values: String = cards
            .iter()
            .map(|(_, value)| format!(" {:<width$}", value, width = CARD_WIDTH))
            .collect();
        writeln!(f, " {}", labels.trim_end())?;
        writeln!(f, " {}", values.trim_end())?;

        let s = &self.report.summary;
        writeln!(
            f,
            "  Trades: {} | Wins: {} | Losses: {} | Flat: {}",
            s.trades, s.wins, s.losses, s.flat
        )
    }

    fn fmt_equity(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "  EQUITY CURVE")?;
        writeln!(f, "{}", SECTION_RULE)?;

        let curve = self.report.equity_curve();
        let (first, last) = match (curve.first(), curve.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return writeln!(f, "  No data points."),
        };

        let values: Vec<f64> = curve.iter().map(|(_, v)| *v).collect();
        for line in plot(&values, MAX_CHART_WIDTH, self.chart_height) {
            writeln!(f, "  {}", line)?;
        }
        writeln!(
            f,
            "  {:>axis$}  {} → {}",
            "",
            first.0.format("%Y-%m-%d"),
            last.0.format("%Y-%m-%d"),
            axis = AXIS_WIDTH
        )
    }

    fn fmt_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = &self.report.rows;
        let shown = rows.len().min(self.max_rows);

        writeln!(f)?;
        writeln!(f, "  TRADES ({} of {})", shown, rows.len())?;
        writeln!(f, "{}", SECTION_RULE)?;

        let mut header: Vec<String> = self.report.columns.clone();
        header.push("RealizedPNL".to_string());
        header.push("CumulativePNL".to_string());

        let body: Vec<Vec<String>> = rows
            .iter()
            .take(shown)
            .map(|r| {
                let mut cells: Vec<String> = r.fields.iter().map(|c| c.to_string()).collect();
                cells.push(format!("{:.2}", r.realized_pnl));
                cells.push(format!("{:.2}", r.cumulative_pnl));
                cells
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                body.iter()
                    .map(|cells| cells[i].chars().count())
                    .chain(std::iter::once(header[i].chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_CELL_WIDTH)
            })
            .collect();

        writeln!(f, "  {}", join_padded(&header, &widths))?;
        for cells in &body {
            writeln!(f, "  {}", join_padded(cells, &widths))?;
        }
        if rows.len() > shown {
            writeln!(f, "  ... {} more rows", rows.len() - shown)?;
        }
        Ok(())
    }

    fn fmt_skipped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.report.skipped.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "  SKIPPED ROWS ({})", self.report.skipped.len())?;
        writeln!(f, "{}", SECTION_RULE)?;
        for issue in &self.report.skipped {
            writeln!(f, "  row {:>5}: {}", issue.row, issue.message)?;
        }
        Ok(())
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "  TRADE JOURNAL")?;
        writeln!(f, "{}", rule)?;
        self.fmt_metrics(f)?;
        self.fmt_equity(f)?;
        self.fmt_table(f)?;
        self.fmt_skipped(f)?;
        writeln!(f, "{}", rule)
    }
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", clip(cell, w), w = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

/// Plot `values` as a text line chart `height` rows tall. The vertical range
/// always includes zero, which is drawn as a dotted baseline.
fn plot(values: &[f64], max_width: usize, height: usize) -> Vec<String> {
    let height = height.max(2);
    let width = values.len().clamp(1, max_width);

    let lo = values.iter().cloned().fold(0.0_f64, f64::min);
    let mut hi = values.iter().cloned().fold(0.0_f64, f64::max);
    if hi <= lo {
        hi = lo + 1.0;
    }

    let level = |v: f64| -> usize {
        let scaled = (v - lo) / (hi - lo) * (height - 1) as f64;
        (scaled.round() as usize).min(height - 1)
    };

    let mut grid = vec![vec![' '; width]; height];
    let zero_row = height - 1 - level(0.0);
    for cell in grid[zero_row].iter_mut() {
        *cell = '·';
    }

    for col in 0..width {
        // Spread the columns evenly over the series, always keeping the last point.
        let idx = if width == 1 {
            values.len() - 1
        } else {
            col * (values.len() - 1) / (width - 1)
        };
        grid[height - 1 - level(values[idx])][col] = '*';
    }

    grid.into_iter()
        .enumerate()
        .map(|(row, cells)| {
            let label = if row == 0 {
                fmt_money(Some(hi))
            } else if row == height - 1 {
                fmt_money(Some(lo))
            } else if row == zero_row {
                fmt_money(Some(0.0))
            } else {
                String::new()
            };
            let line: String = cells.into_iter().collect();
            format!("{:>axis$} │{}", label, line.trim_end(), axis = AXIS_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowPolicy;
    use crate::pipeline::{run, PipelineOptions};
    use crate::test_helpers::SCENARIO_A;

    fn scenario_a() -> TradeReport {
        run(SCENARIO_A.as_bytes(), &PipelineOptions::default()).unwrap()
    }

    #[test]
    fn cards_show_formatted_metrics() {
        let report = scenario_a();
        let cards = Dashboard::new(&report).metric_cards();
        assert_eq!(cards[0], ("Total P&L", "$10.00".to_string()));
        assert_eq!(cards[1], ("Win Rate", "50.00%".to_string()));
        assert_eq!(cards[2], ("Avg Win", "$20.00".to_string()));
        assert_eq!(cards[3], ("Avg Loss", "$-10.00".to_string()));
    }

    #[test]
    fn empty_report_shows_not_applicable_everywhere() {
        let report = run(b"Date,Proceeds,CostBasis\n", &PipelineOptions::default()).unwrap();
        let dash = Dashboard::new(&report);
        for (_, value) in dash.metric_cards() {
            assert_eq!(value, "N/A");
        }
        let text = dash.to_string();
        assert!(text.contains("No data points."));
        assert!(text.contains("TRADES (0 of 0)"));
    }

    #[test]
    fn table_lists_rows_in_date_order_with_derived_columns() {
        let report = scenario_a();
        let text = Dashboard::new(&report).to_string();

        assert!(text.contains("RealizedPNL"));
        assert!(text.contains("CumulativePNL"));
        let first = text.find("2024-01-01T00:00:00Z").unwrap();
        let second = text.find("2024-01-02T00:00:00Z").unwrap();
        assert!(first < second);
    }

    #[test]
    fn table_is_truncated_to_max_rows() {
        let report = scenario_a();
        let text = Dashboard::new(&report).with_max_rows(1).to_string();
        assert!(text.contains("TRADES (1 of 2)"));
        assert!(text.contains("... 1 more rows"));
    }

    #[test]
    fn skipped_rows_are_listed_after_the_table() {
        let options = PipelineOptions {
            on_bad_row: RowPolicy::Skip,
            ..PipelineOptions::default()
        };
        let csv = "Date,Proceeds,CostBasis\n2024-01-01,10,5\nnot-a-date,1,1\n";
        let report = run(csv.as_bytes(), &options).unwrap();
        let text = Dashboard::new(&report).to_string();

        let table = text.find("TRADES (1 of 1)").unwrap();
        let skipped = text.find("SKIPPED ROWS (1)").unwrap();
        assert!(table < skipped);
        assert!(text.contains("row     1:"));
        assert!(text.trim_end().ends_with(&"=".repeat(RULE_WIDTH)));
    }

    #[test]
    fn plot_marks_every_column_and_baseline() {
        let lines = plot(&[-10.0, 10.0], 60, 5);
        assert_eq!(lines.len(), 5);
        // top row holds the maximum, bottom row the minimum
        assert!(lines[0].ends_with(" *"));
        assert!(lines[4].ends_with("│*"));
        assert!(lines.iter().any(|l| l.contains('·')));
    }

    #[test]
    fn clip_marks_truncation() {
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("abc", 4), "abc");
    }
}
