use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use std::io::Write;

use crate::color;
use crate::core::Status;
use crate::dashboard::DashboardReport;
use crate::metrics::MetricChange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &DashboardReport) -> anyhow::Result<()>;
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

fn format_change(change: &MetricChange) -> String {
    format!("{:+.1}%", change.percent_change)
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_metrics(report)?;
        self.write_distribution(report)?;
        self.write_progress(report)?;
        self.write_heatmap(report)?;
        self.write_trend(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Audit Observations Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            self.writer,
            "Observations in scope: {}",
            report.record_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_metrics(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Headline Metrics")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value | Change |")?;
        writeln!(self.writer, "|--------|-------|--------|")?;

        let metrics = &report.metrics;
        let values = [
            metrics.total.to_string(),
            metrics.open.to_string(),
            metrics.complied.to_string(),
            format!("{:.1}%", metrics.compliance_rate),
        ];

        for (change, value) in report.delta.changes.iter().zip(values) {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                change.metric,
                value,
                format_change(change)
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Observations by Chapter")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Chapter | Total | Open | Complied |")?;
        writeln!(self.writer, "|---------|-------|------|----------|")?;

        for stats in &report.distribution {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                stats.chapter, stats.total, stats.open, stats.complied
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_progress(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Compliance Progress")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Chapter | Compliance | Band |")?;
        writeln!(self.writer, "|---------|------------|------|")?;

        for entry in &report.progress {
            writeln!(
                self.writer,
                "| {} | {:.1}% | {} |",
                entry.stats.chapter, entry.stats.compliance_rate, entry.color
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_heatmap(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Severity Heatmap")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Chapter | Low | Medium | High |")?;
        writeln!(self.writer, "|---------|-----|--------|------|")?;

        for row in &report.severity_matrix {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                row.chapter, row.low, row.medium, row.high
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trend(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Monthly Trend")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Month | Status | Count |")?;
        writeln!(self.writer, "|-------|--------|-------|")?;

        for row in &report.monthly_status {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                row.month, row.status, row.count
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        self.write_metrics(report)?;
        self.write_distribution(report)?;
        self.write_progress(report)?;
        self.write_heatmap(report)?;
        self.write_trend(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_metrics(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Headline Metrics".bold())?;

        let metrics = &report.metrics;
        let values = [
            metrics.total.to_string(),
            metrics.open.to_string(),
            metrics.complied.to_string(),
            format!("{:.1}%", metrics.compliance_rate),
        ];

        for (change, value) in report.delta.changes.iter().zip(values) {
            let delta = format_change(change);
            let delta = if change.favorable {
                delta.green()
            } else {
                delta.red()
            };
            writeln!(self.writer, "  {}: {} ({})", change.metric, value, delta)?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Observations by Chapter".bold())?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Chapter", "Total", "Open", "Complied"]);
        for stats in &report.distribution {
            table.add_row(vec![
                stats.chapter.clone(),
                stats.total.to_string(),
                stats.open.to_string(),
                stats.complied.to_string(),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_progress(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Compliance Progress".bold())?;

        for entry in &report.progress {
            let rate = format!("{:>5.1}%", entry.stats.compliance_rate);
            let color = entry.color;
            let open = color::status_color(Status::Open);
            let open_part = format!("{} open", entry.stats.open);
            writeln!(
                self.writer,
                "  {} {} ({} / {} total)",
                rate.truecolor(color.r, color.g, color.b),
                entry.stats.chapter,
                open_part.truecolor(open.r, open.g, open.b),
                entry.stats.total
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_heatmap(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Severity Heatmap".bold())?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Chapter", "Low", "Medium", "High"]);
        for row in &report.severity_matrix {
            table.add_row(vec![
                row.chapter.clone(),
                row.low.to_string(),
                row.medium.to_string(),
                row.high.to_string(),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trend(&mut self, report: &DashboardReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Monthly Trend".bold())?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Month", "Status", "Count"]);
        for row in &report.monthly_status {
            table.add_row(vec![
                row.month.label(),
                row.status.to_string(),
                row.count.to_string(),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditmapConfig;
    use crate::core::{MetricsSnapshot, Observation, Severity, Status};
    use crate::dashboard::build_report;
    use crate::filter::FilterCriteria;
    use chrono::NaiveDate;

    fn sample_report() -> DashboardReport {
        let records = vec![
            Observation::new(
                1,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                "A",
                Severity::Low,
                Status::Open,
            ),
            Observation::new(
                2,
                NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
                "B",
                Severity::High,
                Status::Complied,
            ),
        ];

        build_report(
            &records,
            &FilterCriteria::new(),
            &MetricsSnapshot::default(),
            &AuditmapConfig::default(),
        )
    }

    #[test]
    fn json_writer_emits_parseable_output() {
        let report = sample_report();
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["metrics"]["total"], 2);
        // Month keys serialize as display labels.
        assert_eq!(value["monthly_status"][0]["month"], "Jan 2024");
        // Colors serialize as hex strings.
        assert_eq!(value["progress"][0]["color"], "#ff6b6b");
    }

    #[test]
    fn markdown_writer_emits_all_sections() {
        let report = sample_report();
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_report(&report)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# Audit Observations Report"));
        assert!(text.contains("## Headline Metrics"));
        assert!(text.contains("## Compliance Progress"));
        assert!(text.contains("## Severity Heatmap"));
        assert!(text.contains("| Jan 2024 | Open | 1 |"));
    }

    #[test]
    fn terminal_writer_renders_every_chapter() {
        let report = sample_report();
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_report(&report)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Observations by Chapter"));
        assert!(text.contains("A"));
        assert!(text.contains("B"));
    }
}
