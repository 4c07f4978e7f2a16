use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

use super::{Report, ReportLine};

/// Display format for instants, e.g. `3:04pm 1/2`
pub const TIME_FORMAT: &str = "%-I:%M%P %-m/%-d";

fn format_time(t: &DateTime<FixedOffset>, offset: FixedOffset) -> String {
    t.with_timezone(&offset).format(TIME_FORMAT).to_string()
}

/// Render the report as console text, times shown in `offset`
pub fn render_text(
    report: &Report,
    issued: Option<&DateTime<FixedOffset>>,
    offset: FixedOffset,
) -> String {
    let mut out = String::new();

    if let Some(issued) = issued {
        let _ = writeln!(out, "Issued: {}", format_time(issued, offset));
    }

    for line in &report.lines {
        match line {
            ReportLine::Interval(interval) => {
                let shown = interval.with_offset(offset);
                let _ = writeln!(
                    out,
                    "Valid {} — {}\n",
                    shown.valid_from.format(TIME_FORMAT),
                    shown.valid_until.format(TIME_FORMAT)
                );
            }
            ReportLine::UnknownInterval => {
                let _ = writeln!(out, "Validity unknown\n");
            }
            ReportLine::Match {
                description, label, ..
            } => {
                let _ = writeln!(out, "{}: {}", description, label);
            }
            ReportLine::NoThreat => {
                let _ = writeln!(out, "No significant threat");
            }
        }
    }

    out
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
