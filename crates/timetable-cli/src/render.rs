use std::fmt::Write;

use timetable_core::{Bucket, WEEKDAY_LABELS};
use timetable_lessons::{GridMatrix, LessonRecord};

use crate::app::{Alert, Severity};

/// Render the 3×7 matrix as a fixed-width text table.
pub fn grid_table(matrix: &GridMatrix) -> String {
    let label_width = Bucket::ALL.iter().map(|b| b.label().len()).max().unwrap_or(0);
    let widths: Vec<usize> = (0..7)
        .map(|col| {
            matrix
                .iter()
                .filter_map(|row| row[col].as_deref())
                .map(|name| name.chars().count())
                .chain(std::iter::once(WEEKDAY_LABELS[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:label_width$}", "");
    for (label, w) in WEEKDAY_LABELS.iter().zip(widths.iter().copied()) {
        let _ = write!(out, " | {label:<w$}");
    }
    out.push('\n');

    let rule = label_width + widths.iter().map(|w| w + 3).sum::<usize>();
    out.push_str(&"-".repeat(rule));
    out.push('\n');

    for bucket in Bucket::ALL {
        let _ = write!(out, "{:<label_width$}", bucket.label());
        for (cell, w) in matrix[bucket.row()].iter().zip(widths.iter().copied()) {
            let _ = write!(out, " | {:<w$}", cell.as_deref().unwrap_or(""));
        }
        out.push('\n');
    }
    out
}

/// One line per stored lesson.
pub fn lesson_lines(records: &[LessonRecord]) -> String {
    let mut out = String::new();
    for rec in records {
        let _ = writeln!(
            out,
            "{}  {}  {:<9}  {}",
            rec.occurs_on.format("%Y-%m-%d %H:%M"),
            rec.time_of_day.format("%H:%M"),
            rec.bucket().label(),
            rec.name
        );
    }
    out
}

pub fn alert_line(alert: &Alert) -> String {
    let level = match alert.severity {
        Severity::Information => "info",
        Severity::Warning => "warning",
        Severity::Critical => "error",
    };
    format!("[{level}] {}: {}", alert.title, alert.message)
}
