//! Terminal rendering for cellcal-core types.
//!
//! Extension trait adding colored one-line summaries, built on the core's
//! presentation formatter.

use chrono::Utc;
use owo_colors::OwoColorize;

use cellcal_core::format::RecordView;
use cellcal_core::reminders::ListedRecord;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ListedRecord {
    fn render(&self) -> String {
        let view = RecordView::new(&self.record, Utc::now());

        let due = if view.overdue {
            format!("{} (overdue)", view.due_display).red().to_string()
        } else {
            view.due_display.clone()
        };

        let mut line = format!("{} {} due {}", view.cell_label.bold(), view.message, due);

        if !view.repeat_display.is_empty() {
            line.push_str(&format!(" {}", view.repeat_display.dimmed()));
        }
        if !view.notify_display.is_empty() {
            line.push_str(&format!(" {}", view.notify_display.dimmed()));
        }

        line
    }
}
