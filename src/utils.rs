//! Some utility functions

use crate::event::CalendarEvent;

/// The display name of a document: its file name without directories or
/// extension
pub fn document_display_name(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        // Dot-files keep their full name
        Some(0) | None => name,
        Some(index) => &name[..index],
    }
}

/// A debug utility that pretty-prints an event list
pub fn print_events(events: &[CalendarEvent]) {
    for event in events {
        match event {
            CalendarEvent::Header(header) => {
                println!(
                    "{}  == {} ({}) ==",
                    header.date(),
                    header.document_name(),
                    header.task_count()
                );
            }
            CalendarEvent::Task(task) => {
                let record = task.record();
                println!(
                    "{}    [{}] {}\t{}",
                    record.date(),
                    record.status().checkbox_char(),
                    record.description(),
                    record.id()
                );
            }
        }
    }
}
