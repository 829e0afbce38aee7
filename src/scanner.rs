//! Scans documents into task records

use crate::extractor;
use crate::grammar;
use crate::task::{TaskId, TaskRecord};
use crate::traits::DocumentStore;
use crate::error::StoreError;

/// Reads every document of the store and parses its checklist lines.
///
/// An unreadable document is logged and skipped: it contributes zero records
/// and the scan carries on. Only enumeration failures abort the whole scan.
pub async fn scan_documents<S>(store: &S) -> Result<Vec<TaskRecord>, StoreError>
where
    S: DocumentStore,
{
    let paths = store.list_documents().await?;
    let mut records = Vec::new();
    for path in paths {
        let text = match store.read_document(&path).await {
            Ok(text) => text,
            Err(err) => {
                log::warn!("Unable to read {}: {}. Skipping this document", path, err);
                continue;
            }
        };
        records.extend(scan_text(&path, &text));
    }
    log::debug!("Scan finished, {} dated tasks found", records.len());
    Ok(records)
}

/// Parses the checklist lines of a single document.
///
/// Lines that do not match the grammar, and tasks that resolve to no date,
/// are skipped without error.
pub fn scan_text(path: &str, text: &str) -> Vec<TaskRecord> {
    let mut records = Vec::new();
    for (line_index, line) in text.split('\n').enumerate() {
        let (status, remainder) = match grammar::parse_task_line(line) {
            Some(parsed) => parsed,
            None => continue,
        };
        let extraction = extractor::extract(remainder, status);
        let date = match extraction.date {
            Some(date) => date,
            None => continue,
        };
        records.push(TaskRecord::new(
            TaskId::new(path.to_string(), line_index),
            status,
            date,
            extraction.description,
            line.to_string(),
        ));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    #[test]
    fn scan_text_skips_non_tasks_and_undated_tasks() {
        let text = "\
# Groceries

- [ ] Buy milk 📅 2024-06-01
- [ ] No date on this one
Some prose in between.
- [x] Finish report ✅ 2024-06-02 📅 2024-06-05
- [?] Not a task at all
";
        let records = scan_text("notes/todo.md", text);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id().to_string(), "notes/todo.md:2");
        assert_eq!(records[0].status(), TaskStatus::Incomplete);
        assert_eq!(records[0].date().as_str(), "2024-06-01");
        assert_eq!(records[0].description(), "Buy milk");
        assert_eq!(records[0].raw_line(), "- [ ] Buy milk 📅 2024-06-01");

        // Completion beats due for a completed task
        assert_eq!(records[1].line_index(), 5);
        assert_eq!(records[1].status(), TaskStatus::Completed);
        assert_eq!(records[1].date().as_str(), "2024-06-02");
        assert_eq!(records[1].description(), "Finish report");
    }

    #[test]
    fn line_indices_are_zero_based_and_count_every_line() {
        let text = "- [ ] first 📅 2024-01-01\n\n- [ ] third 📅 2024-01-02";
        let records = scan_text("a.md", text);
        assert_eq!(records[0].line_index(), 0);
        assert_eq!(records[1].line_index(), 2);
    }
}
