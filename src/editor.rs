//! Read-modify-write edits against a single checklist line
//!
//! Both edit operations funnel through [`rewrite_line`]: address the
//! recorded line, verify it is still the line the task was scanned from,
//! rewrite it, and leave every other byte of the document untouched.

use crate::error::EditError;
use crate::extractor::MarkerKind;
use crate::grammar;
use crate::task::{EventDate, TaskId, TaskStatus};
use crate::traits::DocumentTransform;

/// Lifecycle of one optimistic edit
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditPhase {
    /// The optimistic mutation is applied; the write is still in flight
    Pending,
    /// The write landed; the optimistic state is now authoritative
    Committed,
    /// The write failed; the optimistic state has been restored
    RolledBack,
}

/// Outcome of a reschedule request
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RescheduleOutcome {
    /// The drop landed on the task's current date: success, zero writes
    Unchanged,
    /// The source line was rewritten and the event list rebuilt
    Rescheduled,
}

/// Bookkeeping for one optimistic status toggle
#[derive(Clone, Debug)]
pub struct StatusEdit {
    task_id: TaskId,
    prior_status: TaskStatus,
    next_status: TaskStatus,
    phase: EditPhase,
}

impl StatusEdit {
    pub(crate) fn new(task_id: TaskId, prior_status: TaskStatus, next_status: TaskStatus) -> Self {
        Self {
            task_id,
            prior_status,
            next_status,
            phase: EditPhase::Pending,
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }
    pub fn prior_status(&self) -> TaskStatus {
        self.prior_status
    }
    pub fn next_status(&self) -> TaskStatus {
        self.next_status
    }
    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: EditPhase) {
        self.phase = phase;
    }
}

/// Replaces the date of the first marker present on `line`, probing due,
/// then scheduled, then completion. Only the date substring changes; the
/// glyph and everything around it stay verbatim. Returns `None` when the
/// line carries no marker.
pub(crate) fn replace_marker_date(line: &str, new_date: &EventDate) -> Option<String> {
    for kind in MarkerKind::RESCHEDULE_ORDER.iter().copied() {
        if let Some(caps) = kind.regex().captures(line) {
            let range = caps.get(1)?.range();
            let mut updated = String::with_capacity(line.len());
            updated.push_str(&line[..range.start]);
            updated.push_str(new_date.as_str());
            updated.push_str(&line[range.end..]);
            return Some(updated);
        }
    }
    None
}

/// The document transform that moves a task line to `new_date`
pub(crate) fn reschedule_transform(
    task_id: &TaskId,
    expected_line: &str,
    new_date: &EventDate,
) -> DocumentTransform {
    let path = task_id.document_path().to_string();
    let line_index = task_id.line_index();
    let expected = expected_line.to_string();
    let date = new_date.clone();
    Box::new(move |text| {
        rewrite_line(&path, text, line_index, &expected, |line| {
            replace_marker_date(line, &date).ok_or_else(|| EditError::NoDateMarker {
                path: path.clone(),
                line: line_index,
            })
        })
    })
}

/// The document transform that sets a task line's checkbox to `next_status`
pub(crate) fn toggle_transform(
    task_id: &TaskId,
    expected_line: &str,
    next_status: TaskStatus,
) -> DocumentTransform {
    let path = task_id.document_path().to_string();
    let line_index = task_id.line_index();
    let expected = expected_line.to_string();
    Box::new(move |text| {
        rewrite_line(&path, text, line_index, &expected, |line| {
            match grammar::replace_status_char(line, next_status) {
                // An unchanged line means the pattern did not do its job
                Some(updated) if updated != line => Ok(updated),
                _ => Err(EditError::StatusWriteFailed {
                    path: path.clone(),
                    line: line_index,
                }),
            }
        })
    })
}

/// Applies `rewrite` to line `line_index` of `text`, enforcing the bounds
/// and stale-line checks shared by both edit operations.
fn rewrite_line<F>(
    path: &str,
    text: &str,
    line_index: usize,
    expected_line: &str,
    rewrite: F,
) -> Result<String, EditError>
where
    F: FnOnce(&str) -> Result<String, EditError>,
{
    let lines: Vec<&str> = text.split('\n').collect();
    if line_index >= lines.len() {
        return Err(EditError::LineOutOfBounds {
            path: path.to_string(),
            line: line_index,
            line_count: lines.len(),
        });
    }

    let current = lines[line_index];
    // Line indices shift when a document is edited elsewhere; fail closed
    // rather than rewrite an unrelated line
    if current != expected_line {
        log::warn!(
            "Line {} of {} is not the line this task was scanned from, refusing to rewrite it",
            line_index,
            path
        );
        return Err(EditError::StaleLineReference {
            path: path.to_string(),
            line: line_index,
        });
    }

    let updated = rewrite(current)?;
    let mut updated_lines: Vec<&str> = lines;
    updated_lines[line_index] = &updated;
    Ok(updated_lines.join("\n"))
}
