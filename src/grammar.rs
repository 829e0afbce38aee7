//! The checklist line grammar
//!
//! A task line is: optional leading whitespace, the literal opener `- [`,
//! one status character, the literal closer `] `, then the remainder text.
//! Everything else in a document is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::task::TaskStatus;

static TASK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*- \[(\s|x|X|/)\] (.*)$").unwrap());

/// Same construct, split into groups so the status character can be replaced
/// without touching any other byte of the line
static CHECKBOX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*- \[)(\s|x|X|/)(\] .*)$").unwrap());

/// Parses one line of text.
///
/// Returns the checkbox status and the remainder text, or `None` when the
/// line is not a checklist item. Lines with an unrecognized character inside
/// the checkbox are not tasks.
pub fn parse_task_line(line: &str) -> Option<(TaskStatus, &str)> {
    let caps = TASK_LINE.captures(line)?;
    let status_char = caps.get(1)?.as_str().chars().next()?;
    let status = TaskStatus::from_checkbox_char(status_char)?;
    Some((status, caps.get(2)?.as_str()))
}

/// Replaces the status character of a checklist line, leaving every other
/// byte untouched. Returns `None` when the line has no checkbox construct.
pub fn replace_status_char(line: &str, status: TaskStatus) -> Option<String> {
    let caps = CHECKBOX.captures(line)?;
    Some(format!(
        "{}{}{}",
        &caps[1],
        status.checkbox_char(),
        &caps[3]
    ))
}
