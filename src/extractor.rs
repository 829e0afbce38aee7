//! Date markers and annotations embedded in the remainder text
//!
//! Markers are a fixed glyph, a single space, then a `YYYY-MM-DD` date:
//! `✅` for the completion date, `📅` for the due date, `⏳` for the
//! scheduled date. Recurrence (`🔁`) and the auxiliary glyphs (`🛫`, `➕`,
//! `⏰`) introduce free-text annotations that run up to the next recognized
//! glyph; they are only ever stripped from the display text, never
//! interpreted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::task::{EventDate, TaskStatus};

static COMPLETION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"✅ (\d{4}-\d{2}-\d{2})").unwrap());
static DUE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"📅 (\d{4}-\d{2}-\d{2})").unwrap());
static SCHEDULED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"⏳ (\d{4}-\d{2}-\d{2})").unwrap());

/// A recurrence or auxiliary glyph and its free text, up to the next
/// recognized glyph or the end of the line
static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[🔁🛫➕⏰][^✅📅⏳🔁🛫➕⏰]*").unwrap());

/// Natural-language recurrence, with no introducing glyph
static RECURRENCE_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bevery( \d+)? (day|week|month|year)s?\b").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// The three date marker kinds
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Due,
    Scheduled,
    Completion,
}

impl MarkerKind {
    /// The order the edit protocol probes markers in when rescheduling
    pub const RESCHEDULE_ORDER: [MarkerKind; 3] =
        [MarkerKind::Due, MarkerKind::Scheduled, MarkerKind::Completion];

    pub(crate) fn regex(self) -> &'static Regex {
        match self {
            MarkerKind::Due => &DUE_MARKER,
            MarkerKind::Scheduled => &SCHEDULED_MARKER,
            MarkerKind::Completion => &COMPLETION_MARKER,
        }
    }
}

/// The extractor's verdict on one remainder text
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    /// The selected event date; tasks without one never reach the calendar
    pub date: Option<EventDate>,
    /// The remainder with every marker and annotation removed and
    /// whitespace normalized
    pub description: String,
}

/// Selects the event date and cleans the description.
///
/// Date priority, first match wins: the completion marker when the task is
/// completed, then the due marker, then the scheduled marker. All markers
/// are stripped from the description regardless of which one was selected.
pub fn extract(remainder: &str, status: TaskStatus) -> Extraction {
    Extraction {
        date: select_date(remainder, status),
        description: clean_description(remainder),
    }
}

fn select_date(remainder: &str, status: TaskStatus) -> Option<EventDate> {
    if status == TaskStatus::Completed {
        if let Some(date) = marker_date(MarkerKind::Completion, remainder) {
            return Some(date);
        }
    }
    marker_date(MarkerKind::Due, remainder)
        .or_else(|| marker_date(MarkerKind::Scheduled, remainder))
}

/// The date carried by the first occurrence of `kind` in `text`, verbatim.
/// No calendar validation happens here: the captured digits already have the
/// canonical shape, and whatever they say round-trips untouched.
pub fn marker_date(kind: MarkerKind, text: &str) -> Option<EventDate> {
    let caps = kind.regex().captures(text)?;
    Some(EventDate::opaque(caps.get(1)?.as_str().to_string()))
}

/// Removes every recognized marker, annotation and recurrence phrase, then
/// collapses whitespace runs to a single space and trims.
///
/// Removing a marker can splice its neighbours into a new recurrence phrase,
/// so the pass is repeated until the text is stable; feeding cleaned output
/// back in is therefore always a no-op.
pub fn clean_description(remainder: &str) -> String {
    let mut text = strip_once(remainder);
    loop {
        let next = strip_once(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn strip_once(text: &str) -> String {
    let text = COMPLETION_MARKER.replace_all(text, "");
    let text = DUE_MARKER.replace_all(&text, "");
    let text = SCHEDULED_MARKER.replace_all(&text, "");
    let text = ANNOTATION.replace_all(&text, "");
    let text = RECURRENCE_PHRASE.replace_all(&text, "");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_marker_sets_the_date() {
        let extraction = extract("Buy milk 📅 2024-06-01", TaskStatus::Incomplete);
        assert_eq!(extraction.date.unwrap().as_str(), "2024-06-01");
        assert_eq!(extraction.description, "Buy milk");
    }

    #[test]
    fn completion_wins_over_due_when_completed() {
        let extraction = extract(
            "Finish report ✅ 2024-06-02 📅 2024-06-05",
            TaskStatus::Completed,
        );
        assert_eq!(extraction.date.unwrap().as_str(), "2024-06-02");
        assert_eq!(extraction.description, "Finish report");
    }

    #[test]
    fn completion_marker_is_ignored_unless_completed() {
        let extraction = extract(
            "Finish report ✅ 2024-06-02 📅 2024-06-05",
            TaskStatus::Incomplete,
        );
        assert_eq!(extraction.date.unwrap().as_str(), "2024-06-05");
    }

    #[test]
    fn due_wins_over_scheduled() {
        let extraction = extract(
            "Plan trip ⏳ 2024-07-01 📅 2024-07-15",
            TaskStatus::Incomplete,
        );
        assert_eq!(extraction.date.unwrap().as_str(), "2024-07-15");
    }

    #[test]
    fn scheduled_is_the_last_resort() {
        let extraction = extract("Water plants ⏳ 2024-07-01", TaskStatus::InProgress);
        assert_eq!(extraction.date.unwrap().as_str(), "2024-07-01");
    }

    #[test]
    fn no_marker_means_no_date() {
        let extraction = extract("Someday maybe", TaskStatus::Incomplete);
        assert_eq!(extraction.date, None);
        assert_eq!(extraction.description, "Someday maybe");
    }

    #[test]
    fn invalid_calendar_dates_are_kept_verbatim() {
        let extraction = extract("Impossible 📅 2024-02-30", TaskStatus::Incomplete);
        assert_eq!(extraction.date.unwrap().as_str(), "2024-02-30");
    }

    #[test]
    fn recurrence_annotations_are_stripped() {
        assert_eq!(
            clean_description("Pay rent 🔁 every month 📅 2024-06-01"),
            "Pay rent"
        );
        assert_eq!(clean_description("Standup every day at 9"), "Standup at 9");
        assert_eq!(clean_description("Review Every 2 Weeks"), "Review");
        assert_eq!(clean_description("Backup every 3 months"), "Backup");
    }

    #[test]
    fn auxiliary_glyphs_consume_up_to_the_next_glyph() {
        assert_eq!(
            clean_description("Fly out 🛫 2024-08-01 📅 2024-08-03"),
            "Fly out"
        );
        assert_eq!(
            clean_description("Call mom ⏰ after lunch 📅 2024-06-01"),
            "Call mom"
        );
        assert_eq!(clean_description("Added ➕ 2024-05-20 📅 2024-06-01"), "Added");
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(
            clean_description("  Buy   milk 📅 2024-06-01   "),
            "Buy milk"
        );
    }

    #[test]
    fn cleaning_is_idempotent() {
        let inputs = [
            "Buy milk 📅 2024-06-01",
            "Pay rent 🔁 every month 📅 2024-06-01 ✅ 2024-06-02",
            // Marker removal splices "every" and "day" back together here
            "every 📅 2024-06-01 day",
            "plain text with no markers",
        ];
        for input in &inputs {
            let once = clean_description(input);
            assert_eq!(clean_description(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn marker_date_finds_each_kind() {
        let line = "x ✅ 2024-01-01 📅 2024-02-02 ⏳ 2024-03-03";
        assert_eq!(
            marker_date(MarkerKind::Completion, line).unwrap().as_str(),
            "2024-01-01"
        );
        assert_eq!(
            marker_date(MarkerKind::Due, line).unwrap().as_str(),
            "2024-02-02"
        );
        assert_eq!(
            marker_date(MarkerKind::Scheduled, line).unwrap().as_str(),
            "2024-03-03"
        );
        assert_eq!(marker_date(MarkerKind::Due, "no markers"), None);
    }
}
