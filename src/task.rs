//! Task records extracted from checklist lines

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{EditError, InvalidDate};

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// A calendar day in canonical `YYYY-MM-DD` form.
///
/// Only the shape is validated: out-of-calendar dates (e.g. `2024-02-30`)
/// are kept as-is, so that whatever is written in a document round-trips
/// byte-for-byte through the edit protocol. There is no time component and
/// no timezone.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventDate(String);

impl EventDate {
    /// Wrap a string whose shape has already been checked by a marker regex
    pub(crate) fn opaque(date: String) -> Self {
        Self(date)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The date as a real calendar date, when it is one
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl From<NaiveDate> for EventDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl FromStr for EventDate {
    type Err = InvalidDate;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if DATE_SHAPE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidDate(s.to_string()))
        }
    }
}

impl Display for EventDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Used to support serde
impl Serialize for EventDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// The status of a checklist item, as encoded by its checkbox character
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Incomplete,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Maps a checkbox character to a status. Returns `None` for characters
    /// that do not denote a task (the line is then ignored entirely).
    pub fn from_checkbox_char(c: char) -> Option<Self> {
        match c {
            'x' | 'X' => Some(TaskStatus::Completed),
            '/' => Some(TaskStatus::InProgress),
            c if c.is_whitespace() => Some(TaskStatus::Incomplete),
            _ => None,
        }
    }

    /// The character written between the square brackets
    pub fn checkbox_char(self) -> char {
        match self {
            TaskStatus::Incomplete => ' ',
            TaskStatus::InProgress => '/',
            TaskStatus::Completed => 'x',
        }
    }

    /// The next status in the fixed cycle
    /// incomplete → in-progress → completed → incomplete
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Incomplete => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Incomplete,
        }
    }

    /// Sort tier inside a (document, date) group: in-progress tasks first,
    /// then incomplete, then completed
    pub fn sort_weight(self) -> i64 {
        match self {
            TaskStatus::InProgress => 0,
            TaskStatus::Incomplete => 1,
            TaskStatus::Completed => 2,
        }
    }

    /// The CSS class the calendar widget styles this status with
    pub fn status_class(self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "task-incomplete",
            TaskStatus::InProgress => "task-inprogress",
            TaskStatus::Completed => "task-completed",
        }
    }

    /// Glyph appended to event titles
    pub fn glyph(self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "❎",
            TaskStatus::InProgress => "❇️",
            TaskStatus::Completed => "✅",
        }
    }
}

/// Identifies one checklist line: a document path and a zero-based line index.
///
/// Its display form is `path:line`. The id is unique within a scan but only
/// stable while the line does not move inside its document; records are
/// rebuilt wholesale on every scan.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    document_path: String,
    line_index: usize,
}

impl TaskId {
    pub fn new(document_path: String, line_index: usize) -> Self {
        Self {
            document_path,
            line_index,
        }
    }

    pub fn document_path(&self) -> &str {
        &self.document_path
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}:{}", self.document_path, self.line_index)
    }
}

impl FromStr for TaskId {
    type Err = EditError;

    /// Splits at the last colon, so document paths may contain colons themselves
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, line) = s
            .rsplit_once(':')
            .ok_or_else(|| EditError::InvalidTaskId(s.to_string()))?;
        if path.is_empty() {
            return Err(EditError::InvalidTaskId(s.to_string()));
        }
        let line_index = line
            .parse()
            .map_err(|_| EditError::InvalidTaskId(s.to_string()))?;
        Ok(Self {
            document_path: path.to_string(),
            line_index,
        })
    }
}

/// One checklist line, parsed.
///
/// Records are created fresh on every scan and discarded with it; the
/// documents themselves are the single source of truth.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskRecord {
    id: TaskId,
    status: TaskStatus,
    date: EventDate,
    description: String,
    /// Original line content, kept so the edit protocol can verify the line
    /// is still the one this record was scanned from
    raw_line: String,
}

impl TaskRecord {
    pub fn new(
        id: TaskId,
        status: TaskStatus,
        date: EventDate,
        description: String,
        raw_line: String,
    ) -> Self {
        Self {
            id,
            status,
            date,
            description,
            raw_line,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }
    pub fn document_path(&self) -> &str {
        self.id.document_path()
    }
    pub fn line_index(&self) -> usize {
        self.id.line_index()
    }
    pub fn status(&self) -> TaskStatus {
        self.status
    }
    pub fn date(&self) -> &EventDate {
        &self.date
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) fn set_date(&mut self, date: EventDate) {
        self.date = date;
    }

    pub(crate) fn set_raw_line(&mut self, raw_line: String) {
        self.raw_line = raw_line;
    }
}
