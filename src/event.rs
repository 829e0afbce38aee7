//! The event model consumed by the calendar widget
//!
//! A scan's task records are grouped by (document, date); each group gets a
//! synthetic header, and every event gets a sort key so that, inside one
//! day cell, a document's header comes first, its tasks follow by status
//! tier, and no two documents' events interleave.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use serde::Serialize;

use crate::config::CalendarConfig;
use crate::task::{EventDate, TaskRecord, TaskStatus};
use crate::utils;

/// Gap between the base offsets of two documents, so their events never
/// interleave within a day
const DOCUMENT_STRIDE: i64 = 1000;
/// Offset of a group's header below its tasks
const HEADER_OFFSET: i64 = 0;

/// Synthetic grouping marker: one per (document, date) pair that has at
/// least one task. Never individually mutated, rebuilt on every assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderEvent {
    document_name: String,
    date: EventDate,
    task_count: usize,
    sort_origin: i64,
    title: String,
}

impl HeaderEvent {
    fn new(document_name: String, date: EventDate, task_count: usize, sort_origin: i64) -> Self {
        let title = format!("{} ({})", document_name, task_count);
        Self {
            document_name,
            date,
            task_count,
            sort_origin,
            title,
        }
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }
    pub fn date(&self) -> &EventDate {
        &self.date
    }
    pub fn task_count(&self) -> usize {
        self.task_count
    }
    pub fn sort_origin(&self) -> i64 {
        self.sort_origin
    }
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sort_order(&self) -> i64 {
        self.sort_origin + HEADER_OFFSET
    }

    pub fn event_id(&self) -> String {
        format!("{}:{}:header", self.document_name, self.date)
    }
}

/// One task as shown on the calendar
#[derive(Clone, Debug, PartialEq)]
pub struct TaskEvent {
    record: TaskRecord,
    sort_order: i64,
    /// Computed at assembly; a status toggle does not refresh the glyph
    /// until the next scan
    title: String,
}

impl TaskEvent {
    fn new(record: TaskRecord, sort_order: i64, title: String) -> Self {
        Self {
            record,
            sort_order,
            title,
        }
    }

    pub fn record(&self) -> &TaskRecord {
        &self.record
    }
    pub fn date(&self) -> &EventDate {
        self.record.date()
    }
    pub fn status(&self) -> TaskStatus {
        self.record.status()
    }
    pub fn sort_order(&self) -> i64 {
        self.sort_order
    }
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The presentation class follows the status, so an optimistic status
    /// change is immediately visible here too
    pub fn status_class(&self) -> &'static str {
        self.record.status().status_class()
    }

    pub fn event_id(&self) -> String {
        self.record.id().to_string()
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.record.set_status(status);
    }

    pub(crate) fn set_date(&mut self, date: EventDate) {
        self.record.set_date(date);
    }

    pub(crate) fn set_raw_line(&mut self, raw_line: String) {
        self.record.set_raw_line(raw_line);
    }
}

/// What the calendar widget receives: a synthetic group header or a task
#[derive(Clone, Debug, PartialEq)]
pub enum CalendarEvent {
    Header(HeaderEvent),
    Task(TaskEvent),
}

/// Returns `header.$property_name` or `task.$property_name`, depending on
/// which variant self is
macro_rules! synthetise_common_getter {
    ($property_name:ident, $return_type:ty) => {
        pub fn $property_name(&self) -> $return_type {
            match self {
                CalendarEvent::Header(h) => h.$property_name(),
                CalendarEvent::Task(t) => t.$property_name(),
            }
        }
    };
}

impl CalendarEvent {
    synthetise_common_getter!(date, &EventDate);
    synthetise_common_getter!(sort_order, i64);
    synthetise_common_getter!(title, &str);
    synthetise_common_getter!(event_id, String);

    pub fn is_header(&self) -> bool {
        match self {
            CalendarEvent::Header(_) => true,
            _ => false,
        }
    }

    pub fn as_task(&self) -> Option<&TaskEvent> {
        match self {
            CalendarEvent::Task(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn as_task_mut(&mut self) -> Option<&mut TaskEvent> {
        match self {
            CalendarEvent::Task(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a reference to the inner TaskEvent
    ///
    /// # Panics
    /// Panics if this event is a header
    pub fn unwrap_task(&self) -> &TaskEvent {
        match self {
            CalendarEvent::Task(t) => t,
            _ => panic!("Not a task"),
        }
    }

    /// Serializable form of this event, as the widget contract expects it
    pub fn to_payload(&self) -> EventPayload {
        match self {
            CalendarEvent::Header(header) => EventPayload {
                id: header.event_id(),
                title: header.title().to_string(),
                date: header.date().clone(),
                all_day: true,
                sort_order: header.sort_order(),
                status_class: "task-header",
                is_header: true,
                extended: None,
            },
            CalendarEvent::Task(task) => EventPayload {
                id: task.event_id(),
                title: task.title().to_string(),
                date: task.date().clone(),
                all_day: true,
                sort_order: task.sort_order(),
                status_class: task.status_class(),
                is_header: false,
                extended: Some(ExtendedFields {
                    file_path: task.record().document_path().to_string(),
                    line_number: task.record().line_index(),
                    status: task.status(),
                }),
            },
        }
    }
}

/// Wire shape handed to the calendar widget. The whole list is handed over
/// at once, replace-all semantics: there is no incremental update.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub id: String,
    pub title: String,
    pub date: EventDate,
    pub all_day: bool,
    pub sort_order: i64,
    pub status_class: &'static str,
    pub is_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedFields>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedFields {
    pub file_path: String,
    pub line_number: usize,
    pub status: TaskStatus,
}

/// Groups one scan's task records, synthesizes headers, and emits the
/// combined event list in display order.
pub fn assemble_events(records: Vec<TaskRecord>, config: &CalendarConfig) -> Vec<CalendarEvent> {
    // One base offset per document, in first-encountered order, so groups
    // stay contiguous per document
    let origins: HashMap<String, i64> = records
        .iter()
        .map(|record| record.document_path())
        .unique()
        .enumerate()
        .map(|(index, path)| (path.to_string(), DOCUMENT_STRIDE * (index as i64 + 1)))
        .collect();

    let mut groups: BTreeMap<(String, EventDate), Vec<TaskRecord>> = BTreeMap::new();
    for record in records {
        let key = (record.document_path().to_string(), record.date().clone());
        groups.entry(key).or_insert_with(Vec::new).push(record);
    }

    let mut events = Vec::new();
    for ((path, date), group) in groups {
        let origin = origins[&path];
        let document_name = utils::document_display_name(&path).to_string();

        events.push(CalendarEvent::Header(HeaderEvent::new(
            document_name.clone(),
            date,
            group.len(),
            origin,
        )));

        for record in group {
            let title = task_title(&record, &document_name, config);
            // Tasks land just after their header, ordered by status tier
            let sort_order = origin + HEADER_OFFSET + 1 + record.status().sort_weight();
            events.push(CalendarEvent::Task(TaskEvent::new(record, sort_order, title)));
        }
    }

    // Display order: by day, then sort key; ties inside a status tier break
    // by description, ascending
    events.sort_by(|a, b| {
        let key_a = (a.date(), a.sort_order(), sort_text(a));
        let key_b = (b.date(), b.sort_order(), sort_text(b));
        key_a.cmp(&key_b)
    });
    events
}

fn sort_text(event: &CalendarEvent) -> &str {
    match event {
        CalendarEvent::Header(_) => "",
        CalendarEvent::Task(task) => task.record().description(),
    }
}

fn task_title(record: &TaskRecord, document_name: &str, config: &CalendarConfig) -> String {
    let title = format!("{} {}", record.description(), record.status().glyph());
    if config.show_file_name {
        format!("{}\n{}", document_name, title)
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_text;

    fn sample_records() -> Vec<TaskRecord> {
        let mut records = scan_text(
            "work/projects.md",
            "- [ ] Draft roadmap 📅 2024-06-01\n\
             - [x] Send invoices ✅ 2024-06-01\n\
             - [/] Review budget 📅 2024-06-01\n\
             - [ ] Book venue 📅 2024-06-03",
        );
        records.extend(scan_text(
            "home.md",
            "- [ ] Buy milk 📅 2024-06-01\n\
             - [ ] Call plumber 📅 2024-06-01",
        ));
        records
    }

    fn events_on<'a>(events: &'a [CalendarEvent], date: &str) -> Vec<&'a CalendarEvent> {
        events.iter().filter(|e| e.date().as_str() == date).collect()
    }

    #[test]
    fn headers_precede_their_tasks_and_documents_do_not_interleave() {
        let events = assemble_events(sample_records(), &CalendarConfig::default());

        let day = events_on(&events, "2024-06-01");
        // 2 headers + 5 tasks on that day
        assert_eq!(day.len(), 7);

        // Events sharing a date and document are contiguous, header first
        let mut current_header_origin = None;
        for event in &day {
            match event {
                CalendarEvent::Header(h) => current_header_origin = Some(h.sort_origin()),
                CalendarEvent::Task(t) => {
                    let origin = current_header_origin.expect("task before any header");
                    assert!(t.sort_order() > origin);
                    assert!(t.sort_order() < origin + DOCUMENT_STRIDE);
                }
            }
        }
    }

    #[test]
    fn tasks_sort_by_status_tier_then_description() {
        let events = assemble_events(sample_records(), &CalendarConfig::default());
        let day = events_on(&events, "2024-06-01");

        let work_tasks: Vec<&TaskEvent> = day
            .iter()
            .filter_map(|e| e.as_task())
            .filter(|t| t.record().document_path() == "work/projects.md")
            .collect();
        let descriptions: Vec<&str> = work_tasks
            .iter()
            .map(|t| t.record().description())
            .collect();
        // in-progress < incomplete < completed
        assert_eq!(
            descriptions,
            vec!["Review budget", "Draft roadmap", "Send invoices"]
        );
    }

    #[test]
    fn header_counts_and_ids() {
        let events = assemble_events(sample_records(), &CalendarConfig::default());
        let headers: Vec<&HeaderEvent> = events
            .iter()
            .filter_map(|e| match e {
                CalendarEvent::Header(h) => Some(h),
                _ => None,
            })
            .collect();
        // (projects, 06-01), (projects, 06-03), (home, 06-01)
        assert_eq!(headers.len(), 3);

        let home = headers
            .iter()
            .find(|h| h.document_name() == "home" && h.date().as_str() == "2024-06-01")
            .unwrap();
        assert_eq!(home.task_count(), 2);
        assert_eq!(home.title(), "home (2)");
        assert_eq!(home.event_id(), "home:2024-06-01:header");
    }

    #[test]
    fn show_file_name_prefixes_task_titles() {
        let records = scan_text("home.md", "- [ ] Buy milk 📅 2024-06-01");

        let with = assemble_events(records.clone(), &CalendarConfig::default());
        assert_eq!(with[1].title(), "home\nBuy milk ❎");

        let mut config = CalendarConfig::default();
        config.show_file_name = false;
        let without = assemble_events(records, &config);
        assert_eq!(without[1].title(), "Buy milk ❎");
    }

    #[test]
    fn payload_has_the_widget_contract_shape() {
        let records = scan_text("home.md", "- [/] Buy milk 📅 2024-06-01");
        let events = assemble_events(records, &CalendarConfig::default());

        let header = serde_json::to_value(events[0].to_payload()).unwrap();
        assert_eq!(header["isHeader"], true);
        assert_eq!(header["allDay"], true);
        assert_eq!(header["statusClass"], "task-header");
        assert!(header.get("extended").is_none());

        let task = serde_json::to_value(events[1].to_payload()).unwrap();
        assert_eq!(task["id"], "home.md:0");
        assert_eq!(task["date"], "2024-06-01");
        assert_eq!(task["isHeader"], false);
        assert_eq!(task["statusClass"], "task-inprogress");
        assert_eq!(task["extended"]["filePath"], "home.md");
        assert_eq!(task["extended"]["lineNumber"], 0);
        assert_eq!(task["extended"]["status"], "inProgress");
    }

    #[test]
    fn empty_scan_assembles_to_an_empty_list() {
        let events = assemble_events(Vec::new(), &CalendarConfig::default());
        assert!(events.is_empty());
    }
}
