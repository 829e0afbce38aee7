//! This module turns a document store into a live calendar event list
//!
//! It is the layer the host wires to its calendar widget: it produces the
//! event list, and turns widget gestures (a drop onto another day, a click
//! on an event) back into document edits.

use crate::config::CalendarConfig;
use crate::editor;
use crate::editor::{EditPhase, RescheduleOutcome, StatusEdit};
use crate::error::{EditError, StoreError};
use crate::event::{assemble_events, CalendarEvent, EventPayload, TaskEvent};
use crate::grammar;
use crate::scanner;
use crate::task::{EventDate, TaskId};
use crate::traits::DocumentStore;

/// Combines a [`DocumentStore`] and a [`CalendarConfig`] into a live event
/// list with round-trip editing.
///
/// A [`refresh`](Self::refresh) fully replaces the previous event list;
/// nothing is updated incrementally. The caller is in charge of debouncing
/// refreshes triggered by external change notifications, and of never
/// issuing two gestures for the same event concurrently.
pub struct CalendarProvider<S: DocumentStore> {
    store: S,
    config: CalendarConfig,
    events: Vec<CalendarEvent>,
}

impl<S: DocumentStore> CalendarProvider<S> {
    pub fn new(store: S, config: CalendarConfig) -> Self {
        Self {
            store,
            config,
            events: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// The events produced by the last refresh, in display order
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Widget payloads for the current events (replace-all semantics)
    pub fn payloads(&self) -> Vec<EventPayload> {
        self.events.iter().map(CalendarEvent::to_payload).collect()
    }

    /// Re-scans every document and rebuilds the event list from scratch
    pub async fn refresh(&mut self) -> Result<&[CalendarEvent], StoreError> {
        let records = scanner::scan_documents(&self.store).await?;
        self.events = assemble_events(records, &self.config);
        Ok(&self.events)
    }

    /// Moves a task to `new_date`, rewriting the date of the first marker
    /// present on its source line (due, then scheduled, then completion).
    ///
    /// A drop onto the task's current date is a success with zero document
    /// writes. After a successful write the event list is rebuilt, since
    /// the move changes grouping and headers. On error nothing has been
    /// persisted and the caller must revert the widget-side move; gestures
    /// on header events fail that way immediately.
    pub async fn reschedule(
        &mut self,
        event_id: &str,
        new_date: EventDate,
    ) -> Result<RescheduleOutcome, EditError> {
        let (task_id, raw_line, current_date) = {
            let task = self.find_task(event_id)?;
            (
                task.record().id().clone(),
                task.record().raw_line().to_string(),
                task.record().date().clone(),
            )
        };

        if current_date == new_date {
            log::debug!("{} already on {}, skipping the write", task_id, new_date);
            return Ok(RescheduleOutcome::Unchanged);
        }

        let transform = editor::reschedule_transform(&task_id, &raw_line, &new_date);
        self.store
            .process_document(task_id.document_path(), transform)
            .await?;

        // The write landed: reflect it on the record right away, then
        // rebuild the whole list since grouping and headers move with it
        if let Some(updated_line) = editor::replace_marker_date(&raw_line, &new_date) {
            if let Some(task) = self.find_task_by_id_mut(&task_id) {
                task.set_date(new_date);
                task.set_raw_line(updated_line);
            }
        }
        self.refresh().await?;
        Ok(RescheduleOutcome::Rescheduled)
    }

    /// Applies the next status in the cycle to the in-memory event, ahead
    /// of any I/O.
    ///
    /// The returned edit is [`Pending`](EditPhase::Pending) and the event
    /// already shows the next status and presentation class. Drive it to
    /// completion with [`commit_toggle`](Self::commit_toggle), or use
    /// [`toggle_status`](Self::toggle_status) for the whole gesture.
    pub fn begin_toggle(&mut self, event_id: &str) -> Result<StatusEdit, EditError> {
        let task = self.find_task_mut(event_id)?;
        let prior = task.status();
        let next = prior.next();
        task.set_status(next);
        log::debug!(
            "Optimistically set {} to {:?} (was {:?})",
            event_id,
            next,
            prior
        );
        Ok(StatusEdit::new(task.record().id().clone(), prior, next))
    }

    /// Issues the checkbox rewrite for a pending toggle and reconciles the
    /// optimistic state with the outcome.
    ///
    /// On success the edit comes back [`Committed`](EditPhase::Committed)
    /// and the optimistic state is kept; no re-scan is needed since a
    /// status change moves nothing across groups. On failure the event is
    /// rolled back to its prior status and the error is surfaced.
    pub async fn commit_toggle(&mut self, mut edit: StatusEdit) -> Result<StatusEdit, EditError> {
        let outcome = self.write_toggle(&edit).await;
        match self.reconcile_toggle(&mut edit, outcome) {
            Ok(()) => Ok(edit),
            Err(err) => Err(err),
        }
    }

    /// The whole toggle gesture: optimistic mutation, write, reconcile
    pub async fn toggle_status(&mut self, event_id: &str) -> Result<StatusEdit, EditError> {
        let edit = self.begin_toggle(event_id)?;
        self.commit_toggle(edit).await
    }

    async fn write_toggle(&self, edit: &StatusEdit) -> Result<String, EditError> {
        let task = self
            .find_task_by_id(edit.task_id())
            .ok_or_else(|| EditError::UnknownEvent(edit.task_id().to_string()))?;
        let raw_line = task.record().raw_line().to_string();

        // The line the store will hold after the write; the stale-line
        // check inside the transform guarantees this is exact
        let updated_line = grammar::replace_status_char(&raw_line, edit.next_status())
            .ok_or_else(|| EditError::StatusWriteFailed {
                path: edit.task_id().document_path().to_string(),
                line: edit.task_id().line_index(),
            })?;

        let transform = editor::toggle_transform(edit.task_id(), &raw_line, edit.next_status());
        self.store
            .process_document(edit.task_id().document_path(), transform)
            .await?;
        Ok(updated_line)
    }

    /// Single reconciliation point for a toggle: the write's completion
    /// drives the edit to Committed or RolledBack.
    fn reconcile_toggle(
        &mut self,
        edit: &mut StatusEdit,
        outcome: Result<String, EditError>,
    ) -> Result<(), EditError> {
        match outcome {
            Ok(updated_line) => {
                if let Some(task) = self.find_task_by_id_mut(edit.task_id()) {
                    task.set_raw_line(updated_line);
                }
                edit.set_phase(EditPhase::Committed);
                Ok(())
            }
            Err(err) => {
                if let Some(task) = self.find_task_by_id_mut(edit.task_id()) {
                    task.set_status(edit.prior_status());
                }
                edit.set_phase(EditPhase::RolledBack);
                log::warn!("Toggle of {} failed, rolled back: {}", edit.task_id(), err);
                Err(err)
            }
        }
    }

    fn find_task(&self, event_id: &str) -> Result<&TaskEvent, EditError> {
        match self.events.iter().find(|e| e.event_id() == event_id) {
            None => Err(EditError::UnknownEvent(event_id.to_string())),
            // Headers are synthetic: the gesture reverts, nothing is written
            Some(CalendarEvent::Header(_)) => Err(EditError::HeaderNotEditable),
            Some(CalendarEvent::Task(task)) => Ok(task),
        }
    }

    fn find_task_mut(&mut self, event_id: &str) -> Result<&mut TaskEvent, EditError> {
        match self.events.iter_mut().find(|e| e.event_id() == event_id) {
            None => Err(EditError::UnknownEvent(event_id.to_string())),
            Some(CalendarEvent::Header(_)) => Err(EditError::HeaderNotEditable),
            Some(CalendarEvent::Task(task)) => Ok(task),
        }
    }

    fn find_task_by_id(&self, id: &TaskId) -> Option<&TaskEvent> {
        self.events
            .iter()
            .filter_map(CalendarEvent::as_task)
            .find(|task| task.record().id() == id)
    }

    fn find_task_by_id_mut(&mut self, id: &TaskId) -> Option<&mut TaskEvent> {
        self.events
            .iter_mut()
            .filter_map(CalendarEvent::as_task_mut)
            .find(|task| task.record().id() == id)
    }
}
