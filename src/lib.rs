//! This crate extracts checklist tasks from markdown notes and pins them
//! onto a calendar.
//!
//! Documents are read through a [`DocumentStore`](traits::DocumentStore): a
//! folder of `.md` files on disk ([`FolderStore`]), an in-memory corpus
//! ([`MemoryStore`]), or anything else the host implements. \
//! A scan parses every checklist line (see the [`grammar`] and
//! [`extractor`] modules), and the [`event`] module assembles the resulting
//! task records into the ordered event list a calendar widget consumes.
//!
//! The [`CalendarProvider`] ties it all together and supports round-trip
//! edits: a status cycle or a date change made on a rendered event is
//! written back into the exact source line that produced it, optimistically
//! applied and rolled back if the write fails. The documents stay the
//! single source of truth; nothing is persisted anywhere else.

pub mod traits;

pub mod error;
pub use error::{EditError, StoreError};
pub mod config;
pub use config::CalendarConfig;

pub mod grammar;
pub mod extractor;
mod task;
pub use task::{EventDate, TaskId, TaskRecord, TaskStatus};
pub mod scanner;
pub mod event;
pub use event::CalendarEvent;
pub mod editor;
pub use editor::{EditPhase, RescheduleOutcome, StatusEdit};
pub mod provider;
pub use provider::CalendarProvider;

pub mod folder;
pub use folder::FolderStore;
pub mod memory;
pub use memory::MemoryStore;
pub mod mock_behaviour;

pub mod utils;
