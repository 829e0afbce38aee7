//! This is an example of how corkboard can be used.
//! This binary cycles the status of every task it finds under a folder,
//! reschedules overdue tasks to today, and prints the resulting event list.

use std::path::Path;

use corkboard::{CalendarConfig, CalendarProvider, EventDate, FolderStore};

#[tokio::main]
async fn main() {
    env_logger::init();

    let root = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("."));
    println!("This example edits the markdown files under {} in place!", root);

    let store = FolderStore::new(Path::new(&root));
    let mut provider = CalendarProvider::new(store, CalendarConfig::default());
    provider.refresh().await.unwrap();

    let task_ids: Vec<String> = provider
        .events()
        .iter()
        .filter(|event| !event.is_header())
        .map(|event| event.event_id())
        .collect();

    let mut n_toggled = 0;
    for task_id in &task_ids {
        match provider.toggle_status(task_id).await {
            Ok(edit) => {
                println!("{}: now {:?} ({:?})", task_id, edit.next_status(), edit.phase());
                n_toggled += 1;
            }
            Err(err) => println!("{}: not toggled ({})", task_id, err),
        }
    }
    println!("{} tasks toggled.", n_toggled);

    // Drag every overdue task onto today, like a calendar drop would
    let today = EventDate::from(chrono::Local::now().date_naive());
    let overdue: Vec<String> = provider
        .events()
        .iter()
        .filter(|event| !event.is_header() && *event.date() < today)
        .map(|event| event.event_id())
        .collect();
    for task_id in &overdue {
        match provider.reschedule(task_id, today.clone()).await {
            Ok(outcome) => println!("{}: {:?}", task_id, outcome),
            Err(err) => println!("{}: not rescheduled ({})", task_id, err),
        }
    }

    println!();
    corkboard::utils::print_events(provider.events());
}
