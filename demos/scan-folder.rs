//! This is an example of how corkboard can be used.
//! This binary scans a folder of markdown notes and prints the event list a
//! calendar widget would receive.

use std::path::Path;

use corkboard::{CalendarConfig, CalendarProvider, FolderStore};

#[tokio::main]
async fn main() {
    env_logger::init();

    let root = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("."));
    println!("Scanning markdown checklists under {} ...", root);
    println!("You can set the RUST_LOG environment variable to display more info about the scan.");
    println!();

    let store = FolderStore::new(Path::new(&root));
    let mut provider = CalendarProvider::new(store, CalendarConfig::default());

    if let Err(err) = provider.refresh().await {
        eprintln!("Scan failed: {}", err);
        return;
    }

    println!("{} events:", provider.events().len());
    corkboard::utils::print_events(provider.events());
    println!();
    println!("As the widget payload:");
    println!(
        "{}",
        serde_json::to_string_pretty(&provider.payloads()).unwrap()
    );
}
