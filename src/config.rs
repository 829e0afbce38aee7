//! Support for the configuration options recognized by this library
//!
//! Configuration is always passed explicitly to the entry points that need
//! it; the library keeps no ambient settings state.

use serde::{Deserialize, Serialize};

/// Which way the calendar widget lays out text.
///
/// Presentation only: parsing is unaffected by the text direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// The options recognized in the host's settings blob.
///
/// Unknown options are ignored on deserialization, and missing ones fall
/// back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Prefix event titles with the name of the document they come from
    pub show_file_name: bool,
    /// Display the widget's week starting on Sunday instead of Monday.
    /// The widget consumes this; the core does not.
    pub start_week_on_sunday: bool,
    /// Reserved: tag prefix for week-scoped tasks. Recognized but not
    /// interpreted yet.
    pub week_tag_prefix: String,
    pub text_direction: TextDirection,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            show_file_name: true,
            start_week_on_sunday: true,
            week_tag_prefix: String::from("#week"),
            text_direction: TextDirection::Ltr,
        }
    }
}
