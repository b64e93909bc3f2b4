//! Rendering of event lists into the markdown document that feeds the
//! summarise stage.
//!
//! The rendered bytes are also the summarise cache-key input, so the
//! output here must stay byte-stable for a given event list.

use crate::types::FamilyEvent;

/// Backslash-escape markdown control characters in a field value.
///
/// Escapes `\ * _ ` # - >` in that literal order; the backslash goes
/// first so subsequently inserted backslashes are not re-escaped.
/// Pure function, no side effects.
pub fn escape_markdown(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('*', "\\*")
        .replace('_', "\\_")
        .replace('`', "\\`")
        .replace('#', "\\#")
        .replace('-', "\\-")
        .replace('>', "\\>")
}

/// Render an event list as a markdown document: one `##` section per
/// event with optional Date / Location / URL bullets for non-blank
/// fields.
pub fn events_to_markdown(events: &[FamilyEvent]) -> String {
    let mut markdown = String::from("# Events\n\n");

    for event in events {
        markdown.push_str(&format!("## {}\n", escape_markdown(&event.title)));

        if !event.date_range.trim().is_empty() {
            markdown.push_str(&format!("- **Date:** {}\n", escape_markdown(&event.date_range)));
        }
        if !event.location.trim().is_empty() {
            markdown.push_str(&format!(
                "- **Location:** {}\n",
                escape_markdown(&event.location)
            ));
        }
        if !event.url.trim().is_empty() {
            markdown.push_str(&format!("- **URL:** {}\n", escape_markdown(&event.url)));
        }

        markdown.push('\n');
    }

    markdown
}
