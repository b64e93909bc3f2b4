//! Structural extractor for the fixed family-events markup layout.
//!
//! The extractor understands exactly one structural convention: a
//! container element with id `eventcontainer` holding `div` nodes
//! whose class attribute contains `details`. It is a pure function
//! over markup; parsing is permissive (html5ever), so malformed or
//! partial markup never aborts extraction.

use scraper::{ElementRef, Html, Selector};

use crate::error::{PipelineError, Result};
use crate::types::{ExtractionResult, FamilyEvent};

/// Well-known id of the event container element.
const CONTAINER_ID: &str = "eventcontainer";

/// Positional cutoff: matches past the fifth are silently dropped.
const MAX_EVENTS: usize = 5;

/// Extract up to [`MAX_EVENTS`] events from raw markup, in document
/// order.
///
/// Returns [`PipelineError::StructureNotFound`] when the container or
/// the detail nodes are absent. A details node without an anchor is
/// skipped silently: it contributes no event and does not abort the
/// remaining nodes.
pub fn extract_events(html: &str) -> Result<ExtractionResult> {
    let document = Html::parse_document(html);

    let container_selector = Selector::parse("#eventcontainer").unwrap();
    // Substring match on the class attribute, not a class-token match,
    // so `class="eventdetails"` qualifies as well.
    let details_selector = Selector::parse(r#"div[class*="details"]"#).unwrap();

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| {
            PipelineError::StructureNotFound(format!(
                "no element with id '{}' found on the page",
                CONTAINER_ID
            ))
        })?;

    let details: Vec<ElementRef> = container.select(&details_selector).take(MAX_EVENTS).collect();
    if details.is_empty() {
        return Err(PipelineError::StructureNotFound(format!(
            "no div elements with class 'details' found within {} on the page",
            CONTAINER_ID
        )));
    }

    let events = details.into_iter().filter_map(extract_event).collect();

    Ok(ExtractionResult { events })
}

/// Read one event out of a details node, or `None` if the node has no
/// title anchor.
fn extract_event(details: ElementRef) -> Option<FamilyEvent> {
    let anchor_selector = Selector::parse("a").unwrap();
    let info_selector = Selector::parse("div[style]").unwrap();

    let anchor = details.select(&anchor_selector).next()?;

    // Attribute values arrive entity-decoded from the parser.
    let url = anchor.value().attr("href").unwrap_or_default().to_string();
    let title = anchor.value().attr("title").unwrap_or_default().to_string();

    let info = details
        .select(&info_selector)
        .next()
        .map(|node| node.inner_html())
        .unwrap_or_default();
    let parts = split_on_breaks(&info);

    Some(FamilyEvent {
        url,
        title,
        location: parts.first().cloned().unwrap_or_default(),
        date_range: parts.get(1).cloned().unwrap_or_default(),
    })
}

/// Split inline markup on the literal line-break markers, discarding
/// empty fragments, then entity-decode and trim each fragment.
fn split_on_breaks(inner_html: &str) -> Vec<String> {
    inner_html
        .replace("<br />", "\u{0}")
        .replace("<br/>", "\u{0}")
        .replace("<br>", "\u{0}")
        .split('\u{0}')
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| decode_entities(fragment).trim().to_string())
        .collect()
}

/// Decode the HTML entities that survive `inner_html` serialisation.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details_node(n: usize) -> String {
        format!(
            r#"<div class="item">
                 <div class="details">
                   <a href="/event/{n}" title="Event {n}"></a>
                   <div style="color: grey">Town Hall {n}<br>1 Jan - 2 Jan</div>
                 </div>
               </div>"#
        )
    }

    fn page_with(details: &str) -> String {
        format!(
            r#"<html><body><div id="eventcontainer">{details}</div></body></html>"#
        )
    }

    #[test]
    fn extracts_events_in_document_order() {
        let html = page_with(&(1..=3).map(details_node).collect::<String>());
        let result = extract_events(&html).unwrap();

        assert_eq!(result.events.len(), 3);
        assert_eq!(result.events[0].url, "/event/1");
        assert_eq!(result.events[0].title, "Event 1");
        assert_eq!(result.events[0].location, "Town Hall 1");
        assert_eq!(result.events[0].date_range, "1 Jan - 2 Jan");
        assert_eq!(result.events[2].title, "Event 3");
    }

    #[test]
    fn caps_output_at_five_events() {
        let html = page_with(&(1..=8).map(details_node).collect::<String>());
        let result = extract_events(&html).unwrap();

        assert_eq!(result.events.len(), 5);
        assert_eq!(result.events[4].title, "Event 5");
    }

    #[test]
    fn missing_container_is_structure_not_found() {
        let err = extract_events("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(matches!(err, PipelineError::StructureNotFound(ref d) if d.contains("eventcontainer")));
    }

    #[test]
    fn missing_details_is_structure_not_found() {
        let html = page_with(r#"<div class="other">no details here</div>"#);
        let err = extract_events(&html).unwrap_err();
        assert!(matches!(err, PipelineError::StructureNotFound(ref d) if d.contains("details")));
    }

    #[test]
    fn anchorless_details_node_is_skipped_without_aborting() {
        let broken = r#"<div class="details"><div style="x">Nowhere<br>Never</div></div>"#;
        let html = page_with(&format!("{}{}", broken, details_node(2)));
        let result = extract_events(&html).unwrap();

        // One fewer event than detail nodes; no padding, no error.
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].title, "Event 2");
    }

    #[test]
    fn class_match_is_substring_not_token() {
        let html = page_with(
            r#"<div class="eventdetails compact">
                 <a href="/e" title="Substring"></a>
               </div>"#,
        );
        let result = extract_events(&html).unwrap();
        assert_eq!(result.events[0].title, "Substring");
    }

    #[test]
    fn decodes_entities_in_title_and_info() {
        let html = page_with(
            r#"<div class="details">
                 <a href="/e" title="Fun &amp; Games"></a>
                 <div style="x">Caf&amp;eacute; corner &amp; park<br>Sat &amp; Sun</div>
               </div>"#,
        );
        let result = extract_events(&html).unwrap();

        assert_eq!(result.events[0].title, "Fun & Games");
        // Text nodes are re-encoded by inner_html and decoded once here.
        assert_eq!(result.events[0].location, "Caf&eacute; corner & park");
        assert_eq!(result.events[0].date_range, "Sat & Sun");
    }

    #[test]
    fn missing_info_div_yields_empty_location_and_dates() {
        let html = page_with(r#"<div class="details"><a href="/e" title="Bare"></a></div>"#);
        let result = extract_events(&html).unwrap();

        assert_eq!(result.events[0].location, "");
        assert_eq!(result.events[0].date_range, "");
    }

    #[test]
    fn tolerates_malformed_markup() {
        let html = r#"<div id="eventcontainer"><div class="details"><a href="/e" title="Unclosed">"#;
        let result = extract_events(html).unwrap();
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].title, "Unclosed");
    }

    #[test]
    fn self_closing_break_variants_all_split() {
        for br in ["<br>", "<br/>", "<br />"] {
            let html = page_with(&format!(
                r#"<div class="details">
                     <a href="/e" title="T"></a>
                     <div style="x">Here{br}Then</div>
                   </div>"#
            ));
            let result = extract_events(&html).unwrap();
            assert_eq!(result.events[0].location, "Here", "marker {br}");
            assert_eq!(result.events[0].date_range, "Then", "marker {br}");
        }
    }
}
