//! Signal and slot markers in struct tags.

use lazy_static::lazy_static;
use regex::Regex;

use crate::class::{MemberCategory, MemberRecord};
use crate::registry::Registry;
use crate::signature::{parse_signature, resolve_parameters};

lazy_static! {
    static ref MARKER: Regex =
        Regex::new(r"(signal|slot):([^:\s]*)").expect("marker pattern is valid");
    static ref IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid");
}

/// Category and name read from a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMarker {
    pub category: MemberCategory,
    pub name: String,
}

/// Reads the marker out of a tag with its quoting already removed.
///
/// `slot:` anywhere in the tag makes the member a slot, otherwise `signal:`
/// makes it a signal. The name is the text following the first marker, up
/// to the next colon, whitespace or the end of the tag.
pub fn parse_marker(tag: &str) -> Option<TagMarker> {
    let first = MARKER.captures(tag)?;
    let category = if tag.contains("slot:") {
        MemberCategory::Slot
    } else {
        MemberCategory::Signal
    };
    Some(TagMarker {
        category,
        name: first[2].to_string(),
    })
}

/// Builds the member a tagged field declares on `class`, if any.
///
/// Parameter types keep their Go spelling here; they are mapped once the
/// registry holds every discovered class.
pub fn parse_field_member(
    class: &str,
    tag: &str,
    field_type: &str,
    registry: &Registry,
) -> Option<MemberRecord> {
    let marker = parse_marker(tag)?;
    if marker.name.is_empty() {
        tracing::warn!(
            "Ignoring {} marker without a name on {}: {:?}",
            marker.category.as_str(),
            class,
            tag
        );
        return None;
    }
    if !IDENTIFIER.is_match(&marker.name) {
        tracing::warn!(
            "Ignoring {} marker {:?} on {}: not an identifier",
            marker.category.as_str(),
            marker.name,
            class
        );
        return None;
    }

    let mut member = MemberRecord::new(class, &marker.name, marker.category);
    if let Some(signature) = parse_signature(field_type) {
        member.params = resolve_parameters(&signature.params, registry);
        if marker.category == MemberCategory::Slot {
            member.host_return = signature.result;
        }
    }

    tracing::event!(
        tracing::Level::DEBUG,
        "{}: {} {} with {} parameters",
        class,
        marker.category.as_str(),
        marker.name,
        member.params.len()
    );
    Some(member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_stops_at_whitespace() {
        let marker = parse_marker("json:x signal:changed").unwrap();
        assert_eq!(marker.category, MemberCategory::Signal);
        assert_eq!(marker.name, "changed");
    }

    #[test]
    fn slot_wins_over_signal() {
        let marker = parse_marker("signal:a slot:b").unwrap();
        assert_eq!(marker.category, MemberCategory::Slot);
        assert_eq!(marker.name, "a");
    }

    #[test]
    fn empty_name_yields_no_member() {
        assert!(parse_field_member("A", "signal:", "func()", &Registry::new()).is_none());
    }
}
