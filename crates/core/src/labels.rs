//! Label resolution and predicate matching across the three event
//! label namespaces.
//!
//! A single label is resolved with last-namespace-wins shadowing
//! (check-level > entity-level > event-level), while predicate matching
//! treats the namespaces as one union: a pair satisfies the predicate
//! if any namespace carries it.

use std::collections::HashMap;

use crate::event::Event;

/// Resolve a label across the event's namespaces.
///
/// Scans event-level, then entity-level, then check-level labels; a
/// later namespace's value for the same key shadows an earlier one.
/// Presence is tracked explicitly: `Some("")` means the label exists
/// with an empty value, which is distinct from `None` (absent in every
/// namespace).
pub fn resolve<'a>(event: &'a Event, name: &str) -> Option<&'a str> {
    let mut found = None;
    for namespace in event.label_namespaces() {
        if let Some(value) = namespace.get(name) {
            found = Some(value.as_str());
        }
    }
    found
}

/// Resolve a label, treating an empty resolved value as absent.
///
/// This is the lookup used for command-argument extraction: an empty
/// string cannot feed a command fragment, so it counts as a failed
/// extraction even though the key exists.
pub fn resolve_non_empty<'a>(event: &'a Event, name: &str) -> Option<&'a str> {
    resolve(event, name).filter(|value| !value.is_empty())
}

/// Evaluate an all-of label-equality predicate against an event.
///
/// An empty predicate never matches (a rule with no match condition
/// never fires; a rule with no exclude condition is vacuously
/// non-excluding). A non-empty predicate matches iff every key/value
/// pair is carried, with exact equality, by at least one of the three
/// namespaces.
pub fn matches(event: &Event, predicate: &HashMap<String, String>) -> bool {
    if predicate.is_empty() {
        return false;
    }
    predicate.iter().all(|(key, value)| {
        event
            .label_namespaces()
            .iter()
            .any(|namespace| namespace.get(key).map(String::as_str) == Some(value.as_str()))
    })
}
