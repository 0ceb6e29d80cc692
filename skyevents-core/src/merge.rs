//! Combine event lists from every source into one chronological view.

use crate::event::Event;

/// Concatenate all lists and sort by start.
///
/// Inputs are not assumed to be sorted relative to each other. The sort is
/// stable, so events with equal starts keep the order of the input lists.
pub fn merge<I>(lists: I) -> Vec<Event>
where
    I: IntoIterator<Item = Vec<Event>>,
{
    let mut merged: Vec<Event> = lists.into_iter().flatten().collect();
    merged.sort_by_key(|e| e.start);
    merged
}

/// The `count` soonest events of an already merged list.
pub fn soonest(events: &[Event], count: usize) -> &[Event] {
    &events[..count.min(events.len())]
}
