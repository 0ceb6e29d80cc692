//! ICS (iCalendar) parsing for the astronomy feed.

mod parse;

pub use parse::parse_feed;
