//! Core of skyevents: the normalized sky [`Event`] model and the pipeline
//! that builds it.
//!
//! - `astronomy` fetches the yearly iCal feed, `classify` filters it
//! - `satellite` looks up visible ISS passes
//! - `merge` combines both into one chronological list
//! - `notify` phrases and dispatches notifications for the soonest events

pub mod astronomy;
pub mod classify;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod http;
pub mod ics;
pub mod merge;
pub mod notify;
pub mod satellite;

pub use error::{SkyError, SkyResult};
pub use event::*;
