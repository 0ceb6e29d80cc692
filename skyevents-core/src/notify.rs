//! Notification dispatch for the soonest events.
//!
//! The platform toast lives in the binary; this module only knows the
//! [`NotificationSink`] capability and how to phrase a notification.

use crate::error::SkyResult;
use crate::event::Event;
use crate::merge::soonest;

pub const NOTIFICATION_TITLE: &str = "Sky Event";

/// Human-readable time used in listings and notifications.
pub const DISPLAY_TIME_FORMAT: &str = "%a %b %d, %I:%M %p %Z";

/// Something that can show a title/body notification to the user.
pub trait NotificationSink {
    fn name(&self) -> &'static str;

    /// Deliver one notification. Failures are for the caller to log; they are
    /// never fatal.
    fn notify(&self, title: &str, body: &str) -> SkyResult<()>;
}

/// Sink used where no notification service is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn name(&self) -> &'static str {
        "none"
    }

    fn notify(&self, _title: &str, _body: &str) -> SkyResult<()> {
        Ok(())
    }
}

/// A title/body pair ready to hand to a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn for_event(event: &Event) -> Self {
        Notification {
            title: NOTIFICATION_TITLE.to_string(),
            body: format!(
                "{}: {} at {}",
                event.kind,
                event.name,
                event.start.format(DISPLAY_TIME_FORMAT)
            ),
        }
    }
}

/// Result of sending one notification.
#[derive(Debug)]
pub struct Dispatched {
    pub notification: Notification,
    pub delivered: SkyResult<()>,
}

/// Notify for the `count` soonest events of a merged list.
pub fn dispatch(events: &[Event], count: usize, sink: &dyn NotificationSink) -> Vec<Dispatched> {
    soonest(events, count)
        .iter()
        .map(|event| {
            let notification = Notification::for_event(event);
            let delivered = sink.notify(&notification.title, &notification.body);
            if let Err(e) = &delivered {
                tracing::warn!(sink = sink.name(), error = %e, "could not deliver notification");
            }
            Dispatched {
                notification,
                delivered,
            }
        })
        .collect()
}
