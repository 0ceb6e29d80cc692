//! Platform toast notifications via notify-rust.

use notify_rust::Notification;
use skyevents_core::SkyError;
use skyevents_core::SkyResult;
use skyevents_core::notify::{NoopSink, NotificationSink};

const APP_NAME: &str = "SkyEvents";

pub struct DesktopSink;

impl NotificationSink for DesktopSink {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn notify(&self, title: &str, body: &str) -> SkyResult<()> {
        Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| SkyError::Notify(e.to_string()))
    }
}

/// Desktop toasts where the platform has a notification service, otherwise a
/// sink that drops everything.
pub fn platform_sink() -> Box<dyn NotificationSink> {
    if desktop_available() {
        Box::new(DesktopSink)
    } else {
        tracing::info!("no desktop notification service, notifications disabled");
        Box::new(NoopSink)
    }
}

/// Freedesktop notifications go over the D-Bus session bus.
fn desktop_available() -> bool {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }
    std::env::var_os("DBUS_SESSION_BUS_ADDRESS").is_some_and(|v| !v.is_empty())
}
