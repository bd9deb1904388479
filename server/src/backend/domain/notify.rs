//! Notification plumbing.
//!
//! The dashboard surfaces outcomes as toasts; the backend's side of that
//! contract is the [`Notifier`] trait. Handlers call it at the moment an
//! operation settles, and the frontend-facing response DTOs carry the same
//! text. The trait is injected through `AppState` so tests can observe the
//! calls instead of scraping logs.

use log::{error, info, warn};
use shared::{Notification, NotificationKind};

/// Four-severity notice contract consumed by the presentation layer.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, title: &str, description: &str) {
        self.notify(Notification {
            title: title.to_string(),
            description: description.to_string(),
            kind: NotificationKind::Success,
        });
    }

    fn error(&self, title: &str, description: &str) {
        self.notify(Notification {
            title: title.to_string(),
            description: description.to_string(),
            kind: NotificationKind::Error,
        });
    }

    fn warning(&self, title: &str, description: &str) {
        self.notify(Notification {
            title: title.to_string(),
            description: description.to_string(),
            kind: NotificationKind::Warning,
        });
    }

    fn info(&self, title: &str, description: &str) {
        self.notify(Notification {
            title: title.to_string(),
            description: description.to_string(),
            kind: NotificationKind::Info,
        });
    }
}

/// Default notifier: forwards notices to the service log at matching levels.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!("🔔 {}: {}", notification.title, notification.description)
            }
            NotificationKind::Error => {
                error!("🔔 {}: {}", notification.title, notification.description)
            }
            NotificationKind::Warning => {
                warn!("🔔 {}: {}", notification.title, notification.description)
            }
            NotificationKind::Info => {
                info!("🔔 {}: {}", notification.title, notification.description)
            }
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Notifier that records every notice for assertions.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub notices: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.notices.lock().unwrap().push(notification);
        }
    }
}
