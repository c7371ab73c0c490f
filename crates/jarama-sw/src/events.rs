//! Background sync, push, and notification-click hooks.
//!
//! These are thin counterparts of the app's extra worker events: the host
//! platform owns display and scheduling, this module only maps payloads to
//! values.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The only sync tag the worker recognizes.
pub const SYNC_DOWNLOADS_TAG: &str = "sync-downloads";

/// Default notification body when a push carries no payload.
const DEFAULT_PUSH_BODY: &str = "New update available!";

/// A push message delivered to the worker.
#[derive(Debug, Clone, Default)]
pub struct PushEvent {
    /// Text payload, if the push carried one.
    pub payload: Option<String>,
}

/// One action button on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    pub icon: String,
}

/// A notification for the host to display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// Build the app notification for a push event.
    pub fn for_push(event: &PushEvent) -> Self {
        Self {
            title: "Jarama Music".to_string(),
            body: event
                .payload
                .clone()
                .unwrap_or_else(|| DEFAULT_PUSH_BODY.to_string()),
            icon: "/static/icons/icon-192x192.png".to_string(),
            badge: "/static/icons/icon-72x72.png".to_string(),
            actions: vec![
                NotificationAction {
                    action: "explore".to_string(),
                    title: "Open App".to_string(),
                    icon: "/static/icons/icon-72x72.png".to_string(),
                },
                NotificationAction {
                    action: "close".to_string(),
                    title: "Close".to_string(),
                    icon: "/static/icons/icon-72x72.png".to_string(),
                },
            ],
        }
    }
}

/// Outcome of a notification click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Open (or focus) the app root.
    OpenApp,
    /// Just dismiss the notification.
    Dismiss,
}

/// Map a clicked notification action to an outcome.
pub fn notification_click_outcome(action: &str) -> ClickOutcome {
    match action {
        "explore" => ClickOutcome::OpenApp,
        _ => ClickOutcome::Dismiss,
    }
}

/// Acknowledge a background sync event. Returns whether the tag was
/// recognized; unknown tags are ignored.
pub fn handle_sync(tag: &str) -> bool {
    if tag == SYNC_DOWNLOADS_TAG {
        info!(tag, "Syncing downloads");
        true
    } else {
        debug!(tag, "Ignoring unknown sync tag");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_with_payload() {
        let event = PushEvent {
            payload: Some("3 new tracks downloaded".to_string()),
        };
        let notification = Notification::for_push(&event);

        assert_eq!(notification.title, "Jarama Music");
        assert_eq!(notification.body, "3 new tracks downloaded");
        assert_eq!(notification.actions.len(), 2);
    }

    #[test]
    fn test_push_without_payload_uses_default() {
        let notification = Notification::for_push(&PushEvent::default());
        assert_eq!(notification.body, DEFAULT_PUSH_BODY);
    }

    #[test]
    fn test_click_outcomes() {
        assert_eq!(notification_click_outcome("explore"), ClickOutcome::OpenApp);
        assert_eq!(notification_click_outcome("close"), ClickOutcome::Dismiss);
        assert_eq!(notification_click_outcome("other"), ClickOutcome::Dismiss);
    }

    #[test]
    fn test_sync_tags() {
        assert!(handle_sync(SYNC_DOWNLOADS_TAG));
        assert!(!handle_sync("sync-playlists"));
    }
}
