use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default session window: 7 days, refreshed on activity.
pub const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Logged-in identity, persisted between invocations.
///
/// The window is rolling: every authenticated command refreshes
/// `last_activity`, and the session stays live while
/// `now < last_activity + ttl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub version: u32,
    pub faculty_id: String,
    pub name: String,
    pub logged_in_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(faculty_id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            version: 1,
            faculty_id,
            name,
            logged_in_at: now,
            last_activity: now,
        }
    }

    /// Whether the session is still inside its rolling window.
    pub fn is_live(&self, ttl: Duration) -> bool {
        Utc::now() < self.last_activity + ttl
    }

    /// Refresh the rolling window.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Format the time left in the window in human-friendly form,
    /// "{N}d left" / "{N}h left" style, or "expired".
    pub fn format_remaining(&self, ttl: Duration) -> String {
        let expires_at = self.last_activity + ttl;
        let now = Utc::now();
        if expires_at <= now {
            return "expired".to_string();
        }
        let remaining = expires_at - now;
        let days = remaining.num_days();
        let hours = remaining.num_hours();
        if days >= 1 {
            format!("{}d left", days)
        } else if hours >= 1 {
            format!("{}h left", hours)
        } else {
            let minutes = remaining.num_minutes();
            if minutes >= 1 {
                format!("{}m left", minutes)
            } else {
                "<1m left".to_string()
            }
        }
    }
}

/// Reconcile the two storage locations, last-write-wins by presence:
/// the primary wins whenever it exists, otherwise the mirror is promoted.
/// Returns the surviving session and whether it came from the mirror
/// (in which case the caller should write it back to the primary).
pub fn reconcile(primary: Option<Session>, mirror: Option<Session>) -> Option<(Session, bool)> {
    match (primary, mirror) {
        (Some(session), _) => Some((session, false)),
        (None, Some(session)) => Some((session, true)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_activity(last_activity: DateTime<Utc>) -> Session {
        Session {
            version: 1,
            faculty_id: "F001".to_string(),
            name: "Dr. Rao".to_string(),
            logged_in_at: last_activity,
            last_activity,
        }
    }

    #[test]
    fn test_fresh_session_is_live() {
        let session = Session::new("F001".to_string(), "Dr. Rao".to_string());
        assert!(session.is_live(Duration::days(7)));
    }

    #[test]
    fn test_stale_session_expires() {
        let session = session_with_activity(Utc::now() - Duration::days(8));
        assert!(!session.is_live(Duration::days(7)));
    }

    #[test]
    fn test_touch_extends_window() {
        let mut session = session_with_activity(Utc::now() - Duration::days(8));
        assert!(!session.is_live(Duration::days(7)));
        session.touch();
        assert!(session.is_live(Duration::days(7)));
        // Login time is not rewritten by activity
        assert!(session.logged_in_at < session.last_activity);
    }

    #[test]
    fn test_reconcile_prefers_primary() {
        let primary = session_with_activity(Utc::now());
        let mut mirror = session_with_activity(Utc::now());
        mirror.faculty_id = "F999".to_string();

        let (session, restored) = reconcile(Some(primary), Some(mirror)).unwrap();
        assert_eq!(session.faculty_id, "F001");
        assert!(!restored);
    }

    #[test]
    fn test_reconcile_promotes_mirror_when_primary_missing() {
        let mirror = session_with_activity(Utc::now());
        let (session, restored) = reconcile(None, Some(mirror)).unwrap();
        assert_eq!(session.faculty_id, "F001");
        assert!(restored);
    }

    #[test]
    fn test_reconcile_both_missing() {
        assert!(reconcile(None, None).is_none());
    }

    #[test]
    fn test_format_remaining_days() {
        let session = session_with_activity(Utc::now());
        let result = session.format_remaining(Duration::days(7));
        assert!(result.ends_with("d left"), "got: {}", result);
    }

    #[test]
    fn test_format_remaining_expired() {
        let session = session_with_activity(Utc::now() - Duration::days(8));
        assert_eq!(session.format_remaining(Duration::days(7)), "expired");
    }
}
