use std::time::{Duration, Instant};

pub const SAVED_MESSAGE: &str = "Draft saved successfully!";
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Transient confirmation shown after a save, cleared once `expires_at` passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveNotice {
    pub message: String,
    pub expires_at: Instant,
}

impl SaveNotice {
    pub fn saved(now: Instant, display_for: Duration) -> Self {
        Self {
            message: SAVED_MESSAGE.to_string(),
            expires_at: now + display_for,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}
