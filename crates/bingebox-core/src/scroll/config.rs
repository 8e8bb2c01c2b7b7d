//! Derived values for [`ScrollConfig`]

use std::time::Duration;

pub use crate::config::ScrollConfig;

impl ScrollConfig {
    /// Duration of a paging animation
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Interval between frames of the frame driver
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            // Never zero, even above 1000fps
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }

    /// Check if smooth scrolling is effectively enabled
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}
