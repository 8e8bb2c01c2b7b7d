//! Frame driver for scroll animations

use tokio::time::{self, MissedTickBehavior};

use super::animation::{ScrollAnimator, ScrollRegion};
use super::timing::now;

/// Tick `animator` on the configured frame interval until it settles.
///
/// Returns the number of frames rendered.
pub async fn run_frames<R: ScrollRegion + ?Sized>(
    animator: &mut ScrollAnimator,
    region: &mut R,
) -> usize {
    let mut interval = time::interval(animator.config().frame_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frames = 0;
    loop {
        interval.tick().await;
        frames += 1;
        if !animator.tick_at(&mut *region, now()) {
            break;
        }
    }

    tracing::trace!(frames, "Scroll animation settled");
    frames
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::animation::testing::TestRow;
    use super::super::config::ScrollConfig;
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_runs_until_target() {
        let mut animator = ScrollAnimator::default();
        let mut row = TestRow::new(800.0, 5000.0);

        animator.page_right(&mut row);
        let frames = run_frames(&mut animator, &mut row).await;

        assert_eq!(row.offset, 400.0);
        assert!(!animator.is_animating());
        // 500ms at ~16ms per frame
        assert!(frames > 20 && frames < 40, "frames = {}", frames);
    }

    #[tokio::test(start_paused = true)]
    async fn test_very_high_fps_still_runs() {
        let config = ScrollConfig {
            animation_fps: 2000,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);
        let mut row = TestRow::new(800.0, 5000.0);

        animator.page_right(&mut row);
        let frames = run_frames(&mut animator, &mut row).await;

        assert_eq!(row.offset, 400.0);
        assert!(frames > 100, "frames = {}", frames);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_animator_returns_immediately() {
        let mut animator = ScrollAnimator::default();
        let mut row = TestRow::new(800.0, 5000.0);

        let frames = run_frames(&mut animator, &mut row).await;
        assert_eq!(frames, 1);
        assert!(row.writes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_torn_down_animator_writes_nothing() {
        let mut animator = ScrollAnimator::default();
        let mut row = TestRow::new(800.0, 5000.0);

        animator.animate(&mut row, 400.0, Duration::from_millis(500));
        animator.teardown();

        run_frames(&mut animator, &mut row).await;
        assert!(row.writes.is_empty());
        assert_eq!(row.offset, 0.0);
    }
}
