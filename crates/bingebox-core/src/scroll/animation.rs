//! Scroll animation controller
//!
//! Combines easing functions and timing utilities to move one scrollable
//! region to a target offset over a fixed duration.

use std::time::{Duration, Instant};

use super::config::ScrollConfig;
use super::easing::EasingType;
use super::timing::{lerp, now, progress_at};
use crate::lifecycle::Liveness;

/// A scrollable viewport driven by the animator
///
/// Offsets are distances along the scroll axis. Implementations may clamp
/// in `set_offset` the way a browser clamps `scrollLeft`.
pub trait ScrollRegion {
    fn offset(&self) -> f64;

    fn set_offset(&mut self, offset: f64);

    /// Visible extent along the scroll axis
    fn viewport_extent(&self) -> f64;

    /// Largest reachable offset
    fn max_offset(&self) -> f64 {
        f64::INFINITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Left,
    Right,
}

/// In-flight animation state
#[derive(Debug, Clone)]
struct AnimationSession {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller, one per region
///
/// Call [`animate`](Self::animate) to begin an animation, then
/// [`tick`](Self::tick) once per display frame until it returns `false`.
/// A new `animate` replaces the running session, starting from wherever the
/// region currently is, so the old session can never write again.
#[derive(Debug)]
pub struct ScrollAnimator {
    session: Option<AnimationSession>,
    config: ScrollConfig,
    liveness: Liveness,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            session: None,
            config,
            liveness: Liveness::new(),
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// Final offset of the running session
    pub fn target_offset(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.to)
    }

    pub fn is_live(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Start animating `region` towards `target`
    pub fn animate<R: ScrollRegion + ?Sized>(
        &mut self,
        region: &mut R,
        target: f64,
        duration: Duration,
    ) {
        self.animate_at(region, target, duration, now());
    }

    /// [`animate`](Self::animate) with an explicit start time
    ///
    /// Jumps straight to `target` when smooth scrolling is off (disabled or
    /// configured with a zero duration) or `duration` is zero.
    pub fn animate_at<R: ScrollRegion + ?Sized>(
        &mut self,
        region: &mut R,
        target: f64,
        duration: Duration,
        start: Instant,
    ) {
        if !self.is_live() {
            return;
        }

        let from = region.offset();

        if !self.config.is_smooth() || duration.is_zero() {
            self.session = None;
            region.set_offset(target);
            return;
        }

        if from == target {
            self.session = None;
            return;
        }

        if self.session.is_some() {
            tracing::debug!(from, target, "Redirecting scroll animation");
        }

        self.session = Some(AnimationSession {
            start,
            from,
            to: target,
            duration,
            easing: self.config.easing,
        });
    }

    /// Offset one page step away from the current one, within bounds
    pub fn page_target<R: ScrollRegion + ?Sized>(
        &self,
        region: &R,
        direction: PageDirection,
    ) -> f64 {
        let step = region.viewport_extent() * self.config.page_fraction;
        let target = match direction {
            PageDirection::Left => region.offset() - step,
            PageDirection::Right => region.offset() + step,
        };
        target.min(region.max_offset()).max(0.0)
    }

    pub fn page<R: ScrollRegion + ?Sized>(&mut self, region: &mut R, direction: PageDirection) {
        let target = self.page_target(&*region, direction);
        let duration = self.config.animation_duration();
        self.animate(region, target, duration);
    }

    pub fn page_left<R: ScrollRegion + ?Sized>(&mut self, region: &mut R) {
        self.page(region, PageDirection::Left);
    }

    pub fn page_right<R: ScrollRegion + ?Sized>(&mut self, region: &mut R) {
        self.page(region, PageDirection::Right);
    }

    /// Advance one frame. Returns whether another frame is needed.
    pub fn tick<R: ScrollRegion + ?Sized>(&mut self, region: &mut R) -> bool {
        self.tick_at(region, now())
    }

    /// [`tick`](Self::tick) at an explicit frame time
    pub fn tick_at<R: ScrollRegion + ?Sized>(&mut self, region: &mut R, at: Instant) -> bool {
        if !self.is_live() {
            self.session = None;
            return false;
        }

        let Some(session) = self.session.as_ref() else {
            return false;
        };

        let t = progress_at(session.start, session.duration, at);
        if t >= 1.0 {
            region.set_offset(session.to);
            self.session = None;
            return false;
        }

        let eased = session.easing.apply(t);
        region.set_offset(lerp(session.from, session.to, eased));
        true
    }

    /// Owner is going away: pending frames become no-ops
    pub fn teardown(&mut self) {
        self.liveness.invalidate();
        self.session = None;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ScrollRegion;

    /// Horizontally scrolling row of fixed width
    #[derive(Debug, Clone)]
    pub struct TestRow {
        pub offset: f64,
        pub width: f64,
        pub max: f64,
        pub writes: Vec<f64>,
    }

    impl TestRow {
        pub fn new(width: f64, max: f64) -> Self {
            Self {
                offset: 0.0,
                width,
                max,
                writes: Vec::new(),
            }
        }
    }

    impl ScrollRegion for TestRow {
        fn offset(&self) -> f64 {
            self.offset
        }

        fn set_offset(&mut self, offset: f64) {
            self.offset = offset;
            self.writes.push(offset);
        }

        fn viewport_extent(&self) -> f64 {
            self.width
        }

        fn max_offset(&self) -> f64 {
            self.max
        }
    }
}
