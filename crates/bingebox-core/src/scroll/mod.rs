//! Smooth horizontal scrolling for content rows
//!
//! A [`ScrollAnimator`] moves one [`ScrollRegion`] to a target offset with a
//! configurable ease-out curve. Starting a new animation replaces the running
//! one, so a row never has two animations fighting over its offset.
//!
//! # Usage
//!
//! ```ignore
//! use bingebox_core::scroll::{run_frames, ScrollAnimator, ScrollConfig};
//!
//! let mut animator = ScrollAnimator::new(ScrollConfig::default());
//!
//! // Half a viewport to the right, clamped to the row bounds
//! animator.page_right(&mut row);
//!
//! // Drive frames until the row settles
//! run_frames(&mut animator, &mut row).await;
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;
pub mod frames;

pub use animation::{PageDirection, ScrollAnimator, ScrollRegion};
pub use config::ScrollConfig;
pub use easing::EasingType;
pub use frames::run_frames;
