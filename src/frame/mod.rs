//! Per-frame camera orbit driver.
//!
//! The host supplies a monotonically increasing timestamp once per frame;
//! [`FrameDriver`] turns the elapsed time into camera yaw and hands that yaw
//! to the render call. Instance data is never touched here.

mod driver;

pub use driver::{FrameDriver, FrameState};
