//! Mock capability implementations for testing
//!
//! This module provides register-accurate fakes of the capability traits
//! so the engine can be exercised without hardware.
//!
//! # Feature Gate
//!
//! Available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod irq;
mod timer;

pub use irq::MockInterruptRouter;
pub use timer::MockTimer;
