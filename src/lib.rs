#![cfg_attr(not(test), no_std)]

//! pwm-bank - Table-driven PWM channel driver
//!
//! This library turns a declarative channel configuration table into live
//! hardware timer state. All hardware access goes through two capability
//! traits ([`TimerPeripheral`](platform::traits::TimerPeripheral) and
//! [`InterruptRouter`](platform::traits::InterruptRouter)), so the driver
//! logic is testable against the in-crate mocks and portable across timer
//! hardware.
//!
//! Pin routing is out of scope: the physical pin must already be connected
//! to the timer channel (alternate-function setup) before
//! [`PwmEngine::init`](pwm::engine::PwmEngine::init) runs.
//!
//! ## Usage
//!
//! ```ignore
//! use pwm_bank::platform::traits::{OutputState, SubChannel};
//! use pwm_bank::pwm::config::{ChannelClass, ChannelConfig, PwmConfig};
//! use pwm_bank::pwm::engine::PwmEngine;
//!
//! let channels = [ChannelConfig {
//!     timer: &tim2,
//!     sub: SubChannel::Sub1,
//!     class: ChannelClass::VariablePeriod,
//!     default_period: 999,
//!     default_compare: 0,
//!     polarity: OutputState::High,
//!     idle_state: OutputState::Low,
//!     notification: false,
//!     callback: None,
//! }];
//!
//! let mut engine = PwmEngine::new(&router);
//! engine.init(&PwmConfig { channels: &channels });
//! engine.set_duty_cycle(0, 0x4000); // 50%
//! ```

// Logging macros (defmt on target, println in host tests)
pub mod logging;

// Hardware capability layer (traits + mock implementations)
pub mod platform;

// PWM channel control engine
pub mod pwm;

// Re-export the types most callers need
pub use platform::traits::{
    InterruptRouter, OutputState, SubChannel, TimerEvent, TimerId, TimerPeripheral,
};
pub use pwm::config::{ChannelClass, ChannelConfig, EdgeMask, PwmConfig};
pub use pwm::engine::PwmEngine;
