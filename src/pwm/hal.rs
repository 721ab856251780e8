//! embedded-hal adapter
//!
//! Wraps one engine channel as an [`embedded_hal::pwm::SetDutyCycle`]
//! implementor so ecosystem drivers (servo crates, fan controllers, ...)
//! can drive it without knowing about the channel table. Full scale for
//! the HAL trait is the Q15 full scale, `0x8000`.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::pwm::config::DUTY_FULL_SCALE;
use crate::pwm::engine::PwmEngine;

/// One engine channel, viewed through `embedded_hal::pwm`.
pub struct PwmChannel<'e, 'a> {
    engine: &'e PwmEngine<'a>,
    index: usize,
}

impl<'a> PwmEngine<'a> {
    /// Borrow a channel as an `embedded_hal::pwm::SetDutyCycle` handle.
    ///
    /// Returns `None` while the driver is uninitialized or when `index`
    /// is outside the configured table.
    pub fn channel(&self, index: usize) -> Option<PwmChannel<'_, 'a>> {
        if self.is_initialized() && index < self.channel_count() {
            Some(PwmChannel {
                engine: self,
                index,
            })
        } else {
            None
        }
    }
}

impl ErrorType for PwmChannel<'_, '_> {
    type Error = Infallible;
}

impl SetDutyCycle for PwmChannel<'_, '_> {
    fn max_duty_cycle(&self) -> u16 {
        DUTY_FULL_SCALE
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.engine.set_duty_cycle(self.index, duty);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::pwm::SetDutyCycle;

    use crate::platform::mock::{MockInterruptRouter, MockTimer};
    use crate::platform::traits::{OutputState, SubChannel, TimerId, TimerPeripheral};
    use crate::pwm::config::{ChannelClass, ChannelConfig, PwmConfig, DUTY_FULL_SCALE};
    use crate::pwm::engine::PwmEngine;

    #[test]
    fn test_hal_channel_drives_the_compare_register() {
        let tim = MockTimer::new(TimerId(2));
        let router = MockInterruptRouter::new();
        let channels = [ChannelConfig {
            timer: &tim,
            sub: SubChannel::Sub1,
            class: ChannelClass::VariablePeriod,
            default_period: 999,
            default_compare: 0,
            polarity: OutputState::High,
            idle_state: OutputState::Low,
            notification: false,
            callback: None,
        }];
        let mut engine = PwmEngine::new(&router);
        engine.init(&PwmConfig { channels: &channels });

        let mut ch = engine.channel(0).unwrap();
        assert_eq!(ch.max_duty_cycle(), DUTY_FULL_SCALE);

        ch.set_duty_cycle(DUTY_FULL_SCALE / 2).unwrap();
        assert_eq!(tim.compare(SubChannel::Sub1), 499);

        ch.set_duty_cycle_fully_on().unwrap();
        assert_eq!(tim.compare(SubChannel::Sub1), 999);
    }

    #[test]
    fn test_hal_channel_requires_initialized_driver() {
        let router = MockInterruptRouter::new();
        let engine = PwmEngine::new(&router);
        assert!(engine.channel(0).is_none());
    }
}
