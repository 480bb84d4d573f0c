//! `embedded-hal` backed collaborators for real boards.
//!
//! Pin failures never reach the trial logic: a failed read counts as
//! released and a failed write is logged and skipped.

use embedded_hal::digital::{InputPin, OutputPin};
use tracing::warn;

use crate::hardware::{Button, LedBar};

/// Push button wired active-low against a pull-up.
pub struct GpioButton<P> {
    pin: P,
}

impl<P: InputPin> GpioButton<P> {
    /// The pin must already be configured as a pulled-up input.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Button for GpioButton<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}

/// One push-pull output per LED; index 0 is the first pin given.
pub struct GpioLedBar<P> {
    pins: Vec<P>,
}

impl<P: OutputPin> GpioLedBar<P> {
    pub fn new(pins: Vec<P>) -> Self {
        Self { pins }
    }

    pub fn release(self) -> Vec<P> {
        self.pins
    }
}

impl<P: OutputPin> LedBar for GpioLedBar<P> {
    fn len(&self) -> usize {
        self.pins.len()
    }

    fn set(&mut self, index: usize, on: bool) {
        let Some(pin) = self.pins.get_mut(index) else {
            return;
        };
        let result = if on { pin.set_high() } else { pin.set_low() };
        if let Err(error) = result {
            warn!(index, ?error, "LED write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn button_is_active_low() {
        let pin = PinMock::new(&[
            Transaction::get(State::High),
            Transaction::get(State::Low),
        ]);
        let mut button = GpioButton::new(pin);
        assert!(!button.is_pressed());
        assert!(button.is_pressed());
        button.release().done();
    }

    #[test]
    fn led_bar_drives_each_pin() {
        let pins = vec![
            PinMock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]),
            PinMock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]),
            PinMock::new(&[Transaction::set(State::Low), Transaction::set(State::Low)]),
        ];
        let mut bar = GpioLedBar::new(pins);
        bar.set_count(2);
        bar.set_all(false);
        bar.set(5, true);
        for mut pin in bar.release() {
            pin.done();
        }
    }
}
