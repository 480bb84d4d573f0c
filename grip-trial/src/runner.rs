use std::time::Duration;

use grip_core::{Button, ForceSensor, LedBar, TrialState};
use grip_timing::Timer;
use rand::Rng;

use crate::input::EdgeDetector;
use crate::state::{TrialController, TrialEvent};

/// Fixed-rate polling loop driving a [`TrialController`].
pub struct PollLoop<B, S, L, T, R>
where
    B: Button,
    S: ForceSensor,
    L: LedBar,
    T: Timer,
    R: Rng,
{
    button: B,
    sensor: S,
    edges: EdgeDetector,
    controller: TrialController<L, T, R>,
    timer: T,
    tick_interval: Duration,
}

impl<B, S, L, T, R> PollLoop<B, S, L, T, R>
where
    B: Button,
    S: ForceSensor,
    L: LedBar,
    T: Timer,
    R: Rng,
{
    pub fn new(button: B, sensor: S, controller: TrialController<L, T, R>) -> Self {
        let timer = controller.timer().clone();
        let tick_interval = controller.config().tick_interval();
        Self {
            button,
            sensor,
            edges: EdgeDetector::new(),
            controller,
            timer,
            tick_interval,
        }
    }

    /// One poll: sample, dispatch, then sleep out the rest of the tick.
    pub fn tick(&mut self) -> Vec<TrialEvent> {
        let started = self.timer.now();

        let edge = self.edges.update(self.button.is_pressed());
        // An end press freezes the display, so that poll takes no sample.
        let reading = match self.controller.state() {
            TrialState::Measuring if !edge => self.sensor.read_raw(),
            _ => None,
        };
        let mut events = self.controller.on_tick(edge, reading);

        // The countdown poll starts sampling as soon as measuring begins.
        let started_measuring = events
            .iter()
            .any(|e| matches!(e, TrialEvent::MeasuringStarted { .. }));
        if started_measuring && self.controller.state() == TrialState::Measuring {
            let reading = self.sensor.read_raw();
            events.extend(self.controller.on_tick(false, reading));
        }

        let remaining = self.tick_interval.saturating_sub(self.timer.elapsed(started));
        if !remaining.is_zero() {
            self.timer.sleep(remaining);
        }
        // Animation and cooldown polls would swamp the loop statistics.
        if !events.iter().any(TrialEvent::blocks) {
            let period = self.timer.elapsed(started);
            self.timer.record_tick(period);
        }

        events
    }

    /// Polls until `max_ticks` have run, or forever when `None`. Returns the
    /// number of ticks run.
    pub fn run<F>(&mut self, max_ticks: Option<u64>, mut on_event: F) -> u64
    where
        F: FnMut(&TrialEvent),
    {
        let mut ticks = 0;
        while max_ticks.is_none_or(|max| ticks < max) {
            for event in self.tick() {
                on_event(&event);
            }
            ticks += 1;
        }
        ticks
    }

    pub fn controller(&self) -> &TrialController<L, T, R> {
        &self.controller
    }

    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Loop timer; carries the recorded tick statistics.
    pub fn timer(&self) -> &T {
        &self.timer
    }
}
