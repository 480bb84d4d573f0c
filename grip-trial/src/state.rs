use grip_core::{LedBar, SessionOutcome, SessionResult, TrialSession, TrialState, map_force_to_leds};
use grip_timing::Timer;
use rand::Rng;
use tracing::{debug, info};

use crate::animation::{Animation, AnimationPlayer};
use crate::config::GripConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialEvent {
    CountdownStarted { trial: u8 },
    MeasuringStarted { trial: u8 },
    TrialFinished { trial: u8, peak: u32 },
    SessionFinished(SessionResult),
}

impl TrialEvent {
    /// True for events whose poll ran a blocking animation or cooldown.
    pub fn blocks(&self) -> bool {
        !matches!(self, TrialEvent::MeasuringStarted { .. })
    }
}

/// Two-trial grip test state machine.
///
/// Owns the LED bar for the whole run; animations borrow it while they
/// block. State only changes on a press edge or when an animation returns.
pub struct TrialController<L, T, R>
where
    L: LedBar,
    T: Timer,
    R: Rng,
{
    state: TrialState,
    session: TrialSession,
    config: GripConfig,
    leds: L,
    timer: T,
    player: AnimationPlayer<R>,
    history: Vec<SessionResult>,
}

impl<L, T, R> TrialController<L, T, R>
where
    L: LedBar,
    T: Timer,
    R: Rng,
{
    pub fn new(config: GripConfig, leds: L, timer: T, rng: R) -> Self {
        let player = AnimationPlayer::new(&config, rng);
        Self {
            state: TrialState::Idle,
            session: TrialSession::new(),
            config,
            leds,
            timer,
            player,
            history: Vec::new(),
        }
    }

    /// Feeds one poll's worth of input.
    ///
    /// `reading` is only consulted while measuring; `None` keeps the current
    /// peak and display.
    pub fn on_tick(&mut self, edge: bool, reading: Option<u32>) -> Vec<TrialEvent> {
        let mut events = Vec::new();

        match self.state {
            TrialState::Idle if edge => self.start_trial(&mut events),
            TrialState::Idle => {}
            TrialState::Measuring if edge => self.finish_trial(&mut events),
            TrialState::Measuring => {
                if let Some(reading) = reading {
                    self.measure(reading);
                }
            }
            // Only held inside start_trial while the countdown blocks.
            TrialState::Countdown => {}
        }

        events
    }

    fn start_trial(&mut self, events: &mut Vec<TrialEvent>) {
        let trial = self.session.trial_index();

        if self.session.is_fresh() || self.config.replay_countdown {
            self.state = TrialState::Countdown;
            events.push(TrialEvent::CountdownStarted { trial });
            self.player
                .play(Animation::Countdown, &mut self.leds, &self.timer);
        } else {
            self.leds.set_all(false);
        }

        self.session.begin_trial();
        self.state = TrialState::Measuring;
        events.push(TrialEvent::MeasuringStarted { trial });
        info!(trial, "measuring");
    }

    fn measure(&mut self, reading: u32) {
        self.session.observe(reading, self.config.max_raw);
        let lit = self.lit_for(reading);
        self.leds.set_count(lit);
        debug!(reading, peak = self.session.peak_force(), lit, "sample");
    }

    fn finish_trial(&mut self, events: &mut Vec<TrialEvent>) {
        let trial = self.session.trial_index();
        let peak = self.session.peak_force();
        let lit = self.lit_for(peak);
        self.leds.set_count(lit);
        events.push(TrialEvent::TrialFinished { trial, peak });
        info!(trial, peak, lit, "trial finished");

        if let Some(result) = self.session.finish_trial() {
            info!(
                trial1_peak = result.trial1_peak,
                trial2_peak = result.trial2_peak,
                outcome = ?result.outcome,
                "session finished"
            );
            let animation = match result.outcome {
                SessionOutcome::Improved => Animation::Celebration,
                SessionOutcome::NotImproved => Animation::Failure,
            };
            self.player.play(animation, &mut self.leds, &self.timer);
            self.history.push(result);
            events.push(TrialEvent::SessionFinished(result));
        }

        self.state = TrialState::Idle;
        self.timer.sleep(self.config.cooldown());
    }

    fn lit_for(&self, raw: u32) -> usize {
        map_force_to_leds(
            i64::from(raw),
            i64::from(self.config.max_raw),
            self.leds.len(),
        )
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn session(&self) -> &TrialSession {
        &self.session
    }

    pub fn config(&self) -> &GripConfig {
        &self.config
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn leds_mut(&mut self) -> &mut L {
        &mut self.leds
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Finished sessions since power-up, oldest first.
    pub fn history(&self) -> &[SessionResult] {
        &self.history
    }
}
