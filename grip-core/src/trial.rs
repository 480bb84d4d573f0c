use serde::{Deserialize, Serialize};

/// Number of trials compared in one session.
pub const TRIALS_PER_SESSION: u8 = 2;

/// Controller state. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrialState {
    /// Waiting for a press to start the next trial.
    #[default]
    Idle,
    /// Playing the blocking "GO" countdown; never polled.
    Countdown,
    /// Sampling the sensor and tracking the running peak.
    Measuring,
}

/// Win/lose verdict of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Second trial beat the first.
    Improved,
    /// Second trial matched or fell short of the first.
    NotImproved,
}

impl SessionOutcome {
    /// Ties count as a loss.
    pub fn compare(trial1_peak: u32, trial2_peak: u32) -> Self {
        if trial2_peak > trial1_peak {
            SessionOutcome::Improved
        } else {
            SessionOutcome::NotImproved
        }
    }
}

/// Recorded result per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub trial1_peak: u32,
    pub trial2_peak: u32,
    pub outcome: SessionOutcome,
}

/// Running data for a two-trial session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSession {
    trial_index: u8,
    peak_force: u32,
    trial1_peak: u32,
    trial2_peak: u32,
}

impl Default for TrialSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialSession {
    pub fn new() -> Self {
        Self {
            trial_index: 1,
            peak_force: 0,
            trial1_peak: 0,
            trial2_peak: 0,
        }
    }

    /// 1-based index of the current (or next) trial.
    pub fn trial_index(&self) -> u8 {
        self.trial_index
    }

    pub fn peak_force(&self) -> u32 {
        self.peak_force
    }

    pub fn trial1_peak(&self) -> u32 {
        self.trial1_peak
    }

    pub fn trial2_peak(&self) -> u32 {
        self.trial2_peak
    }

    /// True before the first trial of a session has been recorded.
    pub fn is_fresh(&self) -> bool {
        self.trial_index == 1
    }

    /// Resets the running peak for a new trial.
    pub fn begin_trial(&mut self) {
        self.peak_force = 0;
    }

    /// Folds a reading into the running peak, clamped to `max_raw`.
    pub fn observe(&mut self, reading: u32, max_raw: u32) {
        self.peak_force = self.peak_force.max(reading.min(max_raw));
    }

    /// Closes the current trial. Returns the session result once the last
    /// trial is recorded, after which the session is back to a fresh state.
    pub fn finish_trial(&mut self) -> Option<SessionResult> {
        if self.trial_index < TRIALS_PER_SESSION {
            self.trial1_peak = self.peak_force;
            self.trial_index += 1;
            return None;
        }

        self.trial2_peak = self.peak_force;
        let result = SessionResult {
            trial1_peak: self.trial1_peak,
            trial2_peak: self.trial2_peak,
            outcome: SessionOutcome::compare(self.trial1_peak, self.trial2_peak),
        };
        *self = Self::new();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_tracks_running_maximum() {
        let mut session = TrialSession::new();
        session.begin_trial();
        for reading in [1000, 40000, 20000] {
            session.observe(reading, 65535);
        }
        assert_eq!(session.peak_force(), 40000);
    }

    #[test]
    fn peak_is_clamped_to_max_raw() {
        let mut session = TrialSession::new();
        session.observe(90_000, 65535);
        assert_eq!(session.peak_force(), 65535);
    }

    #[test]
    fn second_trial_produces_result_and_resets() {
        let mut session = TrialSession::new();
        session.observe(10_000, 65535);
        assert_eq!(session.finish_trial(), None);
        assert_eq!(session.trial_index(), 2);
        assert_eq!(session.trial1_peak(), 10_000);

        session.begin_trial();
        session.observe(50_000, 65535);
        let result = session.finish_trial().unwrap();
        assert_eq!(result.trial1_peak, 10_000);
        assert_eq!(result.trial2_peak, 50_000);
        assert_eq!(result.outcome, SessionOutcome::Improved);
        assert_eq!(session, TrialSession::new());
    }

    #[test]
    fn tie_is_not_an_improvement() {
        assert_eq!(SessionOutcome::compare(300, 300), SessionOutcome::NotImproved);
        assert_eq!(SessionOutcome::compare(300, 301), SessionOutcome::Improved);
    }
}
