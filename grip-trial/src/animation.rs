use std::time::Duration;

use grip_core::LedBar;
use grip_timing::Timer;
use rand::Rng;
use tracing::debug;

use crate::config::{CelebrationConfig, CountdownConfig, FailureConfig, GripConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    /// "GO" signal before a trial.
    Countdown,
    /// Confetti after the second trial beats the first.
    Celebration,
    Failure,
}

/// Plays fixed LED sequences to completion. Nothing is polled while a
/// sequence runs, so input arriving mid-animation is lost.
pub struct AnimationPlayer<R: Rng> {
    countdown: CountdownConfig,
    celebration: CelebrationConfig,
    failure: FailureConfig,
    rng: R,
}

impl<R: Rng> AnimationPlayer<R> {
    pub fn new(config: &GripConfig, rng: R) -> Self {
        Self {
            countdown: config.countdown.clone(),
            celebration: config.celebration.clone(),
            failure: config.failure.clone(),
            rng,
        }
    }

    pub fn play<L, T>(&mut self, animation: Animation, leds: &mut L, timer: &T)
    where
        L: LedBar,
        T: Timer,
    {
        debug!(?animation, "animation start");
        match animation {
            Animation::Countdown => self.countdown(leds, timer),
            Animation::Celebration => self.celebration(leds, timer),
            Animation::Failure => self.failure(leds, timer),
        }
    }

    fn countdown<L: LedBar, T: Timer>(&self, leds: &mut L, timer: &T) {
        let hold = Duration::from_millis(self.countdown.hold_ms);
        let gap = Duration::from_millis(self.countdown.gap_ms);
        for pattern in &self.countdown.patterns {
            leds.set_pattern(pattern);
            timer.sleep(hold);
            leds.set_all(false);
            timer.sleep(gap);
        }
    }

    fn celebration<L: LedBar, T: Timer>(&mut self, leds: &mut L, timer: &T) {
        let duration = Duration::from_millis(self.celebration.duration_ms);
        let flash = Duration::from_millis(self.celebration.flash_interval_ms.max(1));
        let start = timer.now();
        while timer.elapsed(start) < duration {
            for i in 0..leds.len() {
                leds.set(i, self.rng.random_bool(0.5));
            }
            timer.sleep(flash);
        }
        leds.set_all(false);
    }

    fn failure<L: LedBar, T: Timer>(&self, leds: &mut L, timer: &T) {
        let blink = Duration::from_millis(self.failure.blink_interval_ms);
        for _ in 0..self.failure.blinks {
            leds.set_all(false);
            timer.sleep(blink);
            leds.set_all(true);
            timer.sleep(blink);
        }

        timer.sleep(Duration::from_millis(self.failure.pause_ms));

        // Far end goes dark first.
        let step = Duration::from_millis(self.failure.step_interval_ms);
        for i in (0..leds.len()).rev() {
            leds.set(i, false);
            timer.sleep(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grip_core::MemoryLedBar;
    use grip_timing::MockTimer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn player() -> AnimationPlayer<StdRng> {
        AnimationPlayer::new(&GripConfig::default(), StdRng::seed_from_u64(7))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn lit(frame: &[bool]) -> Vec<usize> {
        frame
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
            .collect()
    }

    #[test]
    fn countdown_shows_g_then_o() {
        let mut leds = MemoryLedBar::new(10);
        let timer = MockTimer::new();
        player().play(Animation::Countdown, &mut leds, &timer);

        let frames: Vec<Vec<usize>> = leds.frames().iter().map(|f| lit(f)).collect();
        assert_eq!(
            frames,
            vec![
                vec![2, 4, 5, 7, 8],
                vec![],
                vec![1, 2, 4, 5, 7, 8],
                vec![],
            ]
        );
        assert_eq!(timer.sleeps(), vec![ms(1800), ms(500), ms(1800), ms(500)]);
    }

    #[test]
    fn celebration_runs_for_configured_duration_then_clears() {
        let mut leds = MemoryLedBar::new(10);
        let timer = MockTimer::new();
        player().play(Animation::Celebration, &mut leds, &timer);

        let sleeps = timer.sleeps();
        assert_eq!(sleeps.len(), 100);
        assert!(sleeps.iter().all(|d| *d == ms(100)));
        assert_eq!(timer.total_slept(), ms(10_000));
        // one frame per LED per flash, plus the final clear
        assert_eq!(leds.frames().len(), 100 * 10 + 1);
        assert_eq!(leds.lit_count(), 0);
    }

    #[test]
    fn celebration_flashes_vary() {
        let mut leds = MemoryLedBar::new(10);
        let timer = MockTimer::new();
        player().play(Animation::Celebration, &mut leds, &timer);

        let flashes: Vec<&Vec<bool>> = leds.frames().iter().skip(9).step_by(10).take(100).collect();
        assert!(flashes.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn failure_blinks_then_drains_from_far_end() {
        let mut leds = MemoryLedBar::new(10);
        let timer = MockTimer::new();
        player().play(Animation::Failure, &mut leds, &timer);

        let frames = leds.frames();
        for blink in 0..3 {
            assert_eq!(lit(&frames[blink * 2]).len(), 0);
            assert_eq!(lit(&frames[blink * 2 + 1]).len(), 10);
        }
        let drain: Vec<Vec<usize>> = frames[6..].iter().map(|f| lit(f)).collect();
        assert_eq!(drain.len(), 10);
        assert_eq!(drain[0], (0..9).collect::<Vec<_>>());
        assert_eq!(drain[8], vec![0]);
        assert!(drain[9].is_empty());

        let mut expected = vec![ms(200); 6];
        expected.push(ms(500));
        expected.extend(vec![ms(200); 10]);
        assert_eq!(timer.sleeps(), expected);
    }
}
