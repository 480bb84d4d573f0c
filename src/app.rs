use anyhow::{Context, Result};
use grip_core::SessionOutcome;
use grip_timing::{HighPrecisionTimer, Timer};
use grip_trial::{GripConfig, PollLoop, TrialController, TrialEvent};
use rand::rngs::ThreadRng;
use tracing::info;

use crate::console::{self, ConsoleButton, ConsoleLedBar, ConsoleSensor};

/// Noise added to simulated sensor readings.
const SENSOR_JITTER: u32 = 400;

pub struct App {
    poll: PollLoop<ConsoleButton, ConsoleSensor, ConsoleLedBar, HighPrecisionTimer, ThreadRng>,
    max_ticks: Option<u64>,
}

impl App {
    pub fn new(config: GripConfig, max_ticks: Option<u64>) -> Result<Self> {
        // A press must survive until the next poll even when a tick runs long.
        let press_hold = config.tick_interval() * 2;
        let (button, sensor) = console::spawn_stdin(config.max_raw, SENSOR_JITTER, press_hold)
            .context("failed to start stdin reader")?;
        let leds = ConsoleLedBar::new(config.led_count);
        let controller =
            TrialController::new(config, leds, HighPrecisionTimer::new(), rand::rng());

        Ok(Self {
            poll: PollLoop::new(button, sensor, controller),
            max_ticks,
        })
    }

    pub fn run(mut self) -> Result<()> {
        info!(
            platform = std::env::consts::OS,
            arch = std::env::consts::ARCH,
            "grip tester ready: Enter = button, a number = squeeze force"
        );

        let mut last_error = None;
        let ticks = self.poll.run(self.max_ticks, |event| {
            if let Err(error) = report(event) {
                last_error = Some(error);
            }
        });

        let stats = self.poll.timer().tick_stats();
        println!();
        info!(
            ticks,
            avg_ms = stats.average_tick_ns / 1e6,
            jitter_ms = stats.jitter_ns / 1e6,
            max_ms = stats.max_tick_ns / 1e6,
            hz = stats.effective_hz,
            "loop timing"
        );
        let history = self.poll.controller().history();
        let wins = history
            .iter()
            .filter(|r| r.outcome == SessionOutcome::Improved)
            .count();
        info!(sessions = history.len(), wins, "done");

        match last_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn report(event: &TrialEvent) -> Result<()> {
    match event {
        TrialEvent::CountdownStarted { trial } => println!("\ntrial {trial}: get ready"),
        TrialEvent::MeasuringStarted { trial } => println!("\ntrial {trial}: squeeze!"),
        TrialEvent::TrialFinished { trial, peak } => println!("\ntrial {trial}: peak {peak}"),
        TrialEvent::SessionFinished(result) => {
            let json = serde_json::to_string(result).context("failed to encode session result")?;
            println!("\nsession: {json}");
        }
    }
    Ok(())
}
