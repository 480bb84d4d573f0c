//! Terminal stand-ins for the board's button, force sensor and LED bar.
//!
//! A background thread reads stdin: an empty line is a button press, a
//! number sets the simulated force level.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use grip_core::{Button, ForceSensor, LedBar, MemoryLedBar};
use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLine {
    Press,
    Force(u32),
    Unknown,
}

pub fn parse_line(line: &str) -> ConsoleLine {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleLine::Press;
    }
    line.parse()
        .map(ConsoleLine::Force)
        .unwrap_or(ConsoleLine::Unknown)
}

/// Starts the stdin reader and returns the button and sensor it feeds.
pub fn spawn_stdin(
    max_raw: u32,
    jitter: u32,
    press_hold: Duration,
) -> io::Result<(ConsoleButton, ConsoleSensor)> {
    let (press_tx, press_rx) = crossbeam_channel::unbounded();
    let (force_tx, force_rx) = crossbeam_channel::unbounded();

    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || read_stdin(press_tx, force_tx))?;

    Ok((
        ConsoleButton::new(press_rx, press_hold),
        ConsoleSensor::new(force_rx, max_raw, jitter),
    ))
}

fn read_stdin(press_tx: Sender<Instant>, force_tx: Sender<u32>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let sent = match parse_line(&line) {
            ConsoleLine::Press => press_tx.send(Instant::now()).is_ok(),
            ConsoleLine::Force(level) => force_tx.send(level).is_ok(),
            ConsoleLine::Unknown => {
                warn!(%line, "expected an empty line or a force value");
                true
            }
        };
        if !sent {
            break;
        }
    }
}

/// A typed press reads as held for `hold`. Presses older than that when the
/// loop next polls (e.g. made during an animation) are lost.
pub struct ConsoleButton {
    presses: Receiver<Instant>,
    last_press: Option<Instant>,
    hold: Duration,
}

impl ConsoleButton {
    pub fn new(presses: Receiver<Instant>, hold: Duration) -> Self {
        Self {
            presses,
            last_press: None,
            hold,
        }
    }
}

impl Button for ConsoleButton {
    fn is_pressed(&mut self) -> bool {
        while let Ok(at) = self.presses.try_recv() {
            self.last_press = Some(at);
        }
        self.last_press.is_some_and(|at| at.elapsed() < self.hold)
    }
}

/// Reports the last typed force level with a little noise on top.
pub struct ConsoleSensor {
    levels: Receiver<u32>,
    level: u32,
    max_raw: u32,
    jitter: u32,
    rng: ThreadRng,
}

impl ConsoleSensor {
    pub fn new(levels: Receiver<u32>, max_raw: u32, jitter: u32) -> Self {
        Self {
            levels,
            level: 0,
            max_raw,
            jitter,
            rng: rand::rng(),
        }
    }
}

impl ForceSensor for ConsoleSensor {
    fn read_raw(&mut self) -> Option<u32> {
        while let Ok(level) = self.levels.try_recv() {
            self.level = level.min(self.max_raw);
        }
        if self.level == 0 || self.jitter == 0 {
            return Some(self.level);
        }
        let noise = self.rng.random_range(0..=self.jitter);
        let reading = self.level.saturating_sub(self.jitter / 2).saturating_add(noise);
        Some(reading.min(self.max_raw))
    }
}

pub fn render_bar(state: &[bool]) -> String {
    let cells: String = state.iter().map(|on| if *on { '#' } else { '.' }).collect();
    format!("[{cells}]")
}

/// LED bar drawn on one terminal line, redrawn only when it changes.
pub struct ConsoleLedBar {
    inner: MemoryLedBar,
    drawn: Vec<bool>,
}

impl ConsoleLedBar {
    pub fn new(len: usize) -> Self {
        Self {
            inner: MemoryLedBar::new(len),
            drawn: Vec::new(),
        }
    }

    fn redraw(&mut self) {
        self.inner.clear_frames();
        let state = self.inner.state();
        if state == self.drawn.as_slice() {
            return;
        }
        self.drawn = state.to_vec();
        let mut out = io::stdout().lock();
        // Display is best effort; a closed stdout must not stop the loop.
        let _ = write!(out, "\r{}", render_bar(state));
        let _ = out.flush();
    }
}

impl LedBar for ConsoleLedBar {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn set(&mut self, index: usize, on: bool) {
        self.inner.set(index, on);
        self.redraw();
    }

    fn set_count(&mut self, count: usize) {
        self.inner.set_count(count);
        self.redraw();
    }

    fn set_all(&mut self, on: bool) {
        self.inner.set_all(on);
        self.redraw();
    }

    fn set_pattern(&mut self, indices: &[usize]) {
        self.inner.set_pattern(indices);
        self.redraw();
    }
}
