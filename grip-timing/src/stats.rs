use std::collections::VecDeque;
use std::time::Duration;

/// Summary of recent control-loop tick durations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStats {
    pub samples: usize,
    pub average_tick_ns: f64,
    pub jitter_ns: f64,
    pub min_tick_ns: f64,
    pub max_tick_ns: f64,
    pub effective_hz: f64,
}

/// Bounded window of tick durations, oldest evicted first.
#[derive(Debug, Clone)]
pub struct TickWindow {
    ticks: VecDeque<Duration>,
    max_samples: usize,
}

impl TickWindow {
    pub fn new(max_samples: usize) -> Self {
        Self {
            ticks: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    pub fn record(&mut self, d: Duration) {
        if self.max_samples == 0 {
            return;
        }
        if self.ticks.len() >= self.max_samples {
            self.ticks.pop_front();
        }
        self.ticks.push_back(d);
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn stats(&self) -> TickStats {
        if self.ticks.is_empty() {
            return TickStats::default();
        }
        let times: Vec<f64> = self.ticks.iter().map(|d| d.as_nanos() as f64).collect();
        let n = times.len() as f64;
        let avg = times.iter().sum::<f64>() / n;
        let var = times.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / n;
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        TickStats {
            samples: times.len(),
            average_tick_ns: avg,
            jitter_ns: var.sqrt(),
            min_tick_ns: min,
            max_tick_ns: max,
            effective_hz: if avg > 0.0 { 1e9 / avg } else { 0.0 },
        }
    }
}

impl Default for TickWindow {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_reports_zeroes() {
        assert_eq!(TickWindow::new(4).stats(), TickStats::default());
    }

    #[test]
    fn evicts_oldest_sample() {
        let mut window = TickWindow::new(2);
        window.record(Duration::from_millis(100));
        window.record(Duration::from_millis(50));
        window.record(Duration::from_millis(50));
        let stats = window.stats();
        assert_eq!(stats.samples, 2);
        assert_eq!(stats.max_tick_ns, 50_000_000.0);
        assert_eq!(stats.jitter_ns, 0.0);
        assert!((stats.effective_hz - 20.0).abs() < 1e-9);
    }

    #[test]
    fn min_max_and_jitter() {
        let mut window = TickWindow::default();
        window.record(Duration::from_nanos(10));
        window.record(Duration::from_nanos(30));
        let stats = window.stats();
        assert_eq!(stats.min_tick_ns, 10.0);
        assert_eq!(stats.max_tick_ns, 30.0);
        assert_eq!(stats.average_tick_ns, 20.0);
        assert_eq!(stats.jitter_ns, 10.0);
    }
}
