/// Analog force sensor.
pub trait ForceSensor {
    /// Latest raw reading, or `None` when the sensor has nothing new this
    /// tick.
    fn read_raw(&mut self) -> Option<u32>;
}

/// Single momentary push button.
pub trait Button {
    /// Logical pressed state; active-low wiring is resolved by the driver.
    fn is_pressed(&mut self) -> bool;
}

/// Bar of individually addressable LEDs, indexed `0..len()`.
///
/// Only `len` and `set` are required; bulk operations default to a pass
/// over `set`. Writes past the end are ignored.
pub trait LedBar {
    fn len(&self) -> usize;

    fn set(&mut self, index: usize, on: bool);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lights the first `count` LEDs and turns the rest off.
    fn set_count(&mut self, count: usize) {
        for i in 0..self.len() {
            self.set(i, i < count);
        }
    }

    fn set_all(&mut self, on: bool) {
        for i in 0..self.len() {
            self.set(i, on);
        }
    }

    /// Lights exactly the given indices.
    fn set_pattern(&mut self, indices: &[usize]) {
        for i in 0..self.len() {
            self.set(i, indices.contains(&i));
        }
    }
}

/// In-memory LED bar that records a frame after every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLedBar {
    state: Vec<bool>,
    frames: Vec<Vec<bool>>,
}

impl MemoryLedBar {
    pub fn new(len: usize) -> Self {
        Self {
            state: vec![false; len],
            frames: Vec::new(),
        }
    }

    pub fn state(&self) -> &[bool] {
        &self.state
    }

    /// Every state the bar went through, oldest first.
    pub fn frames(&self) -> &[Vec<bool>] {
        &self.frames
    }

    pub fn lit_count(&self) -> usize {
        self.state.iter().filter(|on| **on).count()
    }

    pub fn lit_indices(&self) -> Vec<usize> {
        self.state
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
            .collect()
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    fn commit(&mut self) {
        self.frames.push(self.state.clone());
    }
}

impl LedBar for MemoryLedBar {
    fn len(&self) -> usize {
        self.state.len()
    }

    fn set(&mut self, index: usize, on: bool) {
        if let Some(led) = self.state.get_mut(index) {
            *led = on;
        }
        self.commit();
    }

    fn set_count(&mut self, count: usize) {
        for (i, led) in self.state.iter_mut().enumerate() {
            *led = i < count;
        }
        self.commit();
    }

    fn set_all(&mut self, on: bool) {
        self.state.fill(on);
        self.commit();
    }

    fn set_pattern(&mut self, indices: &[usize]) {
        for (i, led) in self.state.iter_mut().enumerate() {
            *led = indices.contains(&i);
        }
        self.commit();
    }
}
