/// Turns consecutive button samples into press edges.
///
/// The only state kept between polls is the previous sample. It starts out
/// released, so a button already held on the first poll reads as a press.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous_pressed: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true on a released-to-pressed transition.
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.previous_pressed;
        self.previous_pressed = pressed;
        edge
    }

    pub fn previous_pressed(&self) -> bool {
        self.previous_pressed
    }
}
