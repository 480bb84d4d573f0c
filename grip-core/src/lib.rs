pub mod force;
pub mod gpio;
pub mod hardware;
pub mod trial;

pub use force::map_force_to_leds;
pub use gpio::{GpioButton, GpioLedBar};
pub use hardware::{Button, ForceSensor, LedBar, MemoryLedBar};
pub use trial::{SessionOutcome, SessionResult, TRIALS_PER_SESSION, TrialSession, TrialState};
