pub mod mock;
pub mod stats;
pub mod timer;

pub use mock::MockTimer;
pub use stats::{TickStats, TickWindow};
pub use timer::{HighPrecisionTimer, Timer};
