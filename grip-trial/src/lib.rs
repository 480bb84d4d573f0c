pub mod animation;
pub mod config;
pub mod error;
pub mod input;
pub mod runner;
pub mod state;
pub use animation::{Animation, AnimationPlayer};
pub use config::{CelebrationConfig, CountdownConfig, FailureConfig, GripConfig};
pub use error::ConfigError;
pub use input::EdgeDetector;
pub use runner::PollLoop;
pub use state::{TrialController, TrialEvent};
