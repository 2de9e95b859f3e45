pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use config::StudioConfig;
pub use core::editor::{LoadOutcome, SectionEditor};
pub use domain::model::{Direction, Draft, Section, Template};
pub use domain::ports::DraftStore;
pub use utils::error::{Result, StudioError};
