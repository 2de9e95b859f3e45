pub mod catalog;
pub mod editor;
pub mod notice;
pub mod preview;

pub use crate::domain::model::{Direction, Draft, Section, Template};
pub use crate::domain::ports::DraftStore;
pub use crate::utils::error::Result;
