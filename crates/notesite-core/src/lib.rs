//! Notesite Core Library
//!
//! Core types, configuration, and error handling for the notesite static
//! site generator.

pub mod config;
pub mod error;
pub mod note;

pub use config::{Config, IndexOrder};
pub use error::{CoreError, Result};
pub use note::{Note, NoteId};
