//! Notesite Generator Library
//!
//! Site generation engine for notesite.
//!
//! # Modules
//!
//! - [`collector`] - Note discovery and loading
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - Page and index HTML generation
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod html;
pub mod template;

pub use build::{BuildStats, Builder};
pub use collector::NoteCollector;
pub use html::HtmlGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
