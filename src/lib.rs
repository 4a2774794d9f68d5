//! csvcolumns - column coloring for delimited text
//!
//! This crate provides the core types and logic for coloring the fields of
//! CSV/TSV-style buffers, keeping a sticky header visible, and showing an
//! aligned "clean" table view. It follows the Elm Architecture pattern: host
//! events become [`Msg`]s, and [`update`] turns them into display
//! instructions through the [`Host`] trait.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod host;
pub mod messages;
pub mod model;
pub mod session;
pub mod terminal;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use config::ColumnsConfig;
pub use host::{Host, MemoryHost};
pub use messages::{CommandMsg, Msg};
pub use model::ColumnsModel;
pub use session::Session;
pub use update::update;
