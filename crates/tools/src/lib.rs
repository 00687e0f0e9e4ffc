//! Wavemod Tools library
//!
//! Configuration, exporters and the command line front end built on the
//! codec and modem crates.

pub mod cli;
pub mod common;
pub mod config;
pub mod console;
pub mod export;
pub mod pipeline;

pub use cli::Cli;
pub use common::init_logging;
pub use config::WaveConfig;
pub use console::Console;
pub use export::{save_plot, save_wave, ExportKind};
pub use pipeline::Pipeline;
