//! Output files for finished modulations
//!
//! Both exporters take a completed [`Modulations`] value; nothing is
//! streamed while sampling.
//!
//! [`Modulations`]: wavemod_modem::prelude::Modulations

pub mod plot;
pub mod wave;

pub use plot::save_plot;
pub use wave::save_wave;

use std::path::{Path, PathBuf};

/// Kind of file written for an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Rendered chart
    Plot,
    /// Sample table
    Wave,
}

impl ExportKind {
    /// Get file extension for kind
    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Plot => "png",
            ExportKind::Wave => "txt",
        }
    }
}

/// File name for an input: `wave_<INPUT>.<ext>`.
///
/// Path separators in the input are replaced so the file stays in the
/// output directory.
pub fn file_name(input: &str, kind: ExportKind) -> String {
    let stem: String = input
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("wave_{}.{}", stem, kind.extension())
}

/// Full output path for an input inside `dir`
pub fn output_path(dir: &Path, input: &str, kind: ExportKind) -> PathBuf {
    dir.join(file_name(input, kind))
}
