//! Interactive text front end
//!
//! Reads one tagged code per line and writes a plot for each valid one.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use wavemod_codecs::prelude::InputTag;

use crate::export::{output_path, save_plot, ExportKind};
use crate::pipeline::Pipeline;

/// Line-oriented console session
pub struct Console {
    pipeline: Pipeline,
    out_dir: PathBuf,
}

impl Console {
    pub fn new(pipeline: Pipeline, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            pipeline,
            out_dir: out_dir.into(),
        }
    }

    fn banner<W: Write>(output: &mut W) -> std::io::Result<()> {
        writeln!(output, "wavemod console")?;
        writeln!(output, "Enter a code to plot its AM, FM and PM waveforms.")?;
        for tag in InputTag::ALL {
            let prefix = match tag.prefix() {
                "" => "(no prefix)",
                prefix => prefix,
            };
            writeln!(output, "  {:<12} {}", prefix, tag.label())?;
        }
        writeln!(output, "Type 'quit' or send EOF to leave.")
    }

    /// Run until EOF or `quit`, returning the number of plots written
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<usize> {
        Self::banner(&mut output)?;

        let mut written = 0;
        let mut line = Vec::new();
        loop {
            write!(output, "Code: ")?;
            output.flush()?;

            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            // Undecodable bytes become U+FFFD and fail as invalid symbols
            let text = String::from_utf8_lossy(&line);
            let code = text.trim_end_matches(['\r', '\n']);
            if code.trim().is_empty() {
                continue;
            }
            if matches!(code.trim(), "quit" | "exit") {
                break;
            }

            match self.plot(code) {
                Ok(path) => {
                    writeln!(output, "Input okay. Plot written to {}", path.display())?;
                    written += 1;
                }
                Err(e) => {
                    warn!("Rejected code {:?}: {:#}", code, e);
                    writeln!(output, "Error: {:#}", e)?;
                }
            }
        }

        debug!("Console finished after {} plots", written);
        Ok(written)
    }

    fn plot(&self, code: &str) -> Result<PathBuf> {
        let modulations = self.pipeline.run(code)?;
        let path = output_path(&self.out_dir, code, ExportKind::Plot);
        save_plot(&modulations, &path)?;
        Ok(path)
    }
}
