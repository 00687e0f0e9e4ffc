//! Plain text sample tables

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use wavemod_modem::prelude::Modulations;

const HEADER: &str = "# t AM FM PM";
const FOOTER: &str = "# Created with wavemod";

/// Write one line per sample: time, then the AM, FM and PM amplitudes
pub fn write_wave<W: Write>(modulations: &Modulations, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", HEADER)?;

    let rows = modulations
        .am
        .iter()
        .zip(modulations.fm.iter())
        .zip(modulations.pm.iter());
    for ((am, fm), pm) in rows {
        writeln!(
            writer,
            "{:+.8} {:+.8} {:+.8} {:+.8}",
            am.time, am.amplitude, fm.amplitude, pm.amplitude
        )?;
    }

    writeln!(writer, "{}", FOOTER)?;
    writer.flush()
}

/// Write the sample table to `path`
pub fn save_wave(modulations: &Modulations, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create wave file: {:?}", path))?;
    write_wave(modulations, BufWriter::new(file))
        .with_context(|| format!("Failed to write wave file: {:?}", path))?;

    info!("Wrote {} samples to {:?}", modulations.len(), path);
    Ok(())
}
