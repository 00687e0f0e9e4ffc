//! Command line interface

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::WaveConfig;
use crate::console::Console;
use crate::export::{output_path, save_plot, save_wave, ExportKind};
use crate::pipeline::Pipeline;

/// Bit keying waveform modulator
#[derive(Debug, Parser)]
#[command(name = "wavemod")]
#[command(about = "Plot or export AM, FM and PM keyed waveforms for binary, ASCII or BCD input")]
#[command(version)]
pub struct Cli {
    /// Use the text console instead of a graphical window
    #[arg(long)]
    pub nogui: bool,

    /// Samples per bit
    #[arg(long, value_name = "STEPS")]
    pub steps: Option<usize>,

    /// Write the plot for INPUT and exit
    #[arg(long, value_name = "INPUT", conflicts_with = "store_wave")]
    pub store_plot: Option<String>,

    /// Write the sample table for INPUT and exit
    #[arg(long, value_name = "INPUT")]
    pub store_wave: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Carrier frequency in Hz
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Carrier amplitude
    #[arg(long)]
    pub amplitude: Option<f64>,

    /// Carrier phase in radians
    #[arg(long, allow_negative_numbers = true)]
    pub phase: Option<f64>,

    /// Seconds per bit
    #[arg(long)]
    pub bit_duration: Option<f64>,

    /// AM amplitude for a 0 bit, relative to the carrier
    #[arg(long)]
    pub am_low_ratio: Option<f64>,

    /// FM frequency multiplier for a 1 bit
    #[arg(long)]
    pub fm_high_ratio: Option<f64>,

    /// FM frequency multiplier for a 0 bit
    #[arg(long)]
    pub fm_low_ratio: Option<f64>,

    /// Key PM differentially
    #[arg(long)]
    pub pm_differential: bool,

    /// Directory for written files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Effective configuration: the config file (or defaults) with flags on top
    pub fn wave_config(&self) -> Result<WaveConfig> {
        let mut config = match &self.config {
            Some(path) => WaveConfig::from_file(path)?,
            None => WaveConfig::default(),
        };

        if let Some(steps) = self.steps {
            config.steps_per_bit = steps;
        }
        if let Some(frequency) = self.frequency {
            config.frequency = frequency;
        }
        if let Some(amplitude) = self.amplitude {
            config.amplitude = amplitude;
        }
        if let Some(phase) = self.phase {
            config.phase = phase;
        }
        if let Some(bit_duration) = self.bit_duration {
            config.bit_duration = bit_duration;
        }
        if let Some(ratio) = self.am_low_ratio {
            config.keying.am_low_ratio = ratio;
        }
        if let Some(ratio) = self.fm_high_ratio {
            config.keying.fm_high_ratio = ratio;
        }
        if let Some(ratio) = self.fm_low_ratio {
            config.keying.fm_low_ratio = ratio;
        }
        if self.pm_differential {
            config.keying.pm_differential = true;
        }

        Ok(config)
    }

    /// Run the selected front end
    pub fn execute(&self) -> Result<()> {
        let config = self.wave_config()?;
        let pipeline = Pipeline::new(&config)?;

        if let Some(input) = &self.store_plot {
            let modulations = pipeline.run(input)?;
            let path = output_path(&self.out_dir, input, ExportKind::Plot);
            save_plot(&modulations, &path)?;
            println!("Plot written to {}", path.display());
            return Ok(());
        }

        if let Some(input) = &self.store_wave {
            let modulations = pipeline.run(input)?;
            let path = output_path(&self.out_dir, input, ExportKind::Wave);
            save_wave(&modulations, &path)?;
            println!("Wave written to {}", path.display());
            return Ok(());
        }

        if !self.nogui {
            warn!("No graphical front end available, using the console");
        }

        let console = Console::new(pipeline, &self.out_dir);
        let written = console.run(io::stdin().lock(), io::stdout())?;
        info!("Wrote {} plots", written);
        Ok(())
    }
}
