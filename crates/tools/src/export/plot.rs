//! Waveform chart rendering.
//!
//! Draws four stacked panels into an RGB buffer: the data bits as a step
//! trace followed by the AM, FM and PM waveforms, all sharing one time
//! axis with dotted markers on every bit boundary.

use anyhow::{Context, Result};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use wavemod_modem::prelude::{ModulationScheme, Modulations};

/// Plot image dimensions.
pub const PLOT_WIDTH: u32 = 1600;
pub const PLOT_HEIGHT: u32 = 800;

const PANEL_COUNT: usize = 4;
const MARGIN_X: usize = 40;
const MARGIN_Y: usize = 12;

type Rgb = [u8; 3];

const BACKGROUND_COLOR: Rgb = [255, 255, 255];
const FRAME_COLOR: Rgb = [96, 96, 96];
const ZERO_LINE_COLOR: Rgb = [208, 208, 208];
const BOUNDARY_COLOR: Rgb = [144, 144, 144];
const DATA_COLOR: Rgb = [31, 119, 180];
const AM_COLOR: Rgb = [0, 128, 0];
const FM_COLOR: Rgb = [214, 39, 40];
const PM_COLOR: Rgb = [0, 170, 190];

/// Headroom above the largest value in each panel
const HEADROOM: f64 = 1.1;

fn scheme_color(scheme: ModulationScheme) -> Rgb {
    match scheme {
        ModulationScheme::Am => AM_COLOR,
        ModulationScheme::Fm => FM_COLOR,
        ModulationScheme::Pm => PM_COLOR,
    }
}

/// RGB pixel buffer
struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            pixels.extend_from_slice(&BACKGROUND_COLOR);
        }
        Self { width, height, pixels }
    }

    fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 3;
        self.pixels[idx..idx + 3].copy_from_slice(&color);
    }

    /// Bresenham line between two pixel positions
    fn line(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;

        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn hline(&mut self, x0: usize, x1: usize, y: usize, color: Rgb) {
        for x in x0..=x1 {
            self.set(x as i64, y as i64, color);
        }
    }

    fn dotted_vline(&mut self, x: usize, y0: usize, y1: usize, color: Rgb) {
        for y in (y0..=y1).step_by(3) {
            self.set(x as i64, y as i64, color);
        }
    }
}

/// Vertical slot of one panel plus the value range it shows
struct Panel {
    top: usize,
    bottom: usize,
    low: f64,
    high: f64,
}

impl Panel {
    fn new(index: usize, height: usize, low: f64, high: f64) -> Self {
        let slot = height / PANEL_COUNT;
        let top = index * slot + MARGIN_Y;
        Self {
            top,
            bottom: ((index + 1) * slot).saturating_sub(MARGIN_Y).max(top),
            low,
            high,
        }
    }

    /// Map a value to a pixel row; larger values sit higher up
    fn y(&self, value: f64) -> i64 {
        let clamped = value.clamp(self.low, self.high);
        let normalized = (self.high - clamped) / (self.high - self.low);
        (self.top as f64 + normalized * (self.bottom - self.top) as f64).round() as i64
    }
}

/// Horizontal mapping from sample index to pixel column
struct TimeAxis {
    left: usize,
    right: usize,
    samples: usize,
}

impl TimeAxis {
    fn x(&self, index: usize) -> i64 {
        if self.samples == 0 {
            return self.left as i64;
        }
        let span = self.right.saturating_sub(self.left) as f64;
        (self.left as f64 + index as f64 * span / self.samples as f64).round() as i64
    }
}

/// Render the chart into an RGB buffer of `width * height * 3` bytes
pub fn render_plot(modulations: &Modulations, width: u32, height: u32) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    let mut canvas = Canvas::new(w, h);
    let axis = TimeAxis {
        left: MARGIN_X,
        right: w.saturating_sub(MARGIN_X + 1),
        samples: modulations.len(),
    };

    let peak = match modulations.peak() {
        p if p > 0.0 => p * HEADROOM,
        _ => HEADROOM,
    };
    let panels = [
        Panel::new(0, h, -0.1, 1.1),
        Panel::new(1, h, -peak, peak),
        Panel::new(2, h, -peak, peak),
        Panel::new(3, h, -peak, peak),
    ];

    for panel in &panels {
        canvas.hline(axis.left, axis.right, panel.top, FRAME_COLOR);
        canvas.hline(axis.left, axis.right, panel.bottom, FRAME_COLOR);
        canvas.hline(axis.left, axis.right, panel.y(0.0) as usize, ZERO_LINE_COLOR);

        for bit in 0..=modulations.bits.len() {
            let x = axis.x(bit * modulations.steps_per_bit);
            canvas.dotted_vline(x as usize, panel.top, panel.bottom, BOUNDARY_COLOR);
        }
    }

    draw_bits(&mut canvas, &panels[0], &axis, modulations);
    for (panel, scheme) in panels[1..].iter().zip(ModulationScheme::ALL) {
        let waveform = modulations.get(scheme);
        let color = scheme_color(scheme);
        let points: Vec<(i64, i64)> = waveform
            .amplitudes()
            .enumerate()
            .map(|(idx, amplitude)| (axis.x(idx), panel.y(amplitude)))
            .collect();
        for pair in points.windows(2) {
            canvas.line(pair[0], pair[1], color);
        }
    }

    canvas.pixels
}

/// Step trace of the data bits
fn draw_bits(canvas: &mut Canvas, panel: &Panel, axis: &TimeAxis, modulations: &Modulations) {
    let steps = modulations.steps_per_bit;
    let mut previous: Option<i64> = None;

    for (idx, bit) in modulations.bits.iter().enumerate() {
        let y = panel.y(bit.as_u8() as f64);
        let x0 = axis.x(idx * steps);
        let x1 = axis.x((idx + 1) * steps);
        if let Some(prev_y) = previous {
            canvas.line((x0, prev_y), (x0, y), DATA_COLOR);
        }
        canvas.line((x0, y), (x1, y), DATA_COLOR);
        previous = Some(y);
    }
}

/// Encodes RGB buffer as PNG to a writer.
fn encode_png_to_writer<W: Write>(
    rgb_data: &[u8],
    width: u32,
    height: u32,
    writer: W,
) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(rgb_data)?;
    png_writer.finish()?;

    Ok(())
}

/// Render the chart and encode it as PNG
pub fn plot_png(modulations: &Modulations) -> Result<Vec<u8>> {
    let rgb = render_plot(modulations, PLOT_WIDTH, PLOT_HEIGHT);
    let mut buffer = Vec::new();
    encode_png_to_writer(&rgb, PLOT_WIDTH, PLOT_HEIGHT, &mut buffer)
        .context("Failed to encode plot")?;
    Ok(buffer)
}

/// Render the chart to a PNG file at `path`
pub fn save_plot(modulations: &Modulations, path: &Path) -> Result<()> {
    let rgb = render_plot(modulations, PLOT_WIDTH, PLOT_HEIGHT);
    let file = File::create(path)
        .with_context(|| format!("Failed to create plot file: {:?}", path))?;
    encode_png_to_writer(&rgb, PLOT_WIDTH, PLOT_HEIGHT, BufWriter::new(file))
        .with_context(|| format!("Failed to write plot file: {:?}", path))?;

    info!("Wrote plot of {} bits to {:?}", modulations.bits.len(), path);
    Ok(())
}
