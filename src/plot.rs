use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use crate::color::line_color;
use crate::error::OutputError;

// ---------------------------------------------------------------------------
// Plot style
// ---------------------------------------------------------------------------

/// Display metadata for one line plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// CSS/SVG colour name or hex code.
    pub color: String,
    pub grid: bool,
    /// Image size in pixels.
    pub size: (u32, u32),
}

/// 10 x 6 inches at 100 dpi.
pub const DEFAULT_SIZE: (u32, u32) = (1000, 600);

impl PlotStyle {
    /// Magnitude against frequency.
    pub fn spectrum() -> Self {
        Self {
            title: "FFT Spectrum".into(),
            x_label: "Frequency (Hz)".into(),
            y_label: "Amplitude".into(),
            color: "blue".into(),
            grid: true,
            size: DEFAULT_SIZE,
        }
    }

    /// Raw samples against sample index.
    pub fn signal() -> Self {
        Self {
            title: "Signal Output".into(),
            x_label: "Time".into(),
            y_label: "Amplitude".into(),
            color: "red".into(),
            grid: true,
            size: DEFAULT_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// DejaVu Sans, shipped with the crate so plot text never depends on the host.
static DEJAVU_SANS: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Register the bundled font as plotters' `sans-serif` family, once per process.
fn ensure_font(path: &Path) -> Result<(), OutputError> {
    let ready = *FONT_READY.get_or_init(|| {
        register_font("sans-serif", FontStyle::Normal, DEJAVU_SANS).is_ok()
    });
    if ready {
        Ok(())
    } else {
        Err(OutputError::Plot {
            path: path.to_path_buf(),
            message: "bundled font could not be loaded".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Min/max of the finite values, padded by 5 % on each side. Falls back to
/// `0..1` for an empty series and widens a zero-height span.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = span * 0.05;
    (lo - pad)..(hi + pad)
}

/// Draw `points` as a single line and write a PNG to `path`.
///
/// Non-finite points are skipped. The destination is overwritten.
pub fn render_line_plot(
    path: &Path,
    points: &[(f64, f64)],
    style: &PlotStyle,
) -> Result<(), OutputError> {
    let color = line_color(&style.color)?;
    let draw_err = |e: &dyn std::fmt::Display| OutputError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let finite: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let x_range = axis_range(finite.iter().map(|p| p.0));
    let y_range = axis_range(finite.iter().map(|p| p.1));
    ensure_font(path)?;

    let root = BitMapBackend::new(path, style.size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(&style.title, ("sans-serif", 24))
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| draw_err(&e))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str());
    if !style.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(|e| draw_err(&e))?;

    chart
        .draw_series(LineSeries::new(finite, color.stroke_width(2)))
        .map_err(|e| draw_err(&e))?;

    root.present().map_err(|e| draw_err(&e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_range_pads_span() {
        let r = axis_range([0.0, 10.0].into_iter());
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn axis_range_handles_degenerate_input() {
        assert_eq!(axis_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(axis_range([2.0, 2.0].into_iter()), 1.5..2.5);
        assert_eq!(axis_range([f64::NAN].into_iter()), 0.0..1.0);
    }

    #[test]
    fn bundled_font_registers() {
        assert!(ensure_font(Path::new("unused.png")).is_ok());
    }

    #[test]
    fn default_styles() {
        assert_eq!(PlotStyle::spectrum().color, "blue");
        assert_eq!(PlotStyle::signal().x_label, "Time");
        assert_eq!(PlotStyle::signal().size, DEFAULT_SIZE);
    }
}
