use palette::Srgb;
use plotters::style::RGBColor;

use crate::error::OutputError;

// ---------------------------------------------------------------------------
// Line colours: CSS/SVG names or hex codes → plotters colour
// ---------------------------------------------------------------------------

/// Resolve a colour given as a CSS/SVG name (`"blue"`, `"darkorange"`) or a
/// hex code (`"#1f77b4"`).
pub fn line_color(spec: &str) -> Result<RGBColor, OutputError> {
    let spec = spec.trim();
    let rgb: Srgb<u8> = if spec.starts_with('#') {
        spec.parse()
            .map_err(|_| OutputError::UnknownColor(spec.to_string()))?
    } else {
        palette::named::from_str(&spec.to_ascii_lowercase())
            .ok_or_else(|| OutputError::UnknownColor(spec.to_string()))?
    };
    Ok(RGBColor(rgb.red, rgb.green, rgb.blue))
}
