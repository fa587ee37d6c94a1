use eframe::egui::Color32;
use peniko::color::{Srgb, parse_color};

/// Resolve a CSS color: any named color, hex form (`#rgb`, `#rgba`,
/// `#rrggbb`, `#rrggbbaa`) or functional form such as `rgb(..)` and `hsl(..)`.
///
/// Returns `None` for anything else; such edges are not stroked.
pub fn parse_css_color(value: &str) -> Option<Color32> {
    let color = parse_color(&value.to_ascii_lowercase()).ok()?;
    let rgba = color.to_alpha_color::<Srgb>().to_rgba8();
    Some(Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a))
}
