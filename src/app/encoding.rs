use eframe::egui::Color32;

use crate::network::GenderCode;

use super::config::{GenderColors, RadiusRange};

pub(in crate::app) fn color_for(colors: GenderColors, gender: GenderCode) -> Color32 {
    match gender {
        GenderCode::Female => colors.female,
        GenderCode::Male => colors.male,
        GenderCode::Unspecified => colors.unspecified,
    }
}

/// Linear radius interpolation by relationship count. `max_connections` is
/// floored at 1 at load time, so this stays total for any count.
pub(in crate::app) fn radius_for(
    range: RadiusRange,
    relationship_count: u32,
    max_connections: u32,
) -> f32 {
    let ratio = relationship_count as f32 / max_connections.max(1) as f32;
    range.min + ratio * (range.max - range.min)
}

pub(in crate::app) fn fade(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}
