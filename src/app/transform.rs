use eframe::egui::{Pos2, Rect, Vec2};

use super::config::ZoomLimits;

/// Affine scene transform: uniform scale plus translation, anchored on the
/// viewport center. Every screen <-> scene conversion goes through here so
/// pointer math stays out of the event handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ViewTransform {
    pub pan: Vec2,
    pub zoom: f32,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        pan: Vec2::ZERO,
        zoom: 1.0,
    };

    pub fn to_screen(self, rect: Rect, scene: Vec2) -> Pos2 {
        rect.center() + self.pan + scene * self.zoom
    }

    pub fn to_scene(self, rect: Rect, screen: Pos2) -> Vec2 {
        (screen - rect.center() - self.pan) / self.zoom
    }

    /// Applies a zoom factor anchored at `pointer`: the scene point under the
    /// cursor stays put. The resulting scale is clamped to `limits`.
    pub fn zoomed_about(self, rect: Rect, pointer: Pos2, factor: f32, limits: ZoomLimits) -> Self {
        let anchor = self.to_scene(rect, pointer);
        let zoom = (self.zoom * factor).clamp(limits.min, limits.max);
        Self {
            pan: pointer - rect.center() - anchor * zoom,
            zoom,
        }
    }

    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            pan: from.pan + (to.pan - from.pan) * t,
            zoom: from.zoom + (to.zoom - from.zoom) * t,
        }
    }
}

/// In-flight animation of the transform back to identity.
pub(in crate::app) struct ResetAnimation {
    pub from: ViewTransform,
    pub started_secs: f64,
}

pub(in crate::app) fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
