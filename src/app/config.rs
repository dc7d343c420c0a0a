use eframe::egui::Color32;

#[derive(Clone, Copy, Debug)]
pub struct RadiusRange {
    pub min: f32,
    pub max: f32,
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self { min: 8.0, max: 25.0 }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GenderColors {
    pub female: Color32,
    pub male: Color32,
    pub unspecified: Color32,
}

impl Default for GenderColors {
    fn default() -> Self {
        Self {
            female: Color32::from_rgb(0xff, 0x69, 0xb4),
            male: Color32::from_rgb(0x41, 0x69, 0xe1),
            unspecified: Color32::from_rgb(0x80, 0x80, 0x80),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ForceConfig {
    pub link_distance: f32,
    pub charge_strength: f32,
    pub center_strength: f32,
    pub collide_padding: f32,
    /// Barnes-Hut opening angle for the charge approximation.
    pub theta: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            link_distance: 60.0,
            charge_strength: -150.0,
            center_strength: 0.1,
            collide_padding: 5.0,
            theta: 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationConfig {
    pub alpha_target: f32,
    pub alpha_min: f32,
    /// Geometric temperature decay per tick.
    pub alpha_decay: f32,
    /// Velocity friction applied per tick.
    pub velocity_decay: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            alpha_target: 0.3,
            alpha_min: 0.001,
            alpha_decay: 1.0 - 0.001_f32.powf(1.0 / 300.0),
            velocity_decay: 0.4,
        }
    }
}

/// Full vs. dimmed opacity levels for the three visual channels. Links dim
/// to a lower floor than nodes and labels since edges are visually thinner.
#[derive(Clone, Copy, Debug)]
pub struct OpacityLevels {
    pub node_full: f32,
    pub node_dim: f32,
    pub link_default: f32,
    pub link_active: f32,
    pub link_match: f32,
    pub link_dim: f32,
}

impl Default for OpacityLevels {
    fn default() -> Self {
        Self {
            node_full: 1.0,
            node_dim: 0.2,
            link_default: 0.6,
            link_active: 1.0,
            link_match: 0.8,
            link_dim: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 4.0 }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GraphConfig {
    pub radius: RadiusRange,
    pub colors: GenderColors,
    pub forces: ForceConfig,
    pub animation: AnimationConfig,
    pub opacity: OpacityLevels,
    pub zoom: ZoomLimits,
    pub search_debounce: SearchDebounce,
    pub reset_animation: ResetTiming,
}

#[derive(Clone, Copy, Debug)]
pub struct SearchDebounce {
    pub quiet_secs: f64,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self { quiet_secs: 0.3 }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ResetTiming {
    pub duration_secs: f32,
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self { duration_secs: 0.5 }
    }
}
