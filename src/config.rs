// config.rs - Simulation tuning
//
// Defaults reproduce the look of the live page. The page may override any
// subset by passing a JSON object to `WaveCanvas::with_config`.

use serde::Deserialize;

use crate::error::EngineError;

/// Tunable constants for the wave and bubble simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Spring stiffness between neighbouring particles
    pub stiffness: f32,
    /// Per-frame divisor applied to particle velocity and force (> 1)
    pub friction: f32,
    /// Scale of the pointer pull on nearby particles
    pub mouse_pull: f32,
    /// Pointer area-of-effect radius in pixels
    pub aoe: f32,
    /// Vertical damping divisor for submerged bubbles (> 1)
    pub water_damping: f32,
    /// Vertical damping divisor for bubbles above the surface (> 1)
    pub air_damping: f32,
    pub max_bubbles: usize,
    pub twitch_interval_ms: f64,
    pub bubble_interval_ms: f64,
    /// Twitch impulses are drawn from [-twitch_force, twitch_force)
    pub twitch_force: f32,

    // Colours
    pub water_top: String,
    pub water_bottom: String,
    pub bubble_fill: String,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            stiffness: 0.75,
            friction: 1.14,
            mouse_pull: 0.09,
            aoe: 200.0,
            water_damping: 2.07,
            air_damping: 1.02,
            max_bubbles: 60,
            twitch_interval_ms: 1000.0,
            bubble_interval_ms: 400.0,
            twitch_force: 4.0,
            water_top: "#00AABB".into(),
            water_bottom: "rgba(0,200,250,0)".into(),
            bubble_fill: "rgba(255,255,255,0.7)".into(),
        }
    }
}

impl WaveConfig {
    /// Parse a partial JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the simulation diverge or stall.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |reason: &str| Err(EngineError::InvalidConfig(reason.into()));

        if !(self.friction > 1.0) {
            return invalid("friction must be greater than 1");
        }
        if !(self.water_damping > 1.0) || !(self.air_damping > 1.0) {
            return invalid("bubble damping must be greater than 1");
        }
        if !(self.aoe > 0.0) {
            return invalid("aoe must be positive");
        }
        if !(self.twitch_interval_ms > 0.0) || !(self.bubble_interval_ms > 0.0) {
            return invalid("intervals must be positive");
        }
        let forces = [self.stiffness, self.mouse_pull, self.twitch_force];
        if !forces.iter().all(|f| f.is_finite()) {
            return invalid("forces must be finite");
        }
        Ok(())
    }
}
