//! Editor configuration, loadable from JSON.
//!
//! Every field has a default so a partial file (or `{}`) is valid.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::animation::Animator;
use super::cubic_bezier::CubicBezierCurve;
use super::error::{Error, Result};
use super::obj::IMPORT_SAMPLES_PER_CURVE;
use super::spline::{Spline, DEFAULT_SAMPLES_PER_CURVE};
use super::vector::{Color, Vector};
use super::NativeFloat;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Samples per curve for a new spline.
    pub samples_per_curve: usize,
    /// Samples per curve for an imported spline.
    pub import_samples_per_curve: usize,
    /// Radius within which a control point is picked.
    pub pick_radius: NativeFloat,
    /// Seconds for the primary marker to complete one lap.
    pub lap_seconds: NativeFloat,
    /// Relative speed of the secondary marker.
    pub speed_multiplier: NativeFloat,
    /// Color assigned to newly added curves.
    pub curve_color: [NativeFloat; 3],
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            samples_per_curve: DEFAULT_SAMPLES_PER_CURVE,
            import_samples_per_curve: IMPORT_SAMPLES_PER_CURVE,
            pick_radius: 0.015,
            lap_seconds: 10.0,
            speed_multiplier: 1.0,
            curve_color: [1.0, 0.0, 0.0],
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: EditorConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples_per_curve == 0 || self.import_samples_per_curve == 0 {
            return Err(Error::invalid_config("samples per curve must be positive"));
        }
        if !(self.pick_radius.is_finite() && self.pick_radius >= 0.0) {
            return Err(Error::invalid_config(format!(
                "pick radius must be a non-negative number, got {}",
                self.pick_radius
            )));
        }
        if !(self.lap_seconds.is_finite() && self.lap_seconds > 0.0) {
            return Err(Error::invalid_config(format!(
                "lap time must be positive, got {}s",
                self.lap_seconds
            )));
        }
        if !self.speed_multiplier.is_finite() {
            return Err(Error::invalid_config("speed multiplier must be finite"));
        }
        if self.curve_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(Error::invalid_config(format!(
                "curve color components must lie in [0, 1], got {:?}",
                self.curve_color
            )));
        }
        Ok(())
    }

    pub fn color(&self) -> Color {
        Color::from(self.curve_color)
    }

    pub fn new_spline(&self) -> Spline {
        Spline::new(self.samples_per_curve)
    }

    /// The curve the editor adds when asked for a new segment.
    pub fn default_curve(&self) -> CubicBezierCurve {
        CubicBezierCurve::with_color(
            [
                Vector::new(-0.75, 0.9, -0.5),
                Vector::new(-0.25, 0.9, 0.0),
                Vector::new(0.25, 0.5, 0.0),
                Vector::new(0.75, 0.9, 0.5),
            ],
            self.color(),
        )
    }

    pub fn animator(&self) -> Animator {
        Animator::new(
            Duration::from_secs_f64(self.lap_seconds),
            self.speed_multiplier,
        )
    }
}
