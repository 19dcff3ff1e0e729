use std::path::Path;

use serde::{Deserialize, Serialize};
use stargaze_common::Color;

use crate::GalaxyError;

/// Inputs to a galaxy generation.
///
/// Files use camelCase keys (`randomnessPower`, `insideColor`, ...); any key
/// left out falls back to the default galaxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalaxyParameters {
    /// Number of points.
    pub count: u32,
    /// Point render size. Only the renderer reads this.
    pub size: f32,
    /// Maximum spiral radius.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Radians of twist per unit radius.
    pub spin: f32,
    /// Jitter magnitude scale.
    pub randomness: f32,
    /// Exponent applied to jitter draws; higher values pull points toward the arm.
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 1000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Color::hex(0xff6030),
            outside_color: Color::hex(0x1b3984),
        }
    }
}

impl GalaxyParameters {
    /// Reject inputs that would yield degenerate buffers, non-finite
    /// positions or colors outside `[0, 1]`.
    ///
    /// Negative spin, zero randomness and extreme powers remain valid.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.count == 0 {
            return Err(GalaxyError::invalid("count", "must be at least 1"));
        }
        if self.branches == 0 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GalaxyError::invalid(
                "radius",
                format!("must be a positive finite number, got {}", self.radius),
            ));
        }
        if !(self.size.is_finite() && self.size >= 0.0) {
            return Err(GalaxyError::invalid(
                "size",
                format!("must be a non-negative finite number, got {}", self.size),
            ));
        }
        if !self.spin.is_finite() {
            return Err(GalaxyError::invalid(
                "spin",
                format!("must be finite, got {}", self.spin),
            ));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(GalaxyError::invalid(
                "randomness",
                format!("must be a non-negative finite number, got {}", self.randomness),
            ));
        }
        // A zero magnitude draw raised to a non-positive power is infinite.
        if !(self.randomness_power.is_finite() && self.randomness_power > 0.0) {
            return Err(GalaxyError::invalid(
                "randomness_power",
                format!(
                    "must be a positive finite number, got {}",
                    self.randomness_power
                ),
            ));
        }
        check_color("inside_color", self.inside_color)?;
        check_color("outside_color", self.outside_color)?;
        Ok(())
    }

    /// Load and validate parameters from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GalaxyError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let params: Self = match extension.as_str() {
            "json" => serde_json::from_str(&text)?,
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            _ => return Err(GalaxyError::UnsupportedFormat(extension)),
        };
        params.validate()?;
        tracing::debug!(path = %path.display(), count = params.count, "loaded galaxy parameters");
        Ok(params)
    }

    /// Save as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GalaxyError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

fn check_color(field: &'static str, color: Color) -> Result<(), GalaxyError> {
    if color.to_array().iter().all(|c| (0.0..=1.0).contains(c)) {
        Ok(())
    } else {
        Err(GalaxyError::invalid(
            field,
            format!("channels must lie in [0, 1], got {:?}", color.to_array()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_galaxy() {
        let p = GalaxyParameters::default();
        assert_eq!(p.count, 1000);
        assert_eq!(p.branches, 3);
        assert_eq!(p.inside_color.to_hex(), "#ff6030");
        assert_eq!(p.outside_color.to_hex(), "#1b3984");
        assert!(p.validate().is_ok());
    }

    #[test]
    fn zero_count_rejected() {
        let p = GalaxyParameters {
            count: 0,
            ..GalaxyParameters::default()
        };
        let err = p.validate().unwrap_err();
        assert_eq!(err.invalid_field(), Some("count"));
    }

    #[test]
    fn zero_branches_rejected() {
        let p = GalaxyParameters {
            branches: 0,
            ..GalaxyParameters::default()
        };
        assert_eq!(p.validate().unwrap_err().invalid_field(), Some("branches"));
    }

    #[test]
    fn non_positive_radius_rejected() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let p = GalaxyParameters {
                radius,
                ..GalaxyParameters::default()
            };
            assert_eq!(p.validate().unwrap_err().invalid_field(), Some("radius"));
        }
    }

    #[test]
    fn odd_but_valid_inputs_accepted() {
        let p = GalaxyParameters {
            spin: -5.0,
            randomness: 0.0,
            randomness_power: 1000.0,
            ..GalaxyParameters::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn non_positive_randomness_power_rejected() {
        for randomness_power in [-1.0, 0.0, f32::NAN, f32::INFINITY] {
            let p = GalaxyParameters {
                randomness_power,
                ..GalaxyParameters::default()
            };
            assert_eq!(
                p.validate().unwrap_err().invalid_field(),
                Some("randomness_power")
            );
        }
    }

    #[test]
    fn non_finite_randomness_and_spin_rejected() {
        for randomness in [f32::NAN, f32::INFINITY, -0.5] {
            let p = GalaxyParameters {
                randomness,
                ..GalaxyParameters::default()
            };
            assert_eq!(p.validate().unwrap_err().invalid_field(), Some("randomness"));
        }
        let p = GalaxyParameters {
            spin: f32::NEG_INFINITY,
            ..GalaxyParameters::default()
        };
        assert_eq!(p.validate().unwrap_err().invalid_field(), Some("spin"));
    }

    #[test]
    fn out_of_range_colors_rejected() {
        let p = GalaxyParameters {
            outside_color: Color::rgb(0.5, f32::NAN, 0.5),
            ..GalaxyParameters::default()
        };
        assert_eq!(
            p.validate().unwrap_err().invalid_field(),
            Some("outside_color")
        );
    }

    #[test]
    fn load_rejects_out_of_range_color() {
        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(tmp, r#"{{"insideColor": [3.0, -2.0, 0.0]}}"#).unwrap();
        let err = GalaxyParameters::load(tmp.path()).unwrap_err();
        assert_eq!(err.invalid_field(), Some("inside_color"));
    }

    #[test]
    fn load_rejects_negative_randomness_power() {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(tmp, "randomnessPower: -2").unwrap();
        let err = GalaxyParameters::load(tmp.path()).unwrap_err();
        assert_eq!(err.invalid_field(), Some("randomness_power"));
    }

    #[test]
    fn save_and_load_json() {
        let tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let p = GalaxyParameters {
            count: 5000,
            spin: -2.5,
            ..GalaxyParameters::default()
        };
        p.save(tmp.path()).unwrap();
        let loaded = GalaxyParameters::load(tmp.path()).unwrap();
        assert_eq!(loaded.count, 5000);
        assert_eq!(loaded.spin, -2.5);
        assert_eq!(loaded.inside_color.to_hex(), "#ff6030");
    }

    #[test]
    fn load_partial_yaml_fills_defaults() {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(tmp, "count: 200\nbranches: 5\ninsideColor: [1.0, 0.0, 0.0]").unwrap();
        let loaded = GalaxyParameters::load(tmp.path()).unwrap();
        assert_eq!(loaded.count, 200);
        assert_eq!(loaded.branches, 5);
        assert_eq!(loaded.inside_color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(loaded.radius, 5.0);
    }

    #[test]
    fn load_rejects_invalid_file_contents() {
        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(tmp, r#"{{"branches": 0}}"#).unwrap();
        let err = GalaxyParameters::load(tmp.path()).unwrap_err();
        assert_eq!(err.invalid_field(), Some("branches"));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let tmp = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            GalaxyParameters::load(tmp.path()),
            Err(GalaxyError::UnsupportedFormat(_))
        ));
    }
}
