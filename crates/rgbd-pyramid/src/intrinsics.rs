use serde::{Deserialize, Serialize};

/// Intrinsic parameters of a pinhole camera with square pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinholeIntrinsics {
    /// The focal length in pixels.
    pub f: f64,
    /// The x coordinate of the optical center in pixels.
    pub cx: f64,
    /// The y coordinate of the optical center in pixels.
    pub cy: f64,
}

impl PinholeIntrinsics {
    /// Creates a new PinholeIntrinsics with the given parameters.
    pub fn new(f: f64, cx: f64, cy: f64) -> Self {
        Self { f, cx, cy }
    }

    /// Intrinsics of the same camera at half the resolution.
    pub fn halved(&self) -> Self {
        Self {
            f: self.f * 0.5,
            cx: self.cx * 0.5,
            cy: self.cy * 0.5,
        }
    }

    /// Returns the camera matrix as a 3x3 array.
    pub fn camera_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.f, 0.0, self.cx],
            [0.0, self.f, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }
}

/// How the intrinsics of one level are derived from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrinsicsScaling {
    /// Every level reports the base intrinsics unchanged.
    #[default]
    Fixed,
    /// Focal length and optical center are halved with each level.
    Halve,
}

impl IntrinsicsScaling {
    /// Intrinsics for the level following one described by `current`.
    pub fn next_level(&self, current: &PinholeIntrinsics) -> PinholeIntrinsics {
        match self {
            IntrinsicsScaling::Fixed => *current,
            IntrinsicsScaling::Halve => current.halved(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_matrix() {
        let k = PinholeIntrinsics::new(525.0, 319.5, 239.5);
        let m = k.camera_matrix();
        assert_eq!(m[0], [525.0, 0.0, 319.5]);
        assert_eq!(m[1], [0.0, 525.0, 239.5]);
        assert_eq!(m[2], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_next_level() {
        let k = PinholeIntrinsics::new(525.0, 319.5, 239.5);

        assert_eq!(IntrinsicsScaling::Fixed.next_level(&k), k);

        let half = IntrinsicsScaling::Halve.next_level(&k);
        assert_relative_eq!(half.f, 262.5);
        assert_relative_eq!(half.cx, 159.75);
        assert_relative_eq!(half.cy, 119.75);
    }

    #[test]
    fn test_intrinsics_serde() -> Result<(), serde_json::Error> {
        let k: PinholeIntrinsics = serde_json::from_str(r#"{"f": 10.0, "cx": 4.0, "cy": 3.0}"#)?;
        assert_eq!(k, PinholeIntrinsics::new(10.0, 4.0, 3.0));

        let scaling: IntrinsicsScaling = serde_json::from_str("\"halve\"")?;
        assert_eq!(scaling, IntrinsicsScaling::Halve);

        Ok(())
    }
}
