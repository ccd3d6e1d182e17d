//! Derives the affine matrices that map a flat drawing onto one of the three visible faces of an isometric cube, and back.
//!
//! All matrices come from a single angle. The bottom row of each 3×3 matrix is always `[0, 0, 1]` so they are stored as [`DAffine2`].

use crate::consts::DEGENERATE_EPSILON;
use crate::error::ProjectionError;

use glam::DAffine2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The cube face a flat drawing is projected onto.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionDirection {
	#[default]
	Top,
	Left,
	Right,
}

impl ProjectionDirection {
	pub const ALL: [Self; 3] = [Self::Top, Self::Left, Self::Right];

	/// Matches the exact lowercase identifier, so `"Left"` or `" left"` are not recognized.
	pub fn from_identifier(identifier: &str) -> Option<Self> {
		match identifier {
			"top" => Some(Self::Top),
			"left" => Some(Self::Left),
			"right" => Some(Self::Right),
			_ => None,
		}
	}

	pub fn identifier(&self) -> &'static str {
		match self {
			Self::Top => "top",
			Self::Left => "left",
			Self::Right => "right",
		}
	}
}

impl fmt::Display for ProjectionDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.identifier())
	}
}

/// Whether a drawing is projected onto the face (`Forward`) or flattened back out of it (`Inverse`).
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProjectionMode {
	#[default]
	Forward,
	Inverse,
}

/// A direction together with a mode, named `to_<direction>` or `from_<direction>`.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
	pub direction: ProjectionDirection,
	pub mode: ProjectionMode,
}

impl Conversion {
	pub fn new(direction: ProjectionDirection, reverse: bool) -> Self {
		let mode = if reverse { ProjectionMode::Inverse } else { ProjectionMode::Forward };
		Self { direction, mode }
	}

	/// Resolves the user-facing `conversion` option. An unrecognized direction falls back to `to_top`, ignoring `reverse`.
	pub fn resolve(conversion: &str, reverse: bool) -> Self {
		match ProjectionDirection::from_identifier(conversion) {
			Some(direction) => Self::new(direction, reverse),
			None => {
				warn!("Unrecognized conversion '{conversion}', defaulting to {}", Self::default());
				Self::default()
			}
		}
	}
}

impl fmt::Display for Conversion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let prefix = match self.mode {
			ProjectionMode::Forward => "to",
			ProjectionMode::Inverse => "from",
		};
		write!(f, "{prefix}_{}", self.direction)
	}
}

/// The matrices derived from one isometric angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsometricProjection {
	angle: f64,
	to_top: DAffine2,
	to_left: DAffine2,
	to_right: DAffine2,
}

impl IsometricProjection {
	/// Derives the forward matrices for `angle` (in degrees).
	///
	/// Fails with [`ProjectionError::DegenerateAngle`] when the cosine of the angle is zero, since the side faces would then collapse onto a line and their inverses need `1 / cos`.
	pub fn new(angle: f64) -> Result<Self, ProjectionError> {
		if !angle.is_finite() {
			return Err(ProjectionError::DegenerateAngle { angle });
		}

		let (sin, cos) = angle.to_radians().sin_cos();
		if cos.abs() < DEGENERATE_EPSILON {
			return Err(ProjectionError::DegenerateAngle { angle });
		}

		// Columns are [a, b, c, d, e, f] for x' = a·x + c·y + e and y' = b·x + d·y + f
		Ok(Self {
			angle,
			// Scale vertically by cos, shear horizontally by -angle, then rotate clockwise by angle
			to_top: DAffine2::from_cols_array(&[cos, sin, -cos, sin, 0., 0.]),
			// Scale horizontally by cos, shear vertically by -angle
			to_left: DAffine2::from_cols_array(&[cos, sin, 0., 1., 0., 0.]),
			// Scale horizontally by cos, shear vertically by angle
			to_right: DAffine2::from_cols_array(&[cos, -sin, 0., 1., 0., 0.]),
		})
	}

	pub fn forward(&self, direction: ProjectionDirection) -> DAffine2 {
		match direction {
			ProjectionDirection::Top => self.to_top,
			ProjectionDirection::Left => self.to_left,
			ProjectionDirection::Right => self.to_right,
		}
	}

	/// The exact inverse of [`Self::forward`], flattening an isometric face back to 2D.
	pub fn inverse(&self, direction: ProjectionDirection) -> Result<DAffine2, ProjectionError> {
		let forward = self.forward(direction);
		// `to_top` loses a dimension when sin is zero as well
		if forward.matrix2.determinant().abs() < DEGENERATE_EPSILON {
			return Err(ProjectionError::DegenerateAngle { angle: self.angle });
		}
		Ok(forward.inverse())
	}

	pub fn matrix(&self, conversion: Conversion) -> Result<DAffine2, ProjectionError> {
		let matrix = match conversion.mode {
			ProjectionMode::Forward => self.forward(conversion.direction),
			ProjectionMode::Inverse => self.inverse(conversion.direction)?,
		};
		debug!("{conversion} at {}°: {matrix}", self.angle);
		Ok(matrix)
	}

	/// All six named matrices, skipping inverses that do not exist for this angle.
	pub fn matrices(&self) -> impl Iterator<Item = (Conversion, DAffine2)> + '_ {
		ProjectionDirection::ALL
			.into_iter()
			.flat_map(|direction| [Conversion::new(direction, false), Conversion::new(direction, true)])
			.filter_map(|conversion| self.matrix(conversion).ok().map(|matrix| (conversion, matrix)))
	}
}
