use crate::apply::{AppliedProjection, ShapeNode, apply_projection};
use crate::consts::{DEFAULT_ORTHO_ANGLE, EMPTY_SELECTION_MESSAGE};
use crate::error::ProjectionError;
use crate::projection::{Conversion, IsometricProjection};

use serde::{Deserialize, Serialize};

/// The user-facing options of an isometric projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
	/// Which cube face to use: `top`, `left` or `right`.
	pub conversion: String,
	/// Flatten an isometric face back to 2D instead of projecting onto it.
	pub reverse: bool,
	/// Isometric angle in degrees.
	pub orthoangle: f64,
}

impl Default for ProjectionOptions {
	fn default() -> Self {
		Self {
			conversion: "top".to_string(),
			reverse: false,
			orthoangle: DEFAULT_ORTHO_ANGLE,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeOutcome {
	pub shape: String,
	pub result: Result<AppliedProjection, ProjectionError>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectionReport {
	/// Nothing was selected so nothing was written; `message` should be shown to the user.
	EmptySelection { message: &'static str },
	/// One outcome per selected shape, in selection order.
	Projected { conversion: Conversion, shapes: Vec<ShapeOutcome> },
}

impl SelectionReport {
	pub fn outcomes(&self) -> &[ShapeOutcome] {
		match self {
			Self::EmptySelection { .. } => &[],
			Self::Projected { shapes, .. } => shapes,
		}
	}

	pub fn failures(&self) -> impl Iterator<Item = (&str, &ProjectionError)> {
		self.outcomes().iter().filter_map(|outcome| outcome.result.as_ref().err().map(|err| (outcome.shape.as_str(), err)))
	}
}

/// Projects every shape of `selection` according to `options`.
///
/// The matrix is built before any shape is touched, so an unusable angle fails the whole call without writing anything.
/// A shape that can't be projected is reported in its [`ShapeOutcome`] and the remaining shapes are still processed.
pub fn project_selection<S: ShapeNode>(options: &ProjectionOptions, selection: impl IntoIterator<Item = S>) -> Result<SelectionReport, ProjectionError> {
	let mut selection = selection.into_iter().peekable();
	if selection.peek().is_none() {
		return Ok(SelectionReport::EmptySelection { message: EMPTY_SELECTION_MESSAGE });
	}

	let conversion = Conversion::resolve(&options.conversion, options.reverse);
	let matrix = IsometricProjection::new(options.orthoangle)?.matrix(conversion)?;

	let shapes = selection
		.map(|mut shape| {
			let result = apply_projection(&mut shape, matrix);
			if let Err(err) = &result {
				error!("{err}");
			}
			ShapeOutcome {
				shape: shape.identifier().to_string(),
				result,
			}
		})
		.collect::<Vec<_>>();

	let failed = shapes.iter().filter(|outcome| outcome.result.is_err()).count();
	info!("Applied {conversion} at {}° to {} of {} shape(s)", options.orthoangle, shapes.len() - failed, shapes.len());

	Ok(SelectionReport::Projected { conversion, shapes })
}
