use crate::error::ProjectionError;
use crate::pivot::{bounding_box_center, resolve_pivot, update_pivot_override};
use crate::transform_attribute::{format_transform, parse_transform};

use glam::{DAffine2, DVec2};

/// A shape in the host document that can receive a projection.
pub trait ShapeNode {
	/// Identifies the shape in error reports.
	fn identifier(&self) -> &str;
	/// The `[min, max]` canvas-space bounding box, including the shape's own transform.
	fn bounding_box(&self) -> [DVec2; 2];
	fn transform_attribute(&self) -> Option<&str>;
	fn set_transform_attribute(&mut self, transform: String);
	/// The user-placed pivot as an offset from the bounding box center (y up), if any.
	fn transform_center(&self) -> Option<DVec2>;
	fn set_transform_center(&mut self, center: DVec2);
}

// Implementation for mutable references to anything that implements ShapeNode
impl<T: ShapeNode + ?Sized> ShapeNode for &mut T {
	fn identifier(&self) -> &str {
		(**self).identifier()
	}
	fn bounding_box(&self) -> [DVec2; 2] {
		(**self).bounding_box()
	}
	fn transform_attribute(&self) -> Option<&str> {
		(**self).transform_attribute()
	}
	fn set_transform_attribute(&mut self, transform: String) {
		(**self).set_transform_attribute(transform)
	}
	fn transform_center(&self) -> Option<DVec2> {
		(**self).transform_center()
	}
	fn set_transform_center(&mut self, center: DVec2) {
		(**self).set_transform_center(center)
	}
}

/// What was written to a shape by [`apply_projection`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedProjection {
	/// The shape's new transform attribute.
	pub transform: DAffine2,
	/// The canvas position the shape pivots around, identical before and after.
	pub pivot: DVec2,
}

/// The shape's existing transform, or the identity if it has none.
pub fn existing_transform(shape: &impl ShapeNode) -> Result<DAffine2, ProjectionError> {
	let Some(attribute) = shape.transform_attribute() else { return Ok(DAffine2::IDENTITY) };

	parse_transform(attribute).map_err(|source| ProjectionError::MalformedExistingTransform {
		shape: shape.identifier().to_string(),
		source,
	})
}

/// Applies `projection` on top of the shape's existing transform, then translates the result so the shape's pivot stays where it was.
pub fn apply_projection(shape: &mut impl ShapeNode, projection: DAffine2) -> Result<AppliedProjection, ProjectionError> {
	let existing = existing_transform(&*shape)?;

	let old_midpoint = bounding_box_center(shape.bounding_box());
	let old_pivot = resolve_pivot(&*shape, old_midpoint);

	// The existing transform maps the shape onto the canvas first, the projection acts on the result
	let transform = projection * existing;

	// The bounding box is already in canvas space, so its points are only moved by the projection
	let new_pivot = projection.transform_point2(old_pivot);
	let new_midpoint = projection.transform_point2(old_midpoint);

	let transform = DAffine2::from_translation(old_pivot - new_pivot) * transform;
	shape.set_transform_attribute(format_transform(transform));

	update_pivot_override(shape, new_midpoint, new_pivot);

	debug!("Projected '{}' around {old_pivot}: {transform}", shape.identifier());
	Ok(AppliedProjection { transform, pivot: old_pivot })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::Shape;
	use crate::projection::{IsometricProjection, ProjectionDirection};

	const EPSILON: f64 = 1e-9;

	fn square() -> Shape {
		Shape::new("square", [DVec2::new(90., 90.), DVec2::new(110., 110.)])
	}

	#[test]
	fn pivot_stays_in_place() {
		let projection = IsometricProjection::new(15.).unwrap();
		let mut shape = square();

		let applied = apply_projection(&mut shape, projection.forward(ProjectionDirection::Top)).unwrap();

		assert_eq!(applied.pivot, DVec2::new(100., 100.));
		assert!(applied.transform.transform_point2(applied.pivot).abs_diff_eq(applied.pivot, EPSILON));
		assert!(bounding_box_center(shape.bounding_box()).abs_diff_eq(DVec2::new(100., 100.), 1e-6));
		assert_eq!(shape.transform_center(), None);
	}

	#[test]
	fn projection_composes_on_top_of_existing_transform() {
		let projection = IsometricProjection::new(30.).unwrap().forward(ProjectionDirection::Left);
		let existing = DAffine2::from_translation(DVec2::new(40., -10.)) * DAffine2::from_scale(DVec2::splat(2.));
		let mut shape = square().with_transform("translate(40,-10) scale(2)");

		let applied = apply_projection(&mut shape, projection).unwrap();

		// The linear part is the projection applied after the existing transform
		assert!(applied.transform.matrix2.abs_diff_eq((projection * existing).matrix2, EPSILON));
		let canvas_point = existing.transform_point2(DVec2::new(95., 105.));
		let expected = projection.transform_point2(canvas_point - applied.pivot) + applied.pivot;
		assert!(applied.transform.transform_point2(DVec2::new(95., 105.)).abs_diff_eq(expected, 1e-6));
	}

	#[test]
	fn overridden_pivot_is_kept_and_tracked() {
		let projection = IsometricProjection::new(15.).unwrap().forward(ProjectionDirection::Right);
		let mut shape = square().with_transform_center(DVec2::new(10., -10.));

		let applied = apply_projection(&mut shape, projection).unwrap();

		assert_eq!(applied.pivot, DVec2::new(110., 110.));
		assert!(applied.transform.transform_point2(applied.pivot).abs_diff_eq(applied.pivot, EPSILON));

		// The stored offset must still resolve to the same canvas position
		let midpoint = bounding_box_center(shape.bounding_box());
		assert!(resolve_pivot(&shape, midpoint).abs_diff_eq(applied.pivot, 1e-6));
	}

	#[test]
	fn tiny_existing_scale_keeps_pivot_and_precision() {
		let projection = IsometricProjection::new(15.).unwrap().forward(ProjectionDirection::Top);
		let mut shape = Shape::new("tiny", [DVec2::ZERO, DVec2::splat(1e10)]).with_transform("scale(1e-9)");
		let before = resolve_pivot(&shape, bounding_box_center(shape.bounding_box()));
		assert!(before.abs_diff_eq(DVec2::splat(5.), EPSILON));

		let applied = apply_projection(&mut shape, projection).unwrap();

		// What was written is exactly what was reported
		assert_eq!(parse_transform(shape.transform_attribute().unwrap()), Ok(applied.transform));
		assert!(applied.transform.matrix2.abs_diff_eq((projection * DAffine2::from_scale(DVec2::splat(1e-9))).matrix2, 1e-24));
		assert!(applied.transform.matrix2.determinant() > 0.);

		let after = resolve_pivot(&shape, bounding_box_center(shape.bounding_box()));
		assert!(after.abs_diff_eq(before, 1e-6), "pivot moved from {before} to {after}");
	}

	#[test]
	fn malformed_transform_leaves_shape_untouched() {
		let mut shape = square().with_transform("rotate(").with_transform_center(DVec2::ONE);
		let before = shape.clone();

		let result = apply_projection(&mut shape, DAffine2::IDENTITY);

		assert!(matches!(result, Err(ProjectionError::MalformedExistingTransform { shape: ref id, .. }) if id == "square"));
		assert_eq!(shape, before);
	}
}
