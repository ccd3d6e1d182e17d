//! The pivot (transform center) of a shape.
//!
//! A user may have dragged a shape's rotation center away from the middle of its bounding box. That position is stored on the shape as an offset
//! from the bounding box center with the y axis pointing up, and it has to follow the shape through every projection.

use crate::apply::ShapeNode;

use glam::DVec2;

/// The center of a `[min, max]` bounding box.
pub fn bounding_box_center([min, max]: [DVec2; 2]) -> DVec2 {
	(min + max) / 2.
}

/// The canvas position of the shape's pivot, given the center of its bounding box.
pub fn resolve_pivot(shape: &impl ShapeNode, midpoint: DVec2) -> DVec2 {
	match shape.transform_center() {
		Some(offset) => DVec2::new(midpoint.x + offset.x, midpoint.y - offset.y),
		None => midpoint,
	}
}

/// Stores `new_pivot` relative to `old_midpoint`, but only if the shape already has an overridden pivot.
///
/// A shape without one keeps pivoting around its bounding box center, so nothing is written.
pub fn update_pivot_override(shape: &mut impl ShapeNode, old_midpoint: DVec2, new_pivot: DVec2) {
	if shape.transform_center().is_none() {
		return;
	}

	shape.set_transform_center(DVec2::new(new_pivot.x - old_midpoint.x, old_midpoint.y - new_pivot.y));
}
