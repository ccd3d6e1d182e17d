//! A minimal in-memory document holding shapes with SVG-style attributes.

use crate::apply::ShapeNode;
use crate::transform_attribute::parse_transform;

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// A number of shapes and the ids of those currently selected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
	pub shapes: Vec<Shape>,
	/// Shape ids in selection order.
	#[serde(default)]
	pub selection: Vec<String>,
}

impl Document {
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}

	pub fn shape(&self, id: &str) -> Option<&Shape> {
		self.shapes.iter().find(|shape| shape.id == id)
	}

	pub fn select<S: Into<String>>(&mut self, ids: impl IntoIterator<Item = S>) {
		self.selection = ids.into_iter().map(Into::into).collect();
	}

	/// Mutable references to the selected shapes, in selection order.
	///
	/// Ids that don't name a shape, and repeated ids, are skipped.
	pub fn selected_mut(&mut self) -> Vec<&mut Shape> {
		let mut available = self.shapes.iter_mut().map(Some).collect::<Vec<_>>();

		let mut selected = Vec::with_capacity(self.selection.len());
		for id in &self.selection {
			let position = available.iter().position(|slot| slot.as_ref().is_some_and(|shape| shape.id == *id));
			match position.and_then(|index| available[index].take()) {
				Some(shape) => selected.push(shape),
				None => warn!("Selected shape '{id}' is not in the document or was selected twice"),
			}
		}
		selected
	}
}

/// A shape with a rectangular extent and the attributes a projection reads and writes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
	pub id: String,
	/// Corners of the untransformed geometry.
	pub bounds: [DVec2; 2],
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transform: Option<String>,
	#[serde(rename = "inkscape:transform-center-x", default, skip_serializing_if = "Option::is_none")]
	pub transform_center_x: Option<f64>,
	#[serde(rename = "inkscape:transform-center-y", default, skip_serializing_if = "Option::is_none")]
	pub transform_center_y: Option<f64>,
}

impl Shape {
	pub fn new(id: impl Into<String>, bounds: [DVec2; 2]) -> Self {
		Self {
			id: id.into(),
			bounds,
			transform: None,
			transform_center_x: None,
			transform_center_y: None,
		}
	}

	#[must_use]
	pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
		self.transform = Some(transform.into());
		self
	}

	#[must_use]
	pub fn with_transform_center(mut self, center: DVec2) -> Self {
		self.set_transform_center(center);
		self
	}
}

impl ShapeNode for Shape {
	fn identifier(&self) -> &str {
		&self.id
	}

	fn bounding_box(&self) -> [DVec2; 2] {
		let transform = match self.transform.as_deref().map(parse_transform).transpose() {
			Ok(transform) => transform.unwrap_or(DAffine2::IDENTITY),
			Err(err) => {
				warn!("Measuring '{}' without its transform: {err}", self.id);
				DAffine2::IDENTITY
			}
		};

		let [a, b] = self.bounds;
		let corners = [a, DVec2::new(b.x, a.y), b, DVec2::new(a.x, b.y)].map(|corner| transform.transform_point2(corner));
		let min = corners.iter().fold(DVec2::INFINITY, |min, &corner| min.min(corner));
		let max = corners.iter().fold(DVec2::NEG_INFINITY, |max, &corner| max.max(corner));
		[min, max]
	}

	fn transform_attribute(&self) -> Option<&str> {
		self.transform.as_deref()
	}

	fn set_transform_attribute(&mut self, transform: String) {
		self.transform = Some(transform);
	}

	// A lone coordinate counts as an override with the other coordinate at zero
	fn transform_center(&self) -> Option<DVec2> {
		match (self.transform_center_x, self.transform_center_y) {
			(None, None) => None,
			(x, y) => Some(DVec2::new(x.unwrap_or_default(), y.unwrap_or_default())),
		}
	}

	fn set_transform_center(&mut self, center: DVec2) {
		self.transform_center_x = Some(center.x);
		self.transform_center_y = Some(center.y);
	}
}
