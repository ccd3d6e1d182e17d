use glam::{DAffine2, DVec2};
use isometric_projection::consts::EMPTY_SELECTION_MESSAGE;
use isometric_projection::document::{Document, Shape};
use isometric_projection::pivot::{bounding_box_center, resolve_pivot};
use isometric_projection::transform_attribute::parse_transform;
use isometric_projection::{IsometricProjection, ProjectionDirection, ProjectionError, ProjectionOptions, SelectionReport, ShapeNode, project_selection};

const TOLERANCE: f64 = 1e-6;

fn options(conversion: ProjectionDirection, reverse: bool, orthoangle: f64) -> ProjectionOptions {
	ProjectionOptions {
		conversion: conversion.to_string(),
		reverse,
		orthoangle,
	}
}

fn single_shape_document(shape: Shape) -> Document {
	let id = shape.id.clone();
	let mut document = Document { shapes: vec![shape], selection: Vec::new() };
	document.select([id]);
	document
}

fn transform_of(shape: &Shape) -> DAffine2 {
	parse_transform(shape.transform.as_deref().unwrap_or_default()).unwrap()
}

fn canvas_pivot(shape: &Shape) -> DVec2 {
	resolve_pivot(shape, bounding_box_center(shape.bounding_box()))
}

#[test]
fn top_projection_keeps_rectangle_centered() {
	let rectangle = Shape::new("rect", [DVec2::new(60., 80.), DVec2::new(140., 120.)]);
	let mut document = single_shape_document(rectangle);

	let report = project_selection(&options(ProjectionDirection::Top, false, 15.), document.selected_mut()).unwrap();
	assert_eq!(report.failures().count(), 0);

	let transform = transform_of(&document.shapes[0]);
	let center = DVec2::new(100., 100.);
	assert!(transform.transform_point2(center).abs_diff_eq(center, TOLERANCE));

	let to_top = IsometricProjection::new(15.).unwrap().forward(ProjectionDirection::Top);
	let expected = DAffine2::from_translation(center - to_top.transform_point2(center)) * to_top;
	assert!(transform.abs_diff_eq(expected, 1e-9), "{transform} != {expected}");
}

#[test]
fn empty_selection_writes_nothing() {
	let mut document = single_shape_document(Shape::new("rect", [DVec2::ZERO, DVec2::ONE]));
	document.select(Vec::<String>::new());
	let before = document.clone();

	let report = project_selection(&ProjectionOptions::default(), document.selected_mut()).unwrap();

	assert_eq!(report, SelectionReport::EmptySelection { message: EMPTY_SELECTION_MESSAGE });
	assert_eq!(document, before);
}

#[test]
fn degenerate_angle_fails_before_any_write() {
	let mut document = Document {
		shapes: vec![
			Shape::new("plain", [DVec2::ZERO, DVec2::splat(10.)]),
			Shape::new("moved", [DVec2::ZERO, DVec2::splat(10.)]).with_transform("translate(3 4)").with_transform_center(DVec2::new(1., 1.)),
		],
		selection: Vec::new(),
	};
	document.select(["plain", "moved"]);
	let before = document.to_json().unwrap();

	let result = project_selection(&options(ProjectionDirection::Left, false, 90.), document.selected_mut());

	assert_eq!(result, Err(ProjectionError::DegenerateAngle { angle: 90. }));
	assert_eq!(document.to_json().unwrap(), before);
}

#[test]
fn corrupted_shape_does_not_block_the_others() {
	let mut document = Document {
		shapes: vec![
			Shape::new("good", [DVec2::ZERO, DVec2::splat(10.)]),
			Shape::new("corrupted", [DVec2::ZERO, DVec2::splat(10.)]).with_transform("matrix(1, 0, 0)"),
			Shape::new("also-good", [DVec2::splat(20.), DVec2::splat(30.)]),
		],
		selection: Vec::new(),
	};
	document.select(["good", "corrupted", "also-good"]);

	let report = project_selection(&options(ProjectionDirection::Right, false, 30.), document.selected_mut()).unwrap();

	let failures = report.failures().collect::<Vec<_>>();
	assert_eq!(failures.len(), 1);
	assert_eq!(failures[0].0, "corrupted");
	assert!(matches!(failures[0].1, ProjectionError::MalformedExistingTransform { shape, .. } if shape == "corrupted"));

	assert!(document.shape("good").unwrap().transform.is_some());
	assert!(document.shape("also-good").unwrap().transform.is_some());
	assert_eq!(document.shape("corrupted").unwrap().transform.as_deref(), Some("matrix(1, 0, 0)"));
}

#[test]
fn inverse_projection_restores_shapes() {
	let shapes = [
		Shape::new("plain", [DVec2::new(10., 20.), DVec2::new(50., 40.)]),
		Shape::new("rotated", [DVec2::new(-5., -5.), DVec2::new(15., 25.)]).with_transform("rotate(20) translate(5,5)"),
		Shape::new("pivoted", [DVec2::new(0., 0.), DVec2::new(30., 10.)])
			.with_transform("matrix(1.5 0 0.2 1 40 -12)")
			.with_transform_center(DVec2::new(7.5, -2.)),
	];

	for angle in [15., 30., 45., 60.] {
		for direction in ProjectionDirection::ALL {
			let mut document = Document {
				shapes: shapes.to_vec(),
				selection: shapes.iter().map(|shape| shape.id.clone()).collect(),
			};
			let pivots = document.shapes.iter().map(canvas_pivot).collect::<Vec<_>>();

			project_selection(&options(direction, false, angle), document.selected_mut()).unwrap();
			for (shape, pivot) in document.shapes.iter().zip(&pivots) {
				assert!(canvas_pivot(shape).abs_diff_eq(*pivot, TOLERANCE), "'{}' pivot moved after to_{direction} at {angle}°", shape.id);
			}

			project_selection(&options(direction, true, angle), document.selected_mut()).unwrap();
			for ((shape, original), pivot) in document.shapes.iter().zip(&shapes).zip(&pivots) {
				assert!(canvas_pivot(shape).abs_diff_eq(*pivot, TOLERANCE), "'{}' pivot moved after from_{direction} at {angle}°", shape.id);
				assert!(
					transform_of(shape).abs_diff_eq(transform_of(original), TOLERANCE),
					"'{}' was not restored by from_{direction} at {angle}°",
					shape.id
				);

				match (shape.transform_center(), original.transform_center()) {
					(Some(center), Some(original_center)) => assert!(center.abs_diff_eq(original_center, TOLERANCE)),
					(center, original_center) => assert_eq!(center, original_center),
				}
			}
		}
	}
}
