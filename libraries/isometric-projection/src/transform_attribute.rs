//! Reading and writing the SVG `transform` attribute of a shape.

use crate::error::TransformParseError;

use glam::{DAffine2, DVec2};
use num_traits::Zero;
use once_cell::sync::Lazy;
use regex::Regex;

/// One `name(arguments)` entry of a transform list.
static FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z]+)\s*\(([^()]*)\)").expect("valid transform function pattern"));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number pattern"));

/// Parses an SVG transform list such as `translate(10, 20) rotate(45)` into a single matrix.
///
/// The functions compose left to right, so the rightmost one is applied to the shape first. An empty attribute is the identity.
pub fn parse_transform(attribute: &str) -> Result<DAffine2, TransformParseError> {
	let mut transform = DAffine2::IDENTITY;
	let mut rest = attribute.trim_start();
	let mut first = true;

	while !rest.is_empty() {
		// Entries after the first may be separated by a single comma
		let entry = if first { rest } else { rest.strip_prefix(',').unwrap_or(rest).trim_start() };
		let Some(captures) = FUNCTION.captures(entry) else { break };
		let (Some(whole), Some(name), Some(arguments)) = (captures.get(0), captures.get(1), captures.get(2)) else { break };

		let arguments = parse_numbers(arguments.as_str())?;
		transform = transform * function_matrix(name.as_str(), &arguments)?;
		rest = entry[whole.end()..].trim_start();
		first = false;
	}

	if !rest.is_empty() {
		return Err(TransformParseError::UnexpectedText(rest.trim_end().to_string()));
	}

	Ok(transform)
}

/// Splits the arguments of one transform function into numbers separated by whitespace and at most one comma.
fn parse_numbers(arguments: &str) -> Result<Vec<f64>, TransformParseError> {
	let mut numbers = Vec::new();
	let mut end = 0;
	for number in NUMBER.find_iter(arguments) {
		let gap = arguments[end..number.start()].trim();
		let separated = if numbers.is_empty() { gap.is_empty() } else { matches!(gap, "" | ",") };
		if !separated {
			return Err(TransformParseError::InvalidNumber(gap.to_string()));
		}
		end = number.end();

		let value = number.as_str().parse::<f64>().map_err(|_| TransformParseError::InvalidNumber(number.as_str().to_string()))?;
		if !value.is_finite() {
			return Err(TransformParseError::InvalidNumber(number.as_str().to_string()));
		}
		numbers.push(value);
	}

	let tail = arguments[end..].trim();
	if !tail.is_empty() {
		return Err(TransformParseError::InvalidNumber(tail.to_string()));
	}

	Ok(numbers)
}

fn function_matrix(name: &str, arguments: &[f64]) -> Result<DAffine2, TransformParseError> {
	let matrix = match (name, arguments) {
		("matrix", &[a, b, c, d, e, f]) => DAffine2::from_cols_array(&[a, b, c, d, e, f]),
		("translate", &[x]) => DAffine2::from_translation(DVec2::new(x, 0.)),
		("translate", &[x, y]) => DAffine2::from_translation(DVec2::new(x, y)),
		("scale", &[scale]) => DAffine2::from_scale(DVec2::splat(scale)),
		("scale", &[x, y]) => DAffine2::from_scale(DVec2::new(x, y)),
		("rotate", &[angle]) => DAffine2::from_angle(angle.to_radians()),
		("rotate", &[angle, x, y]) => {
			let center = DVec2::new(x, y);
			DAffine2::from_translation(center) * DAffine2::from_angle(angle.to_radians()) * DAffine2::from_translation(-center)
		}
		("skewX", &[angle]) => DAffine2::from_cols_array(&[1., 0., angle.to_radians().tan(), 1., 0., 0.]),
		("skewY", &[angle]) => DAffine2::from_cols_array(&[1., angle.to_radians().tan(), 0., 1., 0., 0.]),
		("matrix" | "translate" | "scale" | "rotate" | "skewX" | "skewY", _) => {
			return Err(TransformParseError::ArgumentCount {
				function: name.to_string(),
				count: arguments.len(),
			});
		}
		_ => return Err(TransformParseError::UnknownFunction(name.to_string())),
	};
	Ok(matrix)
}

/// Writes a transform as `matrix(a,b,c,d,e,f)`, or an empty string for the identity.
///
/// Components are written at full precision so that parsing the result gives back exactly the same matrix.
pub fn format_transform(transform: DAffine2) -> String {
	if transform == DAffine2::IDENTITY {
		return String::new();
	}

	let components = transform
		.to_cols_array()
		.iter()
		.map(|&num| if num.is_zero() { "0".to_string() } else { num.to_string() })
		.collect::<Vec<_>>();

	format!("matrix({})", components.join(","))
}
