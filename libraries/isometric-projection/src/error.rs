use thiserror::Error;

/// A set of different errors that can occur while projecting shapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
	/// The angle flattens a cube face onto a line, so its inverse would need a division by zero.
	#[error("the isometric angle {angle}° is degenerate")]
	DegenerateAngle { angle: f64 },
	#[error("shape '{shape}' has a malformed transform attribute: {source}")]
	MalformedExistingTransform {
		shape: String,
		#[source]
		source: TransformParseError,
	},
}

/// Errors produced when reading an SVG `transform` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformParseError {
	#[error("unknown transform function '{0}'")]
	UnknownFunction(String),
	#[error("'{function}' does not accept {count} argument(s)")]
	ArgumentCount { function: String, count: usize },
	#[error("invalid number '{0}'")]
	InvalidNumber(String),
	#[error("unexpected text '{0}'")]
	UnexpectedText(String),
}
