// PROJECTION
/// Angle in degrees used when no `orthoangle` option is given.
pub const DEFAULT_ORTHO_ANGLE: f64 = 15.;
/// Below this magnitude a cosine (or a matrix determinant) is treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

// SELECTION
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select an object to perform the isometric projection transformation on.";

