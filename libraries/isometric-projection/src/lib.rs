// `macro_use` puts the log macros (`error!`, `warn!`, `debug!`, `info!` and `trace!`) in scope for the crate
#[macro_use]
extern crate log;

pub mod apply;
pub mod consts;
pub mod document;
pub mod error;
pub mod pivot;
pub mod projection;
pub mod selection;
pub mod transform_attribute;

pub use apply::{AppliedProjection, ShapeNode, apply_projection};
pub use error::{ProjectionError, TransformParseError};
pub use projection::{Conversion, IsometricProjection, ProjectionDirection, ProjectionMode};
pub use selection::{ProjectionOptions, SelectionReport, ShapeOutcome, project_selection};
