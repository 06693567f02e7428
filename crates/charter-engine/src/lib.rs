//! Charter Engine - renders a template tree into a chart
//!
//! The engine walks a template directory, rendering `.tmpl` files through
//! MiniJinja against `{config, version, ports}` and copying everything else
//! verbatim, and returns the result as one flat path-to-bytes map.

pub mod engine;
pub mod error;
pub mod filters;
pub mod functions;

pub use engine::{ChartContext, ChartOutput, Engine, TEMPLATE_EXTENSION};
pub use error::{EngineError, Result};
