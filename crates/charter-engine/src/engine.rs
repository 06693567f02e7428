//! Chart rendering
//!
//! A chart is produced by walking a template tree: `.tmpl` files are rendered
//! against the chart context, everything else is copied through byte for
//! byte, and subtree results are merged under their directory's name. The
//! returned map is flat and never contains the template root as a path
//! segment.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use charter_core::{Config, ContainerPort};

use crate::error::{EngineError, Result};
use crate::filters;
use crate::functions;

/// Extension marking a file for rendering; stripped from the output name
pub const TEMPLATE_EXTENSION: &str = ".tmpl";

/// Flat mapping of output-relative POSIX paths to file content
pub type ChartOutput = IndexMap<String, Vec<u8>>;

/// Everything a chart template can see
#[derive(Debug, Clone, Serialize)]
pub struct ChartContext {
    /// Decoded and interpolated configuration
    pub config: Config,

    /// The chosen version as `major.minor.patch`
    pub version: String,

    /// Declared container ports, in encounter order
    pub ports: Vec<ContainerPort>,
}

/// The chart template engine
pub struct Engine {
    env: Environment<'static>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the chart filter and function set registered
    ///
    /// Undefined variables are strict errors; a chart referencing a context
    /// field that does not exist should fail loudly, not render blanks.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_filter("toyaml", filters::toyaml);
        env.add_filter("tojson", filters::tojson);
        env.add_filter("quote", filters::quote);
        env.add_filter("squote", filters::squote);
        env.add_filter("indent", filters::indent);
        env.add_filter("nindent", filters::nindent);
        env.add_filter("b64encode", filters::b64encode);
        env.add_filter("trunc", filters::trunc);
        env.add_filter("trimprefix", filters::trimprefix);
        env.add_filter("trimsuffix", filters::trimsuffix);

        env.add_function("fail", functions::fail);
        env.add_function("dict", functions::dict);
        env.add_function("list", functions::list);
        env.add_function("coalesce", functions::coalesce);
        env.add_function("ternary", functions::ternary);
        env.add_function("printf", functions::printf);

        Self { env }
    }

    /// Render one template source against a chart context
    pub fn render_str(&self, source: &str, name: &str, context: &ChartContext) -> Result<String> {
        self.env
            .render_str(source, Self::template_value(context))
            .map_err(|source| EngineError::Template {
                name: name.to_string(),
                source,
            })
    }

    /// Render a template tree into a flat output map
    ///
    /// Entries are visited in name order so the output map is deterministic.
    /// Output paths are unique as long as the tree's directory names are
    /// disjoint from its file names; the walk does not deduplicate.
    pub fn render_dir(&self, root: &Path, context: &ChartContext) -> Result<ChartOutput> {
        let ctx = Self::template_value(context);
        self.render_dir_recursive(root, &ctx)
    }

    fn template_value(context: &ChartContext) -> minijinja::Value {
        minijinja::context! {
            config => &context.config,
            version => &context.version,
            ports => &context.ports,
        }
    }

    fn render_dir_recursive(&self, dir: &Path, ctx: &minijinja::Value) -> Result<ChartOutput> {
        let mut out = ChartOutput::new();

        let mut entries = fs::read_dir(dir)
            .map_err(|e| EngineError::io(dir, e))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| EngineError::io(dir, e))?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if path.is_dir() {
                let nested = self.render_dir_recursive(&path, ctx)?;
                for (child_path, content) in nested {
                    out.insert(format!("{name}/{child_path}"), content);
                }
                continue;
            }

            let bytes = fs::read(&path).map_err(|e| EngineError::io(&path, e))?;

            match name.strip_suffix(TEMPLATE_EXTENSION) {
                Some(stripped) => {
                    let source = String::from_utf8(bytes)
                        .map_err(|_| EngineError::NotUtf8 { path: path.clone() })?;
                    let rendered = self
                        .env
                        .render_str(&source, ctx)
                        .map_err(|source| EngineError::Template {
                            name: path.display().to_string(),
                            source,
                        })?;
                    out.insert(stripped.to_string(), rendered.into_bytes());
                }
                None => {
                    out.insert(name, bytes);
                }
            }
        }

        Ok(out)
    }
}
