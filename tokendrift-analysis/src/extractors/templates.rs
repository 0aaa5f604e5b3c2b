//! Server-side and static-site template classification.
//!
//! Template files are inventoried, not parsed: each file becomes one
//! component named from its filename and tagged with the engine its
//! extension maps to. Longest suffix wins, so `invoice.blade.php` is
//! blade rather than php.

use std::path::Path;

use tokendrift_core::errors::ExtractError;
use tokendrift_core::types::component::{Component, ComponentSource, Dialect};
use tokendrift_core::types::signal::SignalContext;

use crate::parsing::naming::component_name_from_stem;
use crate::signals::SignalCollector;

use super::traits::{FileExtractor, FileOutput};

/// Extension-to-engine table, longest suffix first.
const ENGINES: &[(&str, &str)] = &[
    (".handlebars", "handlebars"),
    (".blade.php", "blade"),
    (".html.erb", "erb"),
    (".erb.html", "erb"),
    (".nunjucks", "nunjucks"),
    (".mustache", "mustache"),
    (".jinja2", "jinja"),
    (".liquid", "liquid"),
    (".cshtml", "razor"),
    (".razor", "razor"),
    (".phtml", "php"),
    (".marko", "marko"),
    (".jinja", "jinja"),
    (".dust", "dust"),
    (".haml", "haml"),
    (".slim", "slim"),
    (".twig", "twig"),
    (".jade", "pug"),
    (".erb", "erb"),
    (".hbs", "handlebars"),
    (".njk", "nunjucks"),
    (".ejs", "ejs"),
    (".pug", "pug"),
    (".ftl", "freemarker"),
    (".tpl", "smarty"),
    (".eta", "eta"),
    (".vm", "velocity"),
    (".j2", "jinja"),
];

/// Classifies template files by extension; no semantic parsing.
pub struct TemplateExtractor {
    engines: Option<Vec<String>>,
}

impl TemplateExtractor {
    pub fn new() -> Self {
        Self { engines: None }
    }

    /// Restrict classification to the named engines; files matching
    /// other engines produce no components.
    pub fn with_engines<I, S>(mut self, engines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engines = Some(engines.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for TemplateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExtractor for TemplateExtractor {
    type Item = Component;

    fn name(&self) -> &'static str {
        "templates"
    }

    fn extract(&self, path: &Path, _source: &str) -> Result<FileOutput<Component>, ExtractError> {
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            return Ok(FileOutput::default());
        };
        let Some((suffix, engine)) = engine_for(file_name) else {
            return Ok(FileOutput::default());
        };
        if self.engines.as_ref().is_some_and(|allow| !allow.iter().any(|e| e == engine)) {
            return Ok(FileOutput::default());
        }
        let name = component_name_from_stem(&file_name[..file_name.len() - suffix.len()]);
        if name.is_empty() {
            return Ok(FileOutput::default());
        }

        let mut collector =
            SignalCollector::new(path, SignalContext::for_dialect(Dialect::Template));
        collector.collect_component_def(&name, 1);

        let mut component = Component::new(
            name,
            ComponentSource {
                dialect: Dialect::Template,
                path: path.to_path_buf(),
                exported_as: None,
                line: 1,
            },
        );
        component.metadata.tags.push(format!("engine:{engine}"));

        Ok(FileOutput::new(vec![component], collector.into_signals()))
    }
}

/// Matched suffix and engine for a file name, longest suffix first.
fn engine_for(file_name: &str) -> Option<(&'static str, &'static str)> {
    let lower = file_name.to_ascii_lowercase();
    ENGINES.iter().copied().find(|(suffix, _)| lower.ends_with(suffix))
}
