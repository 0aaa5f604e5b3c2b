//! Lit web-component extraction.
//!
//! Components are `@customElement('tag')` classes or subclasses of a
//! recognized base (`LitElement` by default, extendable through source
//! flags). `@property` fields become props; reactive controllers,
//! context providers/consumers, and signal-watching mixins are
//! summarized as tags. Tagged `css` templates and rendered custom
//! elements feed hardcoded values and dependencies.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tokendrift_core::errors::ExtractError;
use tokendrift_core::types::component::{Component, ComponentSource, Dialect};
use tokendrift_core::types::signal::{SignalContext, SignalScope};

use crate::parsing::comments::{deprecated_above, doc_block_above, line_of_offset};
use crate::signals::SignalCollector;

use super::dependencies::{
    custom_element_tag_occurrences, heritage_dependencies, imports_package,
};
use super::fields::{
    class_declaration_after, class_declarations, class_extents, decorator_args, decorator_offsets,
    field_after, object_entry, prop_from_field, string_literal,
};
use super::style_values::{
    css_declarations, offset_in, template_regions, var_references, StyleSink,
};
use super::traits::{FileExtractor, FileOutput};
use super::variants::variants_from_props;

static CONTROLLER_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"new\s+([A-Za-z_$][\w$]*Controller)\s*\(\s*this\b").expect("controller pattern")
});

struct LitDetection {
    name: String,
    /// Anchor for line numbers and doc lookup: the decorator, or the
    /// class name for undecorated subclasses.
    offset: usize,
    exported: bool,
    tag: Option<String>,
    heritage_names: Vec<String>,
    signal_reactive: bool,
    body: (usize, usize),
}

/// Extracts Lit components from `.ts` / `.js` sources.
pub struct LitExtractor {
    design_system_package: Option<String>,
    base_classes: Vec<String>,
}

impl LitExtractor {
    pub fn new() -> Self {
        Self { design_system_package: None, base_classes: vec!["LitElement".to_string()] }
    }

    /// Components importing from `package` get tagged `design-system`.
    pub fn with_design_system(mut self, package: impl Into<String>) -> Self {
        self.design_system_package = Some(package.into());
        self
    }

    /// Additional base classes that mark a subclass as a component;
    /// design systems often ship their own `LitElement` wrapper.
    pub fn with_base_classes<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_classes.extend(bases.into_iter().map(Into::into));
        self
    }
}

impl Default for LitExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExtractor for LitExtractor {
    type Item = Component;

    fn name(&self) -> &'static str {
        "lit"
    }

    fn extract(&self, path: &Path, source: &str) -> Result<FileOutput<Component>, ExtractError> {
        let mut output = FileOutput::default();
        let mut collector = SignalCollector::new(path, SignalContext::for_dialect(Dialect::Lit));
        let is_design_system = self
            .design_system_package
            .as_deref()
            .is_some_and(|pkg| imports_package(source, pkg));

        let mut detections: Vec<LitDetection> = Vec::new();
        for at in decorator_offsets(source, "@customElement") {
            let (args, after) = decorator_args(source, at);
            let Some((name, exported, name_end)) = class_declaration_after(source, after) else {
                continue;
            };
            if detections.iter().any(|d| d.name == name) {
                continue;
            }
            let tag = args.and_then(string_literal).map(str::to_string);
            if let Some(det) = detection_at(source, at, name_end, name, exported, tag) {
                detections.push(det);
            }
        }
        for decl in class_declarations(source) {
            if detections.iter().any(|d| d.name == decl.name) {
                continue;
            }
            let Some(det) = detection_at(
                source,
                decl.name_start,
                decl.name_end,
                decl.name,
                decl.exported,
                None,
            ) else {
                continue;
            };
            if det.heritage_names.iter().any(|h| self.base_classes.contains(h)) {
                detections.push(det);
            }
        }

        let mut sinks: Vec<StyleSink> = detections.iter().map(|_| StyleSink::new()).collect();
        let mut rendered_tags: Vec<Vec<String>> = detections.iter().map(|_| Vec::new()).collect();

        // css template literals; module-level shared styles attach to
        // the first component.
        collector.set_scope(SignalScope::Component);
        for region in template_regions(source, "css") {
            let at = offset_in(source, region);
            let target = detections
                .iter()
                .position(|d| d.body.0 <= at && at < d.body.1)
                .unwrap_or(0);
            for (prop, value, line) in css_declarations(source, region) {
                if let Some(sink) = sinks.get_mut(target) {
                    sink.record(&prop, value, line);
                }
                collector.collect_from_value(&prop, value, line);
                for token in var_references(value) {
                    collector.collect_token_usage(token, line);
                }
            }
        }
        collector.set_scope(SignalScope::Global);

        for region in template_regions(source, "html") {
            let at = offset_in(source, region);
            let target = detections
                .iter()
                .position(|d| d.body.0 <= at && at < d.body.1)
                .unwrap_or(0);
            for (tag_name, tag_at) in custom_element_tag_occurrences(region) {
                collector.collect_component_usage(&tag_name, line_of_offset(source, at + tag_at));
                if let Some(tags) = rendered_tags.get_mut(target) {
                    if !tags.contains(&tag_name) {
                        tags.push(tag_name);
                    }
                }
            }
        }

        for ((det, sink), rendered) in detections.iter().zip(sinks).zip(rendered_tags) {
            let body = &source[det.body.0..det.body.1];
            let line = line_of_offset(source, det.offset);

            let mut props = Vec::new();
            for prop_at in decorator_offsets(body, "@property") {
                let (args, end) = decorator_args(body, prop_at);
                if let Some(field) = field_after(body, end) {
                    let mut prop = prop_from_field(&field);
                    if prop.type_text.is_none() {
                        prop.type_text =
                            args.and_then(|a| object_entry(a, "type")).map(str::to_string);
                    }
                    prop.description = doc_block_above(body, prop_at);
                    props.push(prop);
                }
            }

            let mut component = Component::new(
                det.name.clone(),
                ComponentSource {
                    dialect: Dialect::Lit,
                    path: path.to_path_buf(),
                    exported_as: det.exported.then(|| det.name.clone()),
                    line,
                },
            );
            component.variants = variants_from_props(&props);
            component.props = props;

            let mut deps: Vec<String> = det
                .heritage_names
                .iter()
                .filter(|h| !self.base_classes.contains(h) && h.as_str() != "SignalWatcher")
                .cloned()
                .collect();
            for tag_name in rendered {
                if Some(tag_name.as_str()) != det.tag.as_deref() && !deps.contains(&tag_name) {
                    deps.push(tag_name);
                }
            }
            component.dependencies = deps;

            component.metadata.documented = doc_block_above(source, det.offset).is_some();
            component.metadata.deprecated = deprecated_above(source, det.offset);
            if let Some(tag) = &det.tag {
                component.metadata.tags.push(format!("tag:{tag}"));
            }
            for (label, n) in [
                ("states", decorator_offsets(body, "@state").len()),
                ("queries", decorator_offsets(body, "@query").len()),
                ("provides", decorator_offsets(body, "@provide").len()),
                ("consumes", decorator_offsets(body, "@consume").len()),
            ] {
                if n > 0 {
                    component.metadata.tags.push(format!("{label}:{n}"));
                }
            }
            for caps in CONTROLLER_CALL.captures_iter(body) {
                if let Some(name) = caps.get(1) {
                    let tag = format!("controller:{}", name.as_str());
                    if !component.metadata.tags.contains(&tag) {
                        component.metadata.tags.push(tag);
                    }
                }
            }
            if det.signal_reactive {
                component.metadata.tags.push("signal-reactive".into());
            }
            if is_design_system {
                component.metadata.tags.push("design-system".into());
            }
            component.metadata.hardcoded_values = sink.finish();

            collector.collect_component_def(&det.name, line);
            output.items.push(component);
        }

        output.signals = collector.into_signals();
        Ok(output)
    }
}

fn detection_at(
    source: &str,
    anchor: usize,
    name_end: usize,
    name: String,
    exported: bool,
    tag: Option<String>,
) -> Option<LitDetection> {
    let (heritage, body) = class_extents(source, name_end)?;
    let heritage = &source[heritage];
    Some(LitDetection {
        name,
        offset: anchor,
        exported,
        tag,
        heritage_names: heritage_dependencies(heritage),
        signal_reactive: heritage.contains("SignalWatcher("),
        body: (body.start, body.end),
    })
}
