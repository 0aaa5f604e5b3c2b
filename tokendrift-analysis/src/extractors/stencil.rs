//! Stencil web-component extraction.
//!
//! Components are classes carrying a `@Component({ tag })` decorator.
//! Props come from `@Prop` fields; `@State`/`@Event`/`@Method`/`@Element`
//! usage is summarized as tags. Inline `styles` in the decorator config
//! and JSX `style={{…}}` objects feed hardcoded-value extraction.

use std::path::Path;

use tokendrift_core::errors::ExtractError;
use tokendrift_core::types::component::{Component, ComponentSource, Dialect};
use tokendrift_core::types::signal::{SignalContext, SignalScope};

use crate::parsing::balanced::extract_balanced;
use crate::parsing::comments::{deprecated_above, doc_block_above, line_of_offset};
use crate::signals::SignalCollector;

use super::dependencies::{
    capital_tag_occurrences, custom_element_tag_occurrences, heritage_dependencies,
    imports_package,
};
use super::fields::{
    class_declaration_after, class_extents, decorator_args, decorator_offsets, field_after,
    object_string_entry, prop_from_field,
};
use super::style_values::{
    css_declarations, offset_in, style_object_entries, var_references, StyleSink,
    STYLE_OBJECT_OPEN,
};
use super::traits::{FileExtractor, FileOutput};
use super::variants::variants_from_props;

/// Extracts `@Component`-decorated classes from Stencil sources.
pub struct StencilExtractor {
    design_system_package: Option<String>,
}

impl StencilExtractor {
    pub fn new() -> Self {
        Self { design_system_package: None }
    }

    /// Components importing from `package` get tagged `design-system`.
    pub fn with_design_system(mut self, package: impl Into<String>) -> Self {
        self.design_system_package = Some(package.into());
        self
    }
}

impl Default for StencilExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExtractor for StencilExtractor {
    type Item = Component;

    fn name(&self) -> &'static str {
        "stencil"
    }

    fn extract(&self, path: &Path, source: &str) -> Result<FileOutput<Component>, ExtractError> {
        let mut output = FileOutput::default();
        let mut collector =
            SignalCollector::new(path, SignalContext::for_dialect(Dialect::Stencil));
        let is_design_system = self
            .design_system_package
            .as_deref()
            .is_some_and(|pkg| imports_package(source, pkg));

        for at in decorator_offsets(source, "@Component") {
            let (args, after) = decorator_args(source, at);
            let Some((class_name, exported, name_end)) = class_declaration_after(source, after)
            else {
                continue;
            };

            let Some((heritage, body)) = class_extents(source, name_end) else { continue };
            let heritage = &source[heritage];
            let body = &source[body];

            let mut sink = StyleSink::new();
            let tag = args.and_then(|a| object_string_entry(a, "tag")).map(str::to_string);

            // Inline component styles declared in the decorator config.
            if let Some(css) = args.and_then(|a| object_string_entry(a, "styles")) {
                collector.set_scope(SignalScope::Component);
                for (prop, value, line) in css_declarations(source, css) {
                    sink.record(&prop, value, line);
                    collector.collect_from_value(&prop, value, line);
                    for token in var_references(value) {
                        collector.collect_token_usage(token, line);
                    }
                }
            }

            collector.set_scope(SignalScope::Inline);
            for m in STYLE_OBJECT_OPEN.find_iter(body) {
                let Some(obj) = extract_balanced(body, m.end() - 1) else { continue };
                for (prop, value, line) in style_object_entries(source, obj) {
                    sink.record(&prop, &value, line);
                    collector.collect_from_value(&prop, &value, line);
                    for token in var_references(&value) {
                        collector.collect_token_usage(token, line);
                    }
                }
            }
            collector.set_scope(SignalScope::Global);

            let mut props = Vec::new();
            for prop_at in decorator_offsets(body, "@Prop") {
                let (_, end) = decorator_args(body, prop_at);
                if let Some(field) = field_after(body, end) {
                    let mut prop = prop_from_field(&field);
                    prop.description = doc_block_above(body, prop_at);
                    props.push(prop);
                }
            }

            let mut deps = heritage_dependencies(heritage);
            for (tag_name, tag_at) in custom_element_tag_occurrences(body) {
                let line = line_of_offset(source, offset_in(source, body) + tag_at);
                collector.collect_component_usage(&tag_name, line);
                if Some(tag_name.as_str()) != tag.as_deref() && !deps.contains(&tag_name) {
                    deps.push(tag_name);
                }
            }
            for (tag_name, tag_at) in capital_tag_occurrences(body) {
                let line = line_of_offset(source, offset_in(source, body) + tag_at);
                collector.collect_component_usage(&tag_name, line);
                if tag_name != class_name && !deps.contains(&tag_name) {
                    deps.push(tag_name);
                }
            }

            let line = line_of_offset(source, at);
            let mut component = Component::new(
                class_name.clone(),
                ComponentSource {
                    dialect: Dialect::Stencil,
                    path: path.to_path_buf(),
                    exported_as: exported.then(|| class_name.clone()),
                    line,
                },
            );
            component.variants = variants_from_props(&props);
            component.props = props;
            component.dependencies = deps;
            component.metadata.documented = doc_block_above(source, at).is_some();
            component.metadata.deprecated = deprecated_above(source, at);
            if let Some(tag) = &tag {
                component.metadata.tags.push(format!("tag:{tag}"));
            }
            for (label, n) in [
                ("states", decorator_offsets(body, "@State").len()),
                ("events", decorator_offsets(body, "@Event").len()),
                ("methods", decorator_offsets(body, "@Method").len()),
                ("element-refs", decorator_offsets(body, "@Element").len()),
            ] {
                if n > 0 {
                    component.metadata.tags.push(format!("{label}:{n}"));
                }
            }
            if is_design_system {
                component.metadata.tags.push("design-system".into());
            }
            component.metadata.hardcoded_values = sink.finish();

            collector.collect_component_def(&class_name, line);
            output.items.push(component);
        }

        output.signals = collector.into_signals();
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tokendrift_core::types::signal::SignalKind;

    fn extract(source: &str) -> FileOutput<Component> {
        StencilExtractor::new().extract(Path::new("src/components/test.tsx"), source).unwrap()
    }

    #[test]
    fn decorated_class_with_props() {
        let src = "@Component({ tag: 'my-button', shadow: true })\nexport class MyButton {\n  /** Button label. */\n  @Prop() label: string;\n  @Prop({ reflect: true }) size?: 'sm' | 'lg';\n  @Prop() disabled = false;\n\n  render() {\n    return <button>{this.label}</button>;\n  }\n}\n";
        let out = extract(src);
        assert_eq!(out.items.len(), 1);
        let c = &out.items[0];
        assert_eq!(c.name, "MyButton");
        assert_eq!(c.source.exported_as.as_deref(), Some("MyButton"));
        assert!(c.metadata.tags.iter().any(|t| t == "tag:my-button"));
        assert_eq!(c.props.len(), 3);
        assert_eq!(c.props[0].name, "label");
        assert!(c.props[0].required);
        assert_eq!(c.props[0].description.as_deref(), Some("Button label."));
        assert_eq!(c.props[1].name, "size");
        assert!(!c.props[1].required);
        assert_eq!(c.props[1].type_text.as_deref(), Some("'sm' | 'lg'"));
        assert_eq!(c.props[2].default_text.as_deref(), Some("false"));
        assert_eq!(c.variants.len(), 2);
    }

    #[test]
    fn state_event_method_counts_become_tags() {
        let src = "@Component({ tag: 'x-panel' })\nexport class XPanel {\n  @State() open = false;\n  @State() focused = false;\n  @Event() xChange: EventEmitter;\n  @Method()\n  async show() {}\n  @Element() el: HTMLElement;\n}\n";
        let out = extract(src);
        let tags = &out.items[0].metadata.tags;
        assert!(tags.iter().any(|t| t == "states:2"));
        assert!(tags.iter().any(|t| t == "events:1"));
        assert!(tags.iter().any(|t| t == "methods:1"));
        assert!(tags.iter().any(|t| t == "element-refs:1"));
    }

    #[test]
    fn zero_counts_are_not_tagged() {
        let src = "@Component({ tag: 'x-plain' })\nexport class XPlain {}\n";
        let out = extract(src);
        let tags = &out.items[0].metadata.tags;
        assert!(!tags.iter().any(|t| t.starts_with("states:")));
        assert!(!tags.iter().any(|t| t.starts_with("events:")));
    }

    #[test]
    fn mixin_extends_recognized_as_dependencies() {
        let src = "@Component({ tag: 'tag-picker' })\nexport class TagPicker extends FocusTrap(ThemedBase) implements ComponentInterface {\n}\n";
        let out = extract(src);
        let deps = &out.items[0].dependencies;
        assert!(deps.contains(&"FocusTrap".to_string()));
        assert!(deps.contains(&"ThemedBase".to_string()));
        assert!(!deps.contains(&"ComponentInterface".to_string()));
    }

    #[test]
    fn jsx_style_objects_yield_hardcoded_values() {
        let src = "@Component({ tag: 'x-chip' })\nexport class XChip {\n  render() {\n    return <span style={{ color: '#ff0000', padding: '12px' }}>x</span>;\n  }\n}\n";
        let out = extract(src);
        let c = &out.items[0];
        assert!(c
            .metadata
            .hardcoded_values
            .iter()
            .any(|v| v.property == "color" && v.value == "#ff0000"));
        assert!(c
            .metadata
            .hardcoded_values
            .iter()
            .any(|v| v.property == "padding" && v.value == "12px"));
        let color = out
            .signals
            .iter()
            .find(|s| s.kind == SignalKind::ColorValue && s.value == "#ff0000")
            .unwrap();
        assert_eq!(color.context.scope, SignalScope::Inline);
    }

    #[test]
    fn inline_styles_config_scanned_as_css() {
        let src = "@Component({\n  tag: 'x-note',\n  styles: `\n    :host {\n      color: #00ff00;\n      margin: 4px;\n    }\n  `,\n})\nexport class XNote {}\n";
        let out = extract(src);
        let c = &out.items[0];
        assert!(c
            .metadata
            .hardcoded_values
            .iter()
            .any(|v| v.property == "color" && v.value == "#00ff00"));
        let color = out
            .signals
            .iter()
            .find(|s| s.kind == SignalKind::ColorValue && s.value == "#00ff00")
            .unwrap();
        assert_eq!(color.context.scope, SignalScope::Component);
    }

    #[test]
    fn deprecated_doc_above_decorator() {
        let src = "/**\n * Legacy card layout.\n * @deprecated use x-new-card.\n */\n@Component({ tag: 'x-old-card' })\nexport class XOldCard {}\n";
        let out = extract(src);
        assert!(out.items[0].metadata.deprecated);
        assert!(out.items[0].metadata.documented);
    }

    #[test]
    fn rendered_custom_elements_become_dependencies() {
        let src = "@Component({ tag: 'x-list' })\nexport class XList {\n  render() {\n    return <div><x-list-item /><x-list-item /></div>;\n  }\n}\n";
        let out = extract(src);
        let c = &out.items[0];
        assert_eq!(c.dependencies, vec!["x-list-item".to_string()]);
        assert!(out
            .signals
            .iter()
            .any(|s| s.kind == SignalKind::ComponentUsage && s.value == "x-list-item"));
    }

    #[test]
    fn decorator_without_class_is_skipped() {
        let src = "const config = { component: '@Component' };\n";
        let out = extract(src);
        assert!(out.items.is_empty());
    }
}
