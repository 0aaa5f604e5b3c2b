//! The drift engine run over real project scans: files on disk through
//! the orchestrator, then analyzed and ranked.

use std::fs;
use std::path::{Path, PathBuf};

use tokendrift_analysis::drift::{rank_drifts, DriftAnalyzer};
use tokendrift_analysis::ProjectScanner;
use tokendrift_core::config::{DriftConfig, ScanConfig, SourceConfig};
use tokendrift_core::types::component::{Component, ComponentSource, Dialect, HardcodedValue};
use tokendrift_core::types::drift::{DriftKind, DriftSignal, EntityKind, Severity};
use tokendrift_core::types::signal::{RawSignal, SignalContext, SignalKind, SignalScope};
use tokendrift_core::types::token::{DesignToken, TokenCategory, TokenSource, TokenValue};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn find<'a>(drifts: &'a [DriftSignal], kind: DriftKind) -> Vec<&'a DriftSignal> {
    drifts.iter().filter(|d| d.kind == kind).collect()
}

#[test]
fn full_project_scan_reports_every_drift_kind() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "src/Banner.tsx",
        "export function Banner() {\n  return <div style={{ color: '#ff0000' }}>Sale!</div>;\n}\n",
    );
    write(
        root,
        "src/Card.tsx",
        "/** Product summary card. */\nexport function Card({ title }) {\n  return <div className=\"card\">{title}</div>;\n}\n",
    );
    write(
        root,
        "src/CardComponent.tsx",
        "import Card from './Card';\n\n/** Legacy alias kept for old call sites. */\nexport function CardComponent({ title }) {\n  return <Card title={title} />;\n}\n",
    );
    write(
        root,
        "src/OldButton.tsx",
        "/** @deprecated use Card actions instead. */\nexport function OldButton() {\n  return <button>Do</button>;\n}\n",
    );
    write(
        root,
        "src/Toolbar.tsx",
        "import OldButton from './OldButton';\n\n/** Toolbar actions. */\nexport function Toolbar() {\n  return <OldButton />;\n}\n",
    );
    write(
        root,
        "src/Nav.svelte",
        "<!-- @component Top navigation bar. -->\n<nav><a href=\"/\">Home</a></nav>\n",
    );
    write(
        root,
        "tokens/theme.css",
        ":root {\n  --color-primary: #ff0000;\n  --space-md: 16px;\n}\n",
    );

    let sources = vec![
        SourceConfig::new(Dialect::React),
        SourceConfig::new(Dialect::Svelte),
        SourceConfig::new(Dialect::TokenFile).with_include(&["tokens/**/*.css"]),
    ];
    let scan = ProjectScanner::new(ScanConfig::default()).scan(root, &sources).unwrap();
    assert_eq!(scan.components.len(), 6);
    assert_eq!(scan.tokens.len(), 2);
    assert_eq!(scan.frameworks, vec!["react".to_string(), "svelte".to_string()]);

    let mut drifts = DriftAnalyzer::default().analyze(
        &scan.components,
        &scan.tokens,
        &scan.signals,
        &scan.frameworks,
    );
    assert_eq!(drifts.len(), 5);

    let hardcoded = find(&drifts, DriftKind::HardcodedValue);
    assert_eq!(hardcoded.len(), 1);
    assert_eq!(hardcoded[0].source.name, "Banner");
    assert_eq!(hardcoded[0].source.line, Some(2));
    assert_eq!(hardcoded[0].message, "hardcoded color `#ff0000`");
    assert_eq!(hardcoded[0].severity, Severity::Warning);
    assert_eq!(hardcoded[0].details.suggestions.len(), 1);
    assert_eq!(hardcoded[0].details.suggestions[0].token_name, "--color-primary");
    assert_eq!(hardcoded[0].details.suggestions[0].confidence, 1.0);

    let deprecated = find(&drifts, DriftKind::DeprecatedUsage);
    assert_eq!(deprecated.len(), 1);
    assert_eq!(deprecated[0].source.name, "Toolbar");
    assert_eq!(deprecated[0].details.related, vec!["OldButton".to_string()]);

    let naming = find(&drifts, DriftKind::Naming);
    assert_eq!(naming.len(), 1);
    assert_eq!(naming[0].source.name, "CardComponent");
    assert_eq!(naming[0].details.related, vec!["Card".to_string()]);

    let documentation = find(&drifts, DriftKind::Documentation);
    assert_eq!(documentation.len(), 1);
    assert_eq!(documentation[0].source.name, "Banner");
    assert_eq!(documentation[0].severity, Severity::Info);

    let sprawl = find(&drifts, DriftKind::FrameworkSprawl);
    assert_eq!(sprawl.len(), 1);
    assert_eq!(sprawl[0].message, "2 UI frameworks in one project: react, svelte");

    rank_drifts(&mut drifts);
    let ranked: Vec<DriftKind> = drifts.iter().map(|d| d.kind).collect();
    assert_eq!(
        ranked,
        vec![
            DriftKind::HardcodedValue,
            DriftKind::DeprecatedUsage,
            DriftKind::Naming,
            DriftKind::FrameworkSprawl,
            DriftKind::Documentation,
        ]
    );
}

#[test]
fn deprecated_custom_elements_resolve_across_dialects() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "src/old-card.tsx",
        "/**\n * Legacy card layout.\n * @deprecated use x-board.\n */\n@Component({ tag: 'x-old-card' })\nexport class XOldCard {}\n",
    );
    write(
        root,
        "src/board.ts",
        "@customElement('x-board')\nexport class XBoard extends LitElement {\n  render() {\n    return html`<x-old-card></x-old-card>`;\n  }\n}\n",
    );

    let sources = vec![SourceConfig::new(Dialect::Stencil), SourceConfig::new(Dialect::Lit)];
    let scan = ProjectScanner::new(ScanConfig::default()).scan(root, &sources).unwrap();
    assert_eq!(scan.components.len(), 2);
    assert_eq!(scan.frameworks, vec!["lit".to_string(), "stencil".to_string()]);

    let drifts = DriftAnalyzer::default().analyze(
        &scan.components,
        &scan.tokens,
        &scan.signals,
        &scan.frameworks,
    );

    let deprecated = find(&drifts, DriftKind::DeprecatedUsage);
    assert_eq!(deprecated.len(), 1);
    assert_eq!(deprecated[0].source.name, "XBoard");
    assert_eq!(deprecated[0].message, "`XBoard` renders deprecated `XOldCard`");
    assert_eq!(deprecated[0].details.related, vec!["XOldCard".to_string()]);

    // The rest of the report: XBoard is undocumented, and two component
    // frameworks share one tree.
    assert_eq!(find(&drifts, DriftKind::Documentation).len(), 1);
    let sprawl = find(&drifts, DriftKind::FrameworkSprawl);
    assert_eq!(sprawl[0].message, "2 UI frameworks in one project: lit, stencil");
    assert_eq!(drifts.len(), 3);
}

#[test]
fn stylesheet_signals_report_against_their_files() {
    let tokens = vec![DesignToken::new(
        "--color-primary",
        TokenCategory::Color,
        TokenValue::Color { hex: "#ff0000".into() },
        "#ff0000",
        TokenSource { path: "tokens/theme.css".into(), line: 2, format: "css".into() },
    )];
    let ctx = SignalContext::for_dialect(Dialect::TokenFile);
    let mut tokenized = ctx.clone();
    tokenized.tokenized = true;
    let signals = vec![
        RawSignal::new(SignalKind::ColorValue, "#ff0000", "styles/app.css", 14, 3, ctx.clone())
            .with_meta("property", "background"),
        RawSignal::new(
            SignalKind::ColorValue,
            "var(--color-primary)",
            "styles/app.css",
            15,
            3,
            tokenized,
        ),
        RawSignal::new(
            SignalKind::SpacingValue,
            "12px",
            "styles/app.css",
            20,
            3,
            ctx.scoped(SignalScope::Component),
        ),
    ];

    let drifts = DriftAnalyzer::default().analyze(&[], &tokens, &signals, &[]);
    assert_eq!(drifts.len(), 1);
    let finding = &drifts[0];
    assert_eq!(finding.kind, DriftKind::HardcodedValue);
    assert_eq!(finding.severity, Severity::Warning);
    assert_eq!(finding.source.entity, EntityKind::File);
    assert_eq!(finding.source.name, "app.css");
    assert_eq!(finding.source.path, Some(PathBuf::from("styles/app.css")));
    assert_eq!(finding.source.line, Some(14));
    assert_eq!(finding.message, "hardcoded background `#ff0000`");
    assert_eq!(finding.details.suggestions[0].token_name, "--color-primary");
}

#[test]
fn suggestion_budget_and_confidence_follow_config() {
    let mut chip = Component::new(
        "Chip",
        ComponentSource {
            dialect: Dialect::React,
            path: PathBuf::from("src/Chip.tsx"),
            exported_as: Some("Chip".into()),
            line: 1,
        },
    );
    chip.metadata.documented = true;
    chip.metadata.hardcoded_values.push(HardcodedValue {
        property: "padding".into(),
        value: "7px".into(),
        line: 5,
    });
    let spacing = |name: &str, value: f64| {
        DesignToken::new(
            name,
            TokenCategory::Spacing,
            TokenValue::Spacing { value, unit: "px".into() },
            format!("{value}px"),
            TokenSource { path: "tokens/theme.css".into(), line: 1, format: "css".into() },
        )
    };
    let tokens = vec![
        spacing("--space-sm", 6.0),
        spacing("--space-md", 7.0),
        spacing("--space-lg", 8.0),
    ];
    let components = vec![chip];

    let drifts = DriftAnalyzer::default().analyze(&components, &tokens, &[], &[]);
    assert_eq!(drifts.len(), 1);
    let names: Vec<&str> =
        drifts[0].details.suggestions.iter().map(|s| s.token_name.as_str()).collect();
    assert_eq!(names, vec!["--space-md", "--space-lg", "--space-sm"]);
    let confidences: Vec<f64> =
        drifts[0].details.suggestions.iter().map(|s| s.confidence).collect();
    assert_eq!(confidences[0], 1.0);
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));

    let tight = DriftConfig {
        min_suggestion_confidence: Some(0.9),
        max_suggestions: Some(2),
        ..DriftConfig::default()
    };
    let drifts = DriftAnalyzer::new(tight).analyze(&components, &tokens, &[], &[]);
    assert_eq!(drifts[0].details.suggestions.len(), 1);
    assert_eq!(drifts[0].details.suggestions[0].token_name, "--space-md");
}

#[test]
fn overrides_and_disabled_checks_reshape_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "src/Banner.tsx",
        "export function Banner() {\n  return <div style={{ color: '#ff0000' }}>Sale!</div>;\n}\n",
    );
    write(root, "tokens/theme.css", ":root {\n  --color-primary: #ff0000;\n}\n");

    let sources = vec![
        SourceConfig::new(Dialect::React),
        SourceConfig::new(Dialect::TokenFile).with_include(&["tokens/**/*.css"]),
    ];
    let scan = ProjectScanner::new(ScanConfig::default()).scan(root, &sources).unwrap();

    let baseline = DriftAnalyzer::default().analyze(
        &scan.components,
        &scan.tokens,
        &scan.signals,
        &scan.frameworks,
    );
    assert_eq!(baseline.len(), 2);
    assert_eq!(find(&baseline, DriftKind::HardcodedValue)[0].severity, Severity::Warning);
    assert_eq!(find(&baseline, DriftKind::Documentation).len(), 1);

    let mut config = DriftConfig { check_documentation: Some(false), ..DriftConfig::default() };
    config.severity_overrides.insert(DriftKind::HardcodedValue, Severity::Critical);
    let drifts = DriftAnalyzer::new(config).analyze(
        &scan.components,
        &scan.tokens,
        &scan.signals,
        &scan.frameworks,
    );
    assert_eq!(drifts.len(), 1);
    assert_eq!(drifts[0].kind, DriftKind::HardcodedValue);
    assert_eq!(drifts[0].severity, Severity::Critical);
    assert!(!drifts[0].details.suggestions.is_empty());
}
