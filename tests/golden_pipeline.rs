use std::fs;
use std::path::{Path, PathBuf};

use flexdoc::{RenderConfig, Rendered, render_with};
use html::traverse;
use html_test_support::{
    ExpectedBox, GoldenCase, SnapshotOptions, diff_lines, load_golden_cases, parse_expected_dom,
    snapshot_document,
};
use layout::LayoutConfig;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn render_case(case: &GoldenCase) -> Rendered {
    let config = RenderConfig {
        layout: LayoutConfig {
            enabled: !case.no_layout,
        },
        ..RenderConfig::default()
    };
    render_with(&case.html, config)
        .unwrap_or_else(|err| panic!("case '{}' failed to render: {err}", case.id))
}

fn check_box(rendered: &Rendered, expected: &ExpectedBox, failures: &mut Vec<String>) {
    let Some(node) = traverse::find_element_by_id(&rendered.document, &expected.element) else {
        failures.push(format!("no element #{}", expected.element));
        return;
    };
    let Some(element) = rendered.document.element(node) else {
        return;
    };
    let actual = element.style.layout;
    let fields = [
        ("left", expected.left, actual.left),
        ("top", expected.top, actual.top),
        ("right", expected.right, actual.right),
        ("bottom", expected.bottom, actual.bottom),
        ("width", expected.width, actual.width),
        ("height", expected.height, actual.height),
    ];
    for (name, want, got) in fields {
        if want.is_some() && want != got {
            failures.push(format!(
                "#{} {name}: expected {want:?}, got {got:?}",
                expected.element
            ));
        }
    }
}

#[test]
fn golden_cases_render_as_recorded() {
    let cases = load_golden_cases(&fixture_dir());
    let mut report = Vec::new();

    for case in &cases {
        let rendered = render_case(case);
        let mut failures = Vec::new();

        for expected in &case.boxes {
            check_box(&rendered, expected, &mut failures);
        }
        for expected in &case.styles {
            let style = traverse::find_element_by_id(&rendered.document, &expected.element)
                .and_then(|node| rendered.document.element(node))
                .map(|element| element.style.get(&expected.property).map(str::to_string));
            match style {
                None => failures.push(format!("no element #{}", expected.element)),
                Some(actual) if actual != expected.value => failures.push(format!(
                    "#{} {}: expected {:?}, got {actual:?}",
                    expected.element, expected.property, expected.value
                )),
                Some(_) => {}
            }
        }
        if case.no_layout {
            let laid_out = traverse::pre_order(&rendered.document, rendered.document.root())
                .into_iter()
                .filter_map(|node| rendered.document.element(node))
                .any(|element| !element.style.layout.is_empty());
            if laid_out {
                failures.push("layout ran although the case disabled it".to_string());
            }
        }

        if !failures.is_empty() {
            report.push(format!("[{}]\n  {}", case.id, failures.join("\n  ")));
        }
    }

    assert!(
        report.is_empty(),
        "{} of {} golden case(s) failed:\n{}",
        report.len(),
        cases.len(),
        report.join("\n")
    );
}

#[test]
fn pipeline_snapshots_match() {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_dir().join("pipeline"))
        .expect("pipeline fixture dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no pipeline fixtures found");

    for path in paths {
        let input = fs::read_to_string(&path).expect("fixture input");
        let expected = parse_expected_dom(&path.with_extension("dom"));
        let rendered = render_with(input.trim_end_matches('\n'), RenderConfig::default())
            .unwrap_or_else(|err| panic!("{path:?} failed to render: {err}"));
        let actual = snapshot_document(
            &rendered.document,
            SnapshotOptions {
                styles: expected.styles,
                layout: expected.layout,
            },
        );
        assert!(
            expected.lines == actual,
            "snapshot mismatch for {path:?}:\n{}",
            diff_lines(&expected.lines, &actual)
        );
    }
}
