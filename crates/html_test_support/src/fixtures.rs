//! Golden pipeline cases stored as TOML and JSON manifests.
//!
//! Both manifests share one schema. Case ids must be unique across the two
//! files so a failure names exactly one fixture.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const GOLDEN_FORMAT_V1: &str = "flexdoc-golden-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GoldenManifest {
    pub format: String,
    pub cases: Vec<GoldenCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GoldenCase {
    pub id: String,
    pub html: String,
    /// Render without the layout pass.
    #[serde(default)]
    pub no_layout: bool,
    #[serde(default)]
    pub boxes: Vec<ExpectedBox>,
    #[serde(default)]
    pub styles: Vec<ExpectedStyle>,
}

/// Geometry expected on the element whose `id` attribute is `element`.
/// Omitted fields are not checked.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExpectedBox {
    pub element: String,
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExpectedStyle {
    pub element: String,
    pub property: String,
    /// `None` asserts the property is absent.
    pub value: Option<String>,
}

pub fn load_toml_manifest(path: &Path) -> GoldenManifest {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read golden TOML {path:?}: {err}"));
    let manifest: GoldenManifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse golden TOML {path:?}: {err}"));
    validate_manifest(&manifest, path);
    manifest
}

pub fn load_json_manifest(path: &Path) -> GoldenManifest {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read golden JSON {path:?}: {err}"));
    let manifest: GoldenManifest = serde_json::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse golden JSON {path:?}: {err}"));
    validate_manifest(&manifest, path);
    manifest
}

/// Load `golden.toml` and `golden.json` from `dir`, TOML cases first.
pub fn load_golden_cases(dir: &Path) -> Vec<GoldenCase> {
    let toml_manifest = load_toml_manifest(&dir.join("golden.toml"));
    let json_manifest = load_json_manifest(&dir.join("golden.json"));

    let mut seen = BTreeSet::new();
    let cases: Vec<GoldenCase> = toml_manifest
        .cases
        .into_iter()
        .chain(json_manifest.cases)
        .collect();
    for case in &cases {
        assert!(
            seen.insert(case.id.clone()),
            "golden case id '{}' appears in both manifests under {dir:?}",
            case.id
        );
    }
    cases
}

fn validate_manifest(manifest: &GoldenManifest, path: &Path) {
    assert_eq!(
        manifest.format, GOLDEN_FORMAT_V1,
        "unsupported golden manifest format in {path:?}"
    );
    assert!(!manifest.cases.is_empty(), "no golden cases in {path:?}");
    let mut seen = BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            !case.id.trim().is_empty(),
            "golden case with empty id in {path:?}"
        );
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate golden case id '{}' in {path:?}",
            case.id
        );
    }
}
