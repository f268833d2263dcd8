//! Tests for the import pipeline

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::*;
use crate::config::DuplicatePolicy;
use crate::domain::{ContentDefinition, InstantiableVariant, PlacementKind};
use crate::host::FsHost;
use crate::host::mock::{MockHost, MockPackage};
use crate::trace::RecordingTrace;
use crate::ui::SilentProgressReporter;

/// Discovery returning a fixed list, for mock-host runs
struct FixedDiscovery(Vec<DiscoveredResource>);

impl FixedDiscovery {
    fn new(root: &Path, names: &[&str]) -> Self {
        Self(
            names
                .iter()
                .map(|name| DiscoveredResource {
                    relative_path: PathBuf::from(name),
                    absolute_path: root.join(name),
                })
                .collect(),
        )
    }
}

impl ResourceDiscovery for FixedDiscovery {
    fn discover(&self, _root: &Path) -> Result<Vec<DiscoveredResource>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

fn definition(name: &str, variants: &[&str]) -> ContentDefinition {
    variants.iter().fold(ContentDefinition::new(name, 1), |def, v| {
        def.with_variant(InstantiableVariant::new(*v).with_parameter("width", 1.0))
    })
}

fn run_mock(
    host: &MockHost,
    config: &PipelineConfig,
    dir: &Path,
    names: &[&str],
) -> (RunResult, RecordingTrace) {
    let mut trace = RecordingTrace::new();
    let result = ImportPipeline::new(Some(host), config, &mut trace)
        .with_discovery(FixedDiscovery::new(dir, names))
        .run(dir);
    (result, trace)
}

fn read_artifact(dir: &Path) -> serde_json::Value {
    let content = fs::read_to_string(dir.join("outputFile.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn write_package(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn package_yaml(name: &str, variants: &[&str]) -> String {
    let mut yaml = format!("format_version: 1\ndefinition:\n  name: {name}\n  variants:\n");
    for variant in variants {
        yaml.push_str(&format!("    - name: \"{variant}\"\n      parameters: {{ width: 1.0 }}\n"));
    }
    yaml
}

#[test]
fn test_scenario_single_resource_two_variants() {
    let temp = TempDir::new().unwrap();
    write_package(temp.path(), "desk.pkg", &package_yaml("Desk", &["1200x600", "1600x800"]));

    let host = FsHost::new();
    let config = PipelineConfig::default();
    let mut trace = RecordingTrace::new();
    let result = ImportPipeline::new(Some(&host), &config, &mut trace).run(temp.path());

    assert!(result.success);
    assert_eq!(result.merged_count, 1);
    assert_eq!(result.artifact_path, Some(temp.path().join("outputFile.json")));

    let artifact = read_artifact(temp.path());
    assert_eq!(artifact["instances"].as_array().unwrap().len(), 2);
    assert_eq!(artifact["sources"][0]["path"], "desk.pkg");
    assert!(
        artifact["sources"][0]["digest"]
            .as_str()
            .unwrap()
            .starts_with("blake3:")
    );
    assert!(trace.contains("Loading `desk.pkg` ... "));
}

#[test]
fn test_scenario_corrupt_second_resource() {
    let temp = TempDir::new().unwrap();
    write_package(temp.path(), "a.pkg", &package_yaml("Chair", &["Standard"]));
    write_package(temp.path(), "b.pkg", "\u{0}not: [a package");
    write_package(temp.path(), "c.pkg", &package_yaml("Table", &["Round"]));

    let host = FsHost::new();
    let config = PipelineConfig::default();
    let mut trace = RecordingTrace::new();
    let result = ImportPipeline::new(Some(&host), &config, &mut trace).run(temp.path());

    assert!(result.success);
    assert_eq!(result.merged_count, 2);
    assert_eq!(trace.count_kind("OpenFailure"), 1);
    assert!(trace.contains("Failed to load `b.pkg`"));

    let failed: Vec<_> = result.failed_outcomes().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].display_path, "b.pkg");

    let artifact = read_artifact(temp.path());
    assert_eq!(artifact["definitions"].as_array().unwrap().len(), 2);
}

#[test]
fn test_scenario_empty_directory() {
    let temp = TempDir::new().unwrap();

    let host = FsHost::new();
    let config = PipelineConfig::default();
    let mut trace = RecordingTrace::new();
    let result = ImportPipeline::new(Some(&host), &config, &mut trace).run(temp.path());

    assert!(!result.success);
    assert_eq!(result.reason(), Some("NoResourcesFound"));
    assert!(result.artifact_path.is_none());
    assert!(!temp.path().join("outputFile.json").exists());
    assert!(trace.contains("Error occurred"));
}

#[test]
fn test_missing_host_is_precondition_failure() {
    let temp = TempDir::new().unwrap();
    let config = PipelineConfig::default();
    let mut trace = RecordingTrace::new();
    let result = ImportPipeline::new(None, &config, &mut trace).run(temp.path());

    assert!(!result.success);
    assert_eq!(result.reason(), Some("PreconditionFailure"));
    assert!(result.outcomes.is_empty());
}

#[test]
fn test_missing_working_directory_is_precondition_failure() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new();
    let (result, _) = run_mock(
        &host,
        &PipelineConfig::default(),
        &temp.path().join("missing"),
        &["a.pkg"],
    );
    assert_eq!(result.reason(), Some("PreconditionFailure"));
    assert_eq!(host.opened(), 0);
}

#[test]
fn test_all_resources_failed() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new()
        .with_package(temp.path().join("a.pkg"), MockPackage::Corrupt)
        .with_package(temp.path().join("b.pkg"), MockPackage::NoDefinition)
        .with_package(
            temp.path().join("c.pkg"),
            MockPackage::Definition(
                definition("Door", &["900"]).with_placement(PlacementKind::Hosted),
            ),
        );

    let (result, trace) = run_mock(
        &host,
        &PipelineConfig::default(),
        temp.path(),
        &["a.pkg", "b.pkg", "c.pkg"],
    );

    assert!(!result.success);
    assert_eq!(result.reason(), Some("AllResourcesFailed"));
    assert_eq!(result.merged_count, 0);
    assert_eq!(result.outcomes.len(), 3);
    assert_eq!(trace.count_kind("OpenFailure"), 1);
    assert_eq!(trace.count_kind("ExtractionFailure"), 1);
    assert_eq!(trace.count_kind("PlacementFailure"), 1);
    assert!(trace.contains("Cannot load any resource package into the target document"));
    assert!(!temp.path().join("outputFile.json").exists());
}

#[test]
fn test_each_opened_document_closed_once() {
    let temp = TempDir::new().unwrap();
    let ok = temp.path().join("ok.pkg");
    let bare = temp.path().join("bare.pkg");
    let broken = temp.path().join("broken.pkg");
    let host = MockHost::new()
        .with_package(&ok, MockPackage::Definition(definition("Chair", &["Standard"])))
        .with_package(&bare, MockPackage::NoDefinition)
        .with_package(
            &broken,
            MockPackage::Definition(
                ContentDefinition::new("Shelf", 1)
                    .with_variant(InstantiableVariant::new("Bad").with_parameter("height", -2.0)),
            ),
        );

    let (result, _) = run_mock(
        &host,
        &PipelineConfig::default(),
        temp.path(),
        &["ok.pkg", "bare.pkg", "broken.pkg"],
    );

    assert!(result.success);
    assert_eq!(host.opened(), 3);
    assert_eq!(host.closed(), 3);
    for path in [&ok, &bare, &broken] {
        assert_eq!(host.close_calls(path), 1, "{}", path.display());
    }
}

#[test]
fn test_failed_merge_leaves_no_partial_definition() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new()
        .with_package(
            temp.path().join("a.pkg"),
            MockPackage::Definition(definition("Chair", &["Standard"])),
        )
        .with_package(
            temp.path().join("b.pkg"),
            MockPackage::Definition(
                ContentDefinition::new("Shelf", 1)
                    .with_variant(InstantiableVariant::new("Tall").with_parameter("height", 2.0))
                    .with_variant(InstantiableVariant::new("Bad").with_parameter("height", -1.0)),
            ),
        );

    let (result, trace) = run_mock(
        &host,
        &PipelineConfig::default(),
        temp.path(),
        &["a.pkg", "b.pkg"],
    );

    assert!(result.success);
    assert_eq!(trace.count_kind("ActivationFailure"), 1);
    let artifact = read_artifact(temp.path());
    let names: Vec<_> = artifact["definitions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Chair"]);
    assert_eq!(artifact["instances"].as_array().unwrap().len(), 1);
}

#[test]
fn test_duplicate_definition_reactivation_is_noop() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new()
        .with_package(
            temp.path().join("a.pkg"),
            MockPackage::Definition(definition("Desk", &["S", "L"])),
        )
        .with_package(
            temp.path().join("b.pkg"),
            MockPackage::Definition(definition("Desk", &["S", "L"])),
        );

    let (result, _) = run_mock(
        &host,
        &PipelineConfig::default(),
        temp.path(),
        &["a.pkg", "b.pkg"],
    );

    assert!(result.success);
    assert_eq!(result.merged_count, 2);
    assert!(result.outcomes.iter().all(|o| o.instance_count == 2));
    let artifact = read_artifact(temp.path());
    assert_eq!(artifact["definitions"].as_array().unwrap().len(), 1);
    assert_eq!(artifact["instances"].as_array().unwrap().len(), 4);
}

#[test]
fn test_reject_duplicates_policy() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new()
        .with_package(
            temp.path().join("a.pkg"),
            MockPackage::Definition(definition("Desk", &["S"])),
        )
        .with_package(
            temp.path().join("b.pkg"),
            MockPackage::Definition(definition("Desk", &["S"])),
        );
    let config = PipelineConfig {
        on_duplicate: DuplicatePolicy::Reject,
        ..PipelineConfig::default()
    };

    let (result, trace) = run_mock(&host, &config, temp.path(), &["a.pkg", "b.pkg"]);

    assert!(result.success);
    assert_eq!(result.merged_count, 1);
    assert_eq!(trace.count_kind("ImportFailure"), 1);
}

#[test]
fn test_first_only_processes_first_resource() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new()
        .with_package(
            temp.path().join("a.pkg"),
            MockPackage::Definition(definition("Chair", &["Standard"])),
        )
        .with_package(
            temp.path().join("b.pkg"),
            MockPackage::Definition(definition("Table", &["Round"])),
        );
    let config = PipelineConfig {
        first_only: true,
        ..PipelineConfig::default()
    };

    let (result, _) = run_mock(&host, &config, temp.path(), &["a.pkg", "b.pkg"]);

    assert!(result.success);
    assert_eq!(result.outcomes.len(), 1);
    assert_eq!(host.opened(), 1);
}

#[test]
fn test_discovery_order_is_processing_order() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new()
        .with_package(
            temp.path().join("z.pkg"),
            MockPackage::Definition(definition("Zed", &["One"])),
        )
        .with_package(
            temp.path().join("a.pkg"),
            MockPackage::Definition(definition("Aye", &["One"])),
        );

    let (result, trace) = run_mock(
        &host,
        &PipelineConfig::default(),
        temp.path(),
        &["z.pkg", "a.pkg"],
    );

    let order: Vec<_> = result.outcomes.iter().map(|o| o.display_path.as_str()).collect();
    assert_eq!(order, vec!["z.pkg", "a.pkg"]);
    let lines = trace.lines();
    let z = lines.iter().position(|l| l.contains("`z.pkg`")).unwrap();
    let a = lines.iter().position(|l| l.contains("`a.pkg`")).unwrap();
    assert!(z < a);
}

#[test]
fn test_persist_failure_reports_failure() {
    let temp = TempDir::new().unwrap();
    let host = MockHost::new().with_package(
        temp.path().join("a.pkg"),
        MockPackage::Definition(definition("Chair", &["Standard"])),
    );
    let config = PipelineConfig {
        output_file: PathBuf::from("missing/outputFile.json"),
        ..PipelineConfig::default()
    };

    let (result, _) = run_mock(&host, &config, temp.path(), &["a.pkg"]);

    assert!(!result.success);
    assert_eq!(result.merged_count, 1);
    assert_eq!(result.reason(), Some("PersistFailure"));
}

#[test]
fn test_resources_dir_and_pattern() {
    let temp = TempDir::new().unwrap();
    write_package(temp.path(), "Families/Doors/d.pkg", &package_yaml("Door", &["900"]));
    write_package(temp.path(), "Families/desk.pkg", &package_yaml("Desk", &["S"]));
    write_package(temp.path(), "outside.pkg", &package_yaml("Outside", &["S"]));

    let host = FsHost::new();
    let config = PipelineConfig {
        resources_dir: PathBuf::from("Families"),
        pattern: "*.pkg".to_string(),
        ..PipelineConfig::default()
    };
    let mut trace = RecordingTrace::new();
    let result = ImportPipeline::new(Some(&host), &config, &mut trace).run(temp.path());

    assert!(result.success);
    let paths: Vec<_> = result.outcomes.iter().map(|o| o.display_path.as_str()).collect();
    assert_eq!(paths, vec!["Families/desk.pkg"]);
}

#[test]
fn test_progress_reporter_is_driven() {
    let temp = TempDir::new().unwrap();
    write_package(temp.path(), "a.pkg", &package_yaml("Chair", &["Standard"]));

    let host = FsHost::new();
    let config = PipelineConfig::default();
    let mut trace = RecordingTrace::new();
    let mut progress = SilentProgressReporter;
    let result = ImportPipeline::new(Some(&host), &config, &mut trace)
        .with_progress(&mut progress)
        .run(temp.path());

    assert!(result.success);
}

#[test]
fn test_run_with_debug_logging_enabled() {
    let temp = TempDir::new().unwrap();
    write_package(temp.path(), "a.pkg", &package_yaml("Chair", &["Standard"]));
    write_package(temp.path(), "b.pkg", "");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();

    let (fs_result, mock_result) = tracing::subscriber::with_default(subscriber, || {
        let host = FsHost::new();
        let config = PipelineConfig::default();
        let mut trace = RecordingTrace::new();
        let fs_result = ImportPipeline::new(Some(&host), &config, &mut trace).run(temp.path());

        // packages known only to the mock host cannot be hashed
        let mock_dir = TempDir::new().unwrap();
        let mock_host = MockHost::new().with_package(
            mock_dir.path().join("ghost.pkg"),
            MockPackage::Definition(definition("Ghost", &["One"])),
        );
        let (mock_result, _) = run_mock(&mock_host, &config, mock_dir.path(), &["ghost.pkg"]);
        (fs_result, mock_result)
    });

    assert!(fs_result.success);
    assert_eq!(fs_result.merged_count, 1);
    assert!(mock_result.success);
    assert_eq!(mock_result.outcomes[0].digest, None);
}
