//! Behaviour-driven tests for module metadata generation.
//!
//! These scenarios cover the bundled-namespace destination convention, the
//! empty-description skip policy, and third-party file naming.

use camino::Utf8PathBuf;
use checkstyle_meta::{
    MetadataPathResolver, ModuleDetails, ModuleType, Separator, WriteOutcome, XmlMetaWriter,
    read_module_details_from_path,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Metadata world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MetadataWorld {
    module: RefCell<Option<ModuleDetails>>,
    resources_root: RefCell<Option<Utf8PathBuf>>,
    stale_path: RefCell<Option<Utf8PathBuf>>,
    outcome: RefCell<Option<WriteOutcome>>,
    // Keep the temp dir alive for the lifetime of the scenario.
    _temp_dir: RefCell<Option<TempDir>>,
}

#[fixture]
fn metadata_world() -> MetadataWorld {
    MetadataWorld::default()
}

fn bundled_check(description: &str) -> ModuleDetails {
    ModuleDetails::new(
        "WhitespaceAfter",
        ModuleType::Check,
        "com.puppycrawl.tools.checkstyle.checks.whitespace.WhitespaceAfterCheck",
    )
    .with_parent("com.puppycrawl.tools.checkstyle.TreeWalker")
    .with_description(description)
    .with_violation_message_key("ws.notFollowed")
}

fn writer_for(metadata_world: &MetadataWorld) -> XmlMetaWriter {
    let root = metadata_world.resources_root.borrow();
    let root = root.as_ref().expect("resources root not set");
    XmlMetaWriter::new(MetadataPathResolver::new(root.clone(), Separator::Slash))
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[given("a bundled check module with a description")]
fn given_bundled_with_description(metadata_world: &MetadataWorld) {
    metadata_world
        .module
        .replace(Some(bundled_check("Checks that a token is followed by whitespace.")));
}

#[given("a bundled check module without a description")]
fn given_bundled_without_description(metadata_world: &MetadataWorld) {
    metadata_world.module.replace(Some(bundled_check("")));
}

#[given("a third-party filter module with a description")]
fn given_third_party_filter(metadata_world: &MetadataWorld) {
    let module = ModuleDetails::new("MyFilter", ModuleType::Filter, "org.example.MyFilter")
        .with_parent("com.puppycrawl.tools.checkstyle.Checker")
        .with_description("Filters nothing in particular.");
    metadata_world.module.replace(Some(module));
}

#[given("a resources root with the namespace directories")]
fn given_namespace_root(metadata_world: &MetadataWorld) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let root =
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("temp dir path not UTF-8");
    fs::create_dir_all(root.join("com/puppycrawl/tools/checkstyle/meta/checks/whitespace"))
        .expect("failed to create namespace directories");

    metadata_world.resources_root.replace(Some(root));
    metadata_world._temp_dir.replace(Some(temp_dir));
}

#[given("an empty resources root")]
fn given_empty_root(metadata_world: &MetadataWorld) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let root =
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("temp dir path not UTF-8");

    metadata_world.resources_root.replace(Some(root));
    metadata_world._temp_dir.replace(Some(temp_dir));
}

#[given("a stale file already at the resolved path")]
fn given_stale_file(metadata_world: &MetadataWorld) {
    // Resolve with the production resolver so the stale file sits exactly
    // where a write would land.
    let path = {
        let root = metadata_world.resources_root.borrow();
        let root = root.as_ref().expect("resources root not set");
        let module = metadata_world.module.borrow();
        let module = module.as_ref().expect("module not set");
        let resolver = MetadataPathResolver::new(root.clone(), Separator::Slash);
        resolver.resolve(module)
    };
    fs::write(&path, "stale contents").expect("failed to seed stale file");

    metadata_world.stale_path.replace(Some(path));
}

#[when("the module metadata is written")]
fn when_metadata_written(metadata_world: &MetadataWorld) {
    let writer = writer_for(metadata_world);
    let module = metadata_world.module.borrow();
    let module = module.as_ref().expect("module not set");

    let outcome = writer.write(module).expect("metadata write failed");
    metadata_world.outcome.replace(Some(outcome));
}

#[then("the metadata file appears under the namespace meta directory")]
fn then_file_under_meta(metadata_world: &MetadataWorld) {
    let outcome = metadata_world.outcome.borrow();
    let outcome = outcome.as_ref().expect("outcome not set");

    let WriteOutcome::Written(path) = outcome else {
        panic!("expected a written outcome, got {outcome:?}");
    };
    assert!(path.ends_with(
        "com/puppycrawl/tools/checkstyle/meta/checks/whitespace/WhitespaceAfterCheck.xml"
    ));
    assert!(path.exists(), "written file missing at {path}");
}

#[then("reading the file back reproduces the module")]
fn then_round_trips(metadata_world: &MetadataWorld) {
    let outcome = metadata_world.outcome.borrow();
    let outcome = outcome.as_ref().expect("outcome not set");
    let WriteOutcome::Written(path) = outcome else {
        panic!("expected a written outcome, got {outcome:?}");
    };

    let read_back = read_module_details_from_path(path).expect("reading the file back failed");
    let module = metadata_world.module.borrow();
    let module = module.as_ref().expect("module not set");
    assert_eq!(read_back, *module);
}

#[then("the write is skipped")]
fn then_write_skipped(metadata_world: &MetadataWorld) {
    let outcome = metadata_world.outcome.borrow();
    let outcome = outcome.as_ref().expect("outcome not set");

    assert_eq!(*outcome, WriteOutcome::SkippedEmptyDescription);
}

#[then("the stale file is left untouched")]
fn then_stale_untouched(metadata_world: &MetadataWorld) {
    let stale_path = metadata_world.stale_path.borrow();
    let stale_path = stale_path.as_ref().expect("stale path not set");

    let contents = fs::read_to_string(stale_path).expect("failed to read stale file");
    assert_eq!(contents, "stale contents");
}

#[then("the metadata file is named with the checkstylemeta prefix")]
fn then_third_party_name(metadata_world: &MetadataWorld) {
    let outcome = metadata_world.outcome.borrow();
    let outcome = outcome.as_ref().expect("outcome not set");

    let WriteOutcome::Written(path) = outcome else {
        panic!("expected a written outcome, got {outcome:?}");
    };
    assert_eq!(path.file_name(), Some("checkstylemeta-MyFilter.xml"));
    assert!(path.exists(), "written file missing at {path}");
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/metadata.feature", index = 0)]
fn scenario_write_bundled_check(metadata_world: MetadataWorld) {
    let _ = metadata_world;
}

#[scenario(path = "tests/features/metadata.feature", index = 1)]
fn scenario_skip_empty_description(metadata_world: MetadataWorld) {
    let _ = metadata_world;
}

#[scenario(path = "tests/features/metadata.feature", index = 2)]
fn scenario_third_party_naming(metadata_world: MetadataWorld) {
    let _ = metadata_world;
}
