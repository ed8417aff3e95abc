use checkgate::authority::FileAuthority;
use checkgate::notify::{Event, RecordingNotifier};
use checkgate::plugin_source::{ManifestPluginSource, DEFAULT_PLUGIN_PATTERN};
use checkgate::{BootOutcome, BootReport, Bootstrap, OverrideSpec, OverrideTable};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const PMD: &str = r#"
[[plugin]]
name = "pmd"
version = "6.0.1"
language = "java"
description = "PMD static analyzer"
extensions = ["java"]

[[plugin.checker]]
code = "E002"
name = "AvoidCatchingNPE"

[[plugin.checker]]
code = "E010"
name = "EmptyCatchBlock"
active = false
"#;

const CPPCHECK: &str = r#"
[[plugin]]
name = "cppcheck"
version = "1.8"
language = "cpp"
extensions = ["c", "cpp", "h"]

[[plugin.checker]]
code = "E001"
name = "nullPointer"

[[plugin.checker]]
code = "E002"
name = "memleak"

[[plugin.checker]]
code = "E003"
name = "uninitvar"
"#;

fn workspace(root: &Path) {
    fs::create_dir(root.join(".git")).unwrap();
    let plugins = root.join("plugins");
    fs::create_dir_all(&plugins).unwrap();
    fs::write(plugins.join("cppcheck.toml"), CPPCHECK).unwrap();
    fs::write(plugins.join("pmd.toml"), PMD).unwrap();
}

fn run(root: &Path, table: &OverrideTable, authority: Option<&FileAuthority>) -> BootReport {
    let source = ManifestPluginSource::new(root, vec![DEFAULT_PLUGIN_PATTERN.to_string()]);
    let mut notifier = RecordingNotifier::default();
    let mut boot = Bootstrap::new(&source, &mut notifier, table);
    if let Some(a) = authority {
        boot = boot.with_authority(a);
    }
    match boot.run().unwrap() {
        BootOutcome::Ready(report) => report,
        BootOutcome::NoPluginsFound => panic!("plugins expected"),
    }
}

fn table(specs: &[&str]) -> OverrideTable {
    OverrideTable::from_specs(specs.iter().map(|s| OverrideSpec::parse(s).unwrap()).collect())
        .unwrap()
}

#[test]
fn defaults_apply_without_overrides() {
    let dir = tempdir().unwrap();
    workspace(dir.path());
    let report = run(dir.path(), &OverrideTable::inactive(), None);
    assert_eq!(report.plugins.len(), 2);
    assert_eq!(report.activation.len(), 5);
    assert_eq!(report.activation.is_active("pmd", "E010"), Some(false));
    assert_eq!(report.activation.active_count(), 4);
}

#[test]
fn scoped_overrides_select_per_tool_and_language() {
    let dir = tempdir().unwrap();
    workspace(dir.path());
    let report = run(dir.path(), &table(&["E001", "E002:pmd", "E010::java"]), None);
    let a = &report.activation;
    assert_eq!(a.is_active("cppcheck", "E001"), Some(true));
    assert_eq!(a.is_active("cppcheck", "E002"), Some(false));
    assert_eq!(a.is_active("cppcheck", "E003"), Some(false));
    assert_eq!(a.is_active("pmd", "E002"), Some(true));
    assert_eq!(a.is_active("pmd", "E010"), Some(true));
    assert_eq!(a.active_count(), 3);
}

#[test]
fn authority_snapshot_feeds_defaults_then_overrides_win() {
    let dir = tempdir().unwrap();
    workspace(dir.path());
    let snap = dir.path().join("snapshot.toml");
    fs::write(
        &snap,
        r#"
[[checker]]
tool = "cppcheck"
code = "E003"
active = false
"#,
    )
    .unwrap();
    let authority = FileAuthority::new(&snap);

    let report = run(dir.path(), &OverrideTable::inactive(), Some(&authority));
    assert!(report.synced);
    assert_eq!(report.activation.is_active("cppcheck", "E003"), Some(false));

    let report = run(dir.path(), &table(&["E003"]), Some(&authority));
    assert_eq!(report.activation.is_active("cppcheck", "E003"), Some(true));
    assert_eq!(report.activation.active_count(), 1);
}

#[test]
fn empty_plugin_dir_reports_no_plugins_once() {
    let dir = tempdir().unwrap();
    let source = ManifestPluginSource::new(dir.path(), vec![DEFAULT_PLUGIN_PATTERN.to_string()]);
    let mut notifier = RecordingNotifier::default();
    let table = OverrideTable::inactive();
    let out = Bootstrap::new(&source, &mut notifier, &table).run().unwrap();
    assert!(matches!(out, BootOutcome::NoPluginsFound));
    assert_eq!(notifier.events, vec![Event::NoPluginsFound]);
}

#[test]
fn binary_exits_with_status_one_when_no_plugins_load() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_checkgate"))
        .args(["resolve", "--repo-root"])
        .arg(dir.path())
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("no plugins to load").count(), 1);
}

#[test]
fn binary_prints_json_report() {
    let dir = tempdir().unwrap();
    workspace(dir.path());
    let out = Command::new(env!("CARGO_BIN_EXE_checkgate"))
        .args(["resolve", "--standalone", "--output", "json", "--enable", "E001"])
        .arg("--repo-root")
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["summary"]["active"], 1);
    assert_eq!(v["summary"]["overrideMode"], true);
    assert_eq!(v["enabled"][0]["code"], "E001");
}

#[test]
fn binary_rejects_malformed_override() {
    let dir = tempdir().unwrap();
    workspace(dir.path());
    let out = Command::new(env!("CARGO_BIN_EXE_checkgate"))
        .args(["resolve", "--enable", "E1:a:b:c", "--repo-root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}
