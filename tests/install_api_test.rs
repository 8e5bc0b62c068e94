//! End-to-end tests for the version-gated install flow, driven entirely
//! through the public API against a scratch search context.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use toolshed::install::{ensure, is_available, EnsureOptions};
use toolshed::{PathStyle, SearchContext, ToolshedError};

/// Install a log subscriber so `RUST_LOG=toolshed=debug` shows what the
/// flows under test are doing.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fake `go` toolchain: `go install module@version` drops a script
/// into `$GOBIN` that reports the requested version.
fn create_fake_toolchain(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    let script = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/calls.log"
[ "$1" = "install" ] || exit 64
mod="${2%@*}"
version="${2#*@}"
name="${mod##*/}"
case "$name" in
  v[0-9]*) mod="${mod%/*}"; name="${mod##*/}" ;;
esac
mkdir -p "$GOBIN"
bin="$GOBIN/$name"
printf '#!/bin/sh\necho "%s version %s"\n' "$name" "$version" > "$bin"
chmod +x "$bin"
"#;
    let path = dir.join("go");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn toolchain_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn scratch(temp: &TempDir) -> (SearchContext, PathBuf) {
    init_tracing();
    let toolchain = temp.path().join("toolchain");
    create_fake_toolchain(&toolchain);
    let ctx = SearchContext::new(
        vec![toolchain.clone()],
        temp.path().join("bin"),
        PathStyle::Native,
    );
    (ctx, toolchain)
}

#[test]
fn ensure_installs_and_fresh_check_succeeds() {
    let temp = TempDir::new().unwrap();
    let (mut ctx, toolchain) = scratch(&temp);

    let opts = EnsureOptions {
        default_version: "1.2.3".to_string(),
        version_args: vec!["--version".to_string()],
        ..EnsureOptions::new("example.com/tools/mockctl")
    };
    ensure(&mut ctx, &opts).unwrap();

    // The bare version was normalized to its v-prefixed form.
    let calls = toolchain_calls(&toolchain);
    assert_eq!(calls, vec!["install example.com/tools/mockctl@v1.2.3"]);

    // A fresh availability check against the derived constraint passes.
    assert!(is_available(&ctx, "mockctl", &opts.version_args, "^1.2.3").unwrap());
}

#[test]
fn ensure_twice_installs_once() {
    let temp = TempDir::new().unwrap();
    let (mut ctx, toolchain) = scratch(&temp);

    let opts = EnsureOptions {
        default_version: "1.2.3".to_string(),
        version_args: vec!["--version".to_string()],
        ..EnsureOptions::new("example.com/tools/mockctl")
    };
    ensure(&mut ctx, &opts).unwrap();
    ensure(&mut ctx, &opts).unwrap();

    assert_eq!(toolchain_calls(&toolchain).len(), 1);
}

#[test]
fn ensure_with_major_version_identifier_installs_base_command() {
    let temp = TempDir::new().unwrap();
    let (mut ctx, toolchain) = scratch(&temp);

    let opts = EnsureOptions {
        default_version: "4.4.1".to_string(),
        version_args: vec!["--version".to_string()],
        ..EnsureOptions::new("example.com/mikefarah/yq/v4")
    };
    ensure(&mut ctx, &opts).unwrap();

    // The full identifier goes to the toolchain; the probe and the
    // installed binary use the derived command name.
    assert_eq!(
        toolchain_calls(&toolchain),
        vec!["install example.com/mikefarah/yq/v4@v4.4.1"]
    );
    assert!(ctx.resolve("yq").is_some());
    assert!(is_available(&ctx, "yq", &opts.version_args, "^4.4.1").unwrap());
}

#[test]
fn ensure_without_probe_is_presence_only() {
    let temp = TempDir::new().unwrap();
    let (mut ctx, toolchain) = scratch(&temp);

    let opts = EnsureOptions::new("example.com/tools/mockctl");
    ensure(&mut ctx, &opts).unwrap();
    assert_eq!(toolchain_calls(&toolchain).len(), 1);

    // Present now; no version args means no probe and no reinstall.
    ensure(&mut ctx, &opts).unwrap();
    assert_eq!(toolchain_calls(&toolchain).len(), 1);
}

#[test]
fn ensure_reports_unsatisfied_constraint_and_upgrades() {
    let temp = TempDir::new().unwrap();
    let (mut ctx, toolchain) = scratch(&temp);

    // Seed v2.0.2.
    let seed = EnsureOptions {
        default_version: "2.0.2".to_string(),
        version_args: vec!["--version".to_string()],
        ..EnsureOptions::new("example.com/tools/mockctl")
    };
    ensure(&mut ctx, &seed).unwrap();

    // The explicit constraint is authoritative over the default.
    let upgrade = EnsureOptions {
        constraint: "^2.0.3".to_string(),
        ..seed.clone()
    };
    ensure(&mut ctx, &upgrade).unwrap();

    let calls = toolchain_calls(&toolchain);
    assert_eq!(
        calls,
        vec![
            "install example.com/tools/mockctl@v2.0.2",
            "install example.com/tools/mockctl@v2.0.3",
        ]
    );
}

#[test]
fn ensure_aborts_on_probe_failure() {
    let temp = TempDir::new().unwrap();
    let (mut ctx, toolchain) = scratch(&temp);

    let broken_dir = temp.path().join("broken");
    fs::create_dir_all(&broken_dir).unwrap();
    let broken = broken_dir.join("mockctl");
    fs::write(&broken, "#!/bin/sh\nexit 2\n").unwrap();
    fs::set_permissions(&broken, fs::Permissions::from_mode(0o755)).unwrap();
    ctx.prepend(broken_dir);

    let opts = EnsureOptions {
        default_version: "1.2.3".to_string(),
        version_args: vec!["--version".to_string()],
        ..EnsureOptions::new("example.com/tools/mockctl")
    };
    let err = ensure(&mut ctx, &opts).unwrap_err();
    assert!(matches!(err, ToolshedError::ProbeFailed { .. }));
    assert!(toolchain_calls(&toolchain).is_empty());
}

#[test]
fn ensure_places_bin_dir_on_search_path() {
    let temp = TempDir::new().unwrap();
    let (mut ctx, _) = scratch(&temp);
    let bin = ctx.bin_dir().to_path_buf();
    assert!(!ctx.contains(&bin));

    ensure(
        &mut ctx,
        &EnsureOptions::new("example.com/tools/mockctl"),
    )
    .unwrap();

    assert!(ctx.contains(&bin));
    assert_eq!(ctx.dirs()[0], bin);
}
