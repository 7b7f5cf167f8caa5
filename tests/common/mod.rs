use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};

pub fn treehash_cmd() -> Command {
    cargo_bin_cmd!("treehash")
}

/// Runs `treehash generate <root> <export_dir>` and returns the snapshot
/// path it produced. Expects `export_dir` to be fresh for this run.
// Each integration test file is compiled as its own crate; the generate
// tests drive the binary directly and leave this helper unused there.
#[allow(dead_code)]
pub fn generate_snapshot(root: &Path, export_dir: &Path) -> PathBuf {
    treehash_cmd()
        .arg("generate")
        .arg(root)
        .arg(export_dir)
        .assert()
        .success();

    find_export(export_dir, "snap")
}

/// Finds the single exported file with the given extension under the
/// run directory that `generate` created inside `export_dir`.
pub fn find_export(export_dir: &Path, extension: &str) -> PathBuf {
    let run_dir = std::fs::read_dir(export_dir)
        .expect("export dir should be readable")
        .map(|entry| entry.expect("export dir entry should be readable").path())
        .find(|path| path.is_dir())
        .expect("generate should create a run directory");

    std::fs::read_dir(&run_dir)
        .expect("run dir should be readable")
        .map(|entry| entry.expect("run dir entry should be readable").path())
        .find(|path| path.extension().is_some_and(|ext| ext == extension))
        .unwrap_or_else(|| panic!("no .{extension} file in {}", run_dir.display()))
}
