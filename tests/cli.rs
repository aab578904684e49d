use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn pyseal(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pyseal").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut entries: Vec<(String, Vec<u8>)> = list_tree(dir)
        .into_iter()
        .map(|path| {
            let rel = path.strip_prefix(dir).unwrap().display().to_string();
            let bytes = if path.is_file() {
                fs::read(&path).unwrap()
            } else {
                Vec::new()
            };
            (rel, bytes)
        })
        .collect();
    entries.sort();
    entries
}

fn list_tree(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(list_tree(&path));
        }
        out.push(path);
    }
    out
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("pyseal")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("diff"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_clean_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("build/app")).unwrap();
    fs::create_dir_all(dir.path().join("app/__pycache__")).unwrap();
    fs::write(dir.path().join("app/__pycache__/m.pyc"), "bytecode").unwrap();
    fs::write(dir.path().join("app/m.py"), "x = 1\n").unwrap();

    pyseal(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted 2 dirs"));

    assert!(!dir.path().join("build").exists());
    assert!(!dir.path().join("app/__pycache__").exists());
    assert!(dir.path().join("app/m.py").exists());

    pyseal(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted 0 dirs"));
}

#[test]
fn test_clean_reads_build_dir_from_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".pyseal.toml"),
        "[pyseal]\nbuild_dir = \"dist\"\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("dist")).unwrap();
    fs::create_dir_all(dir.path().join("build")).unwrap();

    pyseal(dir.path()).arg("clean").assert().success();

    assert!(!dir.path().join("dist").exists());
    assert!(dir.path().join("build").exists());
}

#[test]
fn test_invalid_config_is_ignored() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".pyseal.toml"), "[pyseal\nthis is not toml").unwrap();
    fs::create_dir_all(dir.path().join("build")).unwrap();

    pyseal(dir.path()).arg("clean").assert().success();
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_init_decline_keeps_build_dir() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/app")).unwrap();
    fs::write(dir.path().join("src/app/main.py"), "print('hi')\n").unwrap();
    fs::create_dir_all(dir.path().join("out/nested")).unwrap();
    fs::write(dir.path().join("out/keep.txt"), "precious").unwrap();
    fs::write(dir.path().join("out/nested/data.bin"), [0u8, 1, 2, 3]).unwrap();

    let before = snapshot(&dir.path().join("out"));

    pyseal(dir.path())
        .args(["init", "src", "--build-dir", "out"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("Aborted"));

    assert_eq!(snapshot(&dir.path().join("out")), before);
}

#[test]
fn test_init_requires_existing_source() {
    let dir = tempdir().unwrap();

    pyseal(dir.path())
        .args(["init", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source directory not found"));

    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_run_without_sources_succeeds() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), "docs").unwrap();

    pyseal(dir.path())
        .args(["run", "--python", "pyseal-no-such-python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total 0 files"));
}

#[test]
fn test_run_with_ignored_sources_only() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tests")).unwrap();
    fs::write(dir.path().join("tests/test_a.py"), "assert True\n").unwrap();

    pyseal(dir.path())
        .args(["run", ".", "-i", "tests/", "--python", "pyseal-no-such-python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignored 1 files"));

    assert!(dir.path().join("tests/test_a.py").exists());
}

#[test]
fn test_run_missing_interpreter_is_fatal() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.py"), "x = 1\n").unwrap();

    pyseal(dir.path())
        .args(["run", "--python", "pyseal-no-such-python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pyseal-no-such-python"));

    assert!(dir.path().join("app.py").exists());
}

#[test]
fn test_diff_with_invalid_revisions_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.py"), "x = 1\n").unwrap();

    pyseal(dir.path())
        .args(["diff", "no-such-rev", "HEAD", "--python", "pyseal-no-such-python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_clean_and_keep_source_conflict() {
    let dir = tempdir().unwrap();

    pyseal(dir.path())
        .args(["run", "--clean-source", "--keep-source"])
        .assert()
        .failure();
}
