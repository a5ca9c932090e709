mod fixtures;

use fixtures::*;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn romlut_dump(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("romlut_dump"));
    cmd.current_dir(cwd);
    cmd
}

#[test]
fn it_dumps_both_blobs_from_the_working_directory() {
    let d = tempdir().unwrap();
    write_synthetic_blobs(d.path());

    romlut_dump(d.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dumping arm9.bin constants.."))
        .stdout(predicate::str::contains("Dumping overlay_0011.bin constants.."))
        .stdout(predicate::str::contains("Done!"));

    let arm9 = fs::read_to_string(d.path().join("Dumped").join("arm9.txt")).unwrap();
    let overlay = fs::read_to_string(d.path().join("Dumped").join("overlay_0011.txt")).unwrap();

    assert!(arm9.starts_with(
        "============================================================\nEntity Symbol List Table\n"
    ));
    assert!(arm9.contains("\nEvent List Table\n"));
    assert!(arm9.contains(&format!("\"{}\"", LEVEL_NAME)));
    assert!(overlay.contains("\nEvent Sub File List Table\n"));
    assert!(overlay.contains("\nSpecial List Table\n"));
    assert!(overlay.contains(&format!("\"{}\"", SPECIAL_NAME)));
}

#[test]
fn it_keeps_going_when_one_blob_is_missing() {
    let d = tempdir().unwrap();
    fs::write(d.path().join("arm9.bin"), synthetic_arm9()).unwrap();

    romlut_dump(d.path())
        .args(["-o", "out"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("overlay_0011.bin"));

    assert!(d.path().join("out").join("arm9.txt").is_file());
    assert!(!d.path().join("out").join("overlay_0011.txt").exists());
}

#[test]
fn it_respects_explicit_input_paths() {
    let d = tempdir().unwrap();
    let blobs = d.path().join("blobs");
    fs::create_dir(&blobs).unwrap();
    let (arm9, overlay) = write_synthetic_blobs(&blobs);

    romlut_dump(d.path())
        .args(["--arm9", arm9.to_str().unwrap()])
        .args(["--overlay", overlay.to_str().unwrap()])
        .args(["-o", "reports"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Dumping {} constants..",
            arm9.display()
        )))
        .stdout(predicate::str::contains(format!(
            "Dumping {} constants..",
            overlay.display()
        )));

    assert!(d.path().join("reports").join("arm9.txt").is_file());
    assert!(d.path().join("reports").join("overlay_0011.txt").is_file());
}

#[test]
fn test_only_limits_the_dumped_blobs() {
    let d = tempdir().unwrap();
    fs::write(d.path().join("arm9.bin"), synthetic_arm9()).unwrap();

    romlut_dump(d.path())
        .args(["--only", "arm9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overlay_0011.bin").not());

    assert!(d.path().join("Dumped").join("arm9.txt").is_file());
    assert!(!d.path().join("Dumped").join("overlay_0011.txt").exists());
}

#[test]
fn test_it_refuses_to_overwrite_directory() {
    let d = tempdir().unwrap();
    write_synthetic_blobs(d.path());
    fs::create_dir_all(d.path().join("Dumped").join("arm9.txt")).unwrap();

    romlut_dump(d.path())
        .args(["--only", "arm9", "--no-confirm-overwrite"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("refusing to overwrite"));
}

#[test]
fn test_it_overwrites_file_anyways_if_passed_flag() {
    let d = tempdir().unwrap();
    write_synthetic_blobs(d.path());
    let report = d.path().join("Dumped").join("arm9.txt");
    fs::create_dir_all(report.parent().unwrap()).unwrap();
    fs::write(&report, b"I'm a file!").unwrap();

    romlut_dump(d.path())
        .args(["--only", "arm9", "--no-confirm-overwrite"])
        .assert()
        .success();

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("Entity Symbol List Table"));
    assert!(!text.contains("I'm a file!"));
}

#[test]
fn test_it_does_not_overwrite_without_a_terminal_to_confirm_on() {
    let d = tempdir().unwrap();
    write_synthetic_blobs(d.path());
    let report = d.path().join("Dumped").join("arm9.txt");
    fs::create_dir_all(report.parent().unwrap()).unwrap();
    fs::write(&report, b"I'm a file!").unwrap();

    romlut_dump(d.path())
        .args(["--only", "arm9"])
        .assert()
        .failure()
        .code(1);

    assert_eq!(fs::read(&report).unwrap(), b"I'm a file!");
}

#[test]
fn test_thread_count_does_not_change_reports() {
    let d = tempdir().unwrap();
    write_synthetic_blobs(d.path());

    for (threads, dir) in [("1", "single"), ("2", "multi")] {
        romlut_dump(d.path())
            .args(["-t", threads, "-o", dir])
            .assert()
            .success();
    }

    for report in ["arm9.txt", "overlay_0011.txt"] {
        let single = fs::read(d.path().join("single").join(report)).unwrap();
        let multi = fs::read(d.path().join("multi").join(report)).unwrap();
        assert!(single == multi, "{} differs between thread counts", report);
    }
}

#[test]
fn test_table_subcommand_prints_to_stdout() {
    let d = tempdir().unwrap();
    write_synthetic_blobs(d.path());

    romlut_dump(d.path())
        .args([
            "table",
            "-i",
            "arm9.bin",
            "-k",
            "level",
            "--offset",
            "0xA5490",
            "-n",
            "2",
            "--load-address",
            "0x02000000",
            "--title",
            "Two Levels",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\nTwo Levels\n"))
        .stdout(predicate::str::contains(
            "0x000A5490 ->     0,    -1,     0,   258, \"NULL\"\n",
        ))
        .stdout(predicate::str::contains(format!(
            "0x000A549C ->     1,    -1,     0,   258, \"{}\"\n",
            LEVEL_NAME
        )));

    assert!(!d.path().join("Dumped").exists());
}

#[test]
fn test_table_subcommand_rejects_unknown_kind() {
    let d = tempdir().unwrap();

    romlut_dump(d.path())
        .args([
            "table",
            "-i",
            "arm9.bin",
            "-k",
            "bogus",
            "--offset",
            "0",
            "-n",
            "1",
            "--load-address",
            "0",
        ])
        .assert()
        .failure();
}

#[test]
fn test_table_subcommand_rejects_table_past_end_of_blob() {
    let d = tempdir().unwrap();
    write_synthetic_blobs(d.path());

    romlut_dump(d.path())
        .args([
            "table",
            "-i",
            "arm9.bin",
            "-k",
            "level",
            "--offset",
            "0xA91F0",
            "-n",
            "4",
            "--load-address",
            "0x02000000",
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not fit"));
}
