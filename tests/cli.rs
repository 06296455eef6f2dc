mod common;

use std::process::Command;

use common::{content, sample, ImageBuilder};
use sfs::ops::directory::DirEntry;
use sfs::structure::inode::InodeKind;
use sfs::util::serializable::ByteSerializable;

fn dicpo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dicpo"))
}

fn dils() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dils"))
}

#[test]
fn dicpo_copies_into_current_directory() {
    let image = sample().write();
    let dir = tempfile::tempdir().unwrap();

    let status = dicpo()
        .current_dir(dir.path())
        .arg(image.path())
        .arg("readme.txt")
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(std::fs::read(dir.path().join("readme.txt")).unwrap(), content(100, 1));
}

#[test]
fn dicpo_missing_name() {
    let image = sample().write();
    let dir = tempfile::tempdir().unwrap();

    let output = dicpo()
        .current_dir(dir.path())
        .arg(image.path())
        .arg("missing")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
    assert!(!dir.path().join("missing").exists());
}

#[test]
fn dicpo_wrong_argument_count() {
    let output = dicpo().arg("only-one").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "{}", stderr);
    assert!(stderr.starts_with("error: "));
    assert!(stderr.contains("Usage: dicpo"));
}

#[test]
fn dicpo_output_cannot_be_created() {
    let image = sample().write();
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("readme.txt")).unwrap();

    let output = dicpo()
        .current_dir(dir.path())
        .arg(image.path())
        .arg("readme.txt")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "{}", stderr);
    assert!(stderr.starts_with("error: cannot copy readme.txt"), "{}", stderr);
    assert!(dir.path().join("readme.txt").is_dir());
}

#[test]
fn dicpo_help_succeeds() {
    let output = dicpo().arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("dicpo"));
}

#[test]
fn dils_short_listing() {
    let image = sample().write();
    let output = dils().arg(image.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "readme.txt\nbin\n");
}

#[test]
fn dils_long_listing() {
    let image = sample().write();
    let output = dils().arg("-l").arg(image.path()).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("-rw-r--r--  1  1000   100    100 "));
    assert!(lines[0].ends_with(" readme.txt"));
    assert!(lines[1].ends_with(" bin"));
}

#[test]
fn dils_malformed_arguments() {
    assert_eq!(dils().output().unwrap().status.code(), Some(1));

    let output = dils().arg("-x").arg("disk.img").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "{}", stderr);
    assert!(stderr.contains("-x"));
}

#[test]
fn dils_prints_raw_names() {
    let mut builder = ImageBuilder::new(0, 4, 0);
    let listing = DirEntry { name: vec![0xff, b'a'], inode: 1 }.to_bytes();
    builder.add_inode(0, InodeKind::Directory, 0o755, &listing);
    builder.add_file(1, b"x");
    let image = builder.write();

    let output = dils().arg(image.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, vec![0xff, b'a', b'\n']);
}

#[test]
fn dils_foreign_image() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), vec![0u8; 128 * 8]).unwrap();

    let output = dils().arg(file.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no superblock"));
}
