//! End-to-end tests for the rename pipeline
//!
//! Exercises rename, restore, and purge against a real temporary directory
//! tree and an in-memory registry.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use mediavault::db::Database;
use mediavault::services::file_utils::is_already_renamed;
use mediavault::services::RenamerService;

async fn setup() -> (TempDir, Database, RenamerService) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let renamer = RenamerService::new(db.clone());
    (dir, db, renamer)
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"video bytes").unwrap();
    path
}

fn filenames_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn rename_assigns_identifier_and_registers_record() {
    let (dir, db, renamer) = setup().await;
    touch(dir.path(), "MyClip.mp4");

    let renamed = renamer.rename_tree(dir.path()).await.unwrap();
    assert_eq!(renamed.len(), 1);

    // The single file on disk now carries the identifier name
    let names = filenames_in(dir.path());
    assert_eq!(names, vec![renamed[0].clone()]);
    assert!(is_already_renamed(&names[0]));
    assert!(names[0].ends_with(".mp4"));

    let records = db.videos().get_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original_name, "MyClip.mp4");
    assert_eq!(records[0].new_name, renamed[0]);
    assert_eq!(
        Path::new(&records[0].path).file_name().unwrap().to_str().unwrap(),
        renamed[0]
    );
}

#[tokio::test]
async fn rename_skips_non_videos_and_recurses() {
    let (dir, db, renamer) = setup().await;
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "cover.jpg");
    let sub = dir.path().join("season1");
    fs::create_dir(&sub).unwrap();
    touch(&sub, "episode one.MKV");

    let renamed = renamer.rename_tree(dir.path()).await.unwrap();
    assert_eq!(renamed.len(), 1);
    assert!(renamed[0].ends_with(".mkv"));

    // Non-videos untouched, nested video renamed in place
    assert!(dir.path().join("notes.txt").exists());
    assert!(dir.path().join("cover.jpg").exists());
    assert_eq!(filenames_in(&sub), vec![renamed[0].clone()]);

    let records = db.videos().get_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original_name, "episode one.MKV");
}

#[tokio::test]
async fn rename_is_idempotent() {
    let (dir, _db, renamer) = setup().await;
    touch(dir.path(), "a.mp4");
    touch(dir.path(), "b.webm");

    let first = renamer.rename_tree(dir.path()).await.unwrap();
    assert_eq!(first.len(), 2);

    // No filesystem changes in between: second pass finds nothing to do
    let second = renamer.rename_tree(dir.path()).await.unwrap();
    assert!(second.is_empty());
    assert_eq!(filenames_in(dir.path()).len(), 2);
}

#[tokio::test]
async fn restore_round_trip_recovers_original_name() {
    let (dir, db, renamer) = setup().await;
    touch(dir.path(), "MyClip.mp4");

    renamer.rename_tree(dir.path()).await.unwrap();
    let restored = renamer.restore_all(true).await.unwrap();
    assert_eq!(restored.len(), 1);

    assert_eq!(filenames_in(dir.path()), vec!["MyClip.mp4".to_string()]);
    assert_eq!(
        restored[0].new_path,
        dir.path().join("MyClip.mp4").to_string_lossy()
    );

    // Registry follows the file when update_registry is set
    let records = db.videos().get_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].new_name, "MyClip.mp4");
    assert_eq!(
        records[0].path,
        dir.path().join("MyClip.mp4").to_string_lossy()
    );

    // The restored file is a fresh candidate for the next rename pass
    let renamed_again = renamer.rename_tree(dir.path()).await.unwrap();
    assert_eq!(renamed_again.len(), 1);
}

#[tokio::test]
async fn restore_without_registry_update_leaves_mapping_stale() {
    let (dir, db, renamer) = setup().await;
    touch(dir.path(), "MyClip.mp4");

    let renamed = renamer.rename_tree(dir.path()).await.unwrap();
    let restored = renamer.restore_all(false).await.unwrap();
    assert_eq!(restored.len(), 1);

    // File back under its human name, registry still pointing at the id name
    assert_eq!(filenames_in(dir.path()), vec!["MyClip.mp4".to_string()]);
    let records = db.videos().get_all().await.unwrap();
    assert_eq!(records[0].new_name, renamed[0]);
}

#[tokio::test]
async fn restore_is_a_noop_the_second_time() {
    let (dir, _db, renamer) = setup().await;
    touch(dir.path(), "MyClip.mp4");

    renamer.rename_tree(dir.path()).await.unwrap();
    assert_eq!(renamer.restore_all(true).await.unwrap().len(), 1);

    // Already-restored records are skipped, not errors
    assert!(renamer.restore_all(true).await.unwrap().is_empty());
    assert_eq!(filenames_in(dir.path()), vec!["MyClip.mp4".to_string()]);
}

#[tokio::test]
async fn restore_never_overwrites_an_occupied_target() {
    let (dir, db, renamer) = setup().await;
    touch(dir.path(), "MyClip.mp4");
    let renamed = renamer.rename_tree(dir.path()).await.unwrap();

    // Someone drops an unrelated file under the original name
    fs::write(dir.path().join("MyClip.mp4"), b"other contents").unwrap();

    let restored = renamer.restore_all(true).await.unwrap();
    assert!(restored.is_empty());

    // Both files intact, record unchanged
    let mut expected = vec!["MyClip.mp4".to_string(), renamed[0].clone()];
    expected.sort();
    assert_eq!(filenames_in(dir.path()), expected);
    assert_eq!(
        fs::read(dir.path().join("MyClip.mp4")).unwrap(),
        b"other contents"
    );
    let record = db.videos().get_all().await.unwrap().remove(0);
    assert_eq!(record.new_name, renamed[0]);
}

#[tokio::test]
async fn restore_skips_missing_files() {
    let (dir, _db, renamer) = setup().await;
    touch(dir.path(), "gone.mp4");
    touch(dir.path(), "kept.mp4");

    renamer.rename_tree(dir.path()).await.unwrap();

    // Delete one renamed file out from under the registry
    let renamed_names = filenames_in(dir.path());
    fs::remove_file(dir.path().join(&renamed_names[0])).unwrap();

    let restored = renamer.restore_all(true).await.unwrap();
    assert_eq!(restored.len(), 1);
}

#[tokio::test]
async fn purge_removes_exactly_the_missing_records() {
    let (dir, db, renamer) = setup().await;
    touch(dir.path(), "gone.mp4");
    touch(dir.path(), "kept.mp4");
    renamer.rename_tree(dir.path()).await.unwrap();

    let gone = db
        .videos()
        .find_by_substring(mediavault::db::SearchField::OriginalName, "gone")
        .await
        .unwrap()
        .remove(0);
    fs::remove_file(&gone.path).unwrap();

    let removed = renamer.purge_missing().await.unwrap();
    assert_eq!(removed, vec![gone.path]);

    let remaining = db.videos().get_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].original_name, "kept.mp4");

    // Second sweep removes nothing further
    assert!(renamer.purge_missing().await.unwrap().is_empty());
}

#[tokio::test]
async fn rename_tree_on_missing_root_is_empty() {
    let (dir, _db, renamer) = setup().await;
    let missing = dir.path().join("no-such-dir");
    let renamed = renamer.rename_tree(&missing).await.unwrap();
    assert!(renamed.is_empty());
}
