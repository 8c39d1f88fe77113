use chrono::{NaiveDate, NaiveTime};
use daylog_core::{Config, FsNoteStore, NoteIndex, NoteStore};
use std::fs;

fn store_in(dir: &std::path::Path) -> FsNoteStore {
    let config = Config::with_base_dir(dir.to_path_buf()).unwrap();
    FsNoteStore::new(config)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn reload_sorts_by_date_descending_regardless_of_creation_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    // Created out of calendar order on purpose.
    store.append(date(2024, 3, 6), time(9, 0), "middle").unwrap();
    store.append(date(2023, 12, 31), time(9, 0), "oldest").unwrap();
    store.append(date(2024, 3, 7), time(9, 0), "newest").unwrap();

    let mut index = NoteIndex::new();
    index.reload(&store).unwrap();

    let titles: Vec<String> = index.entries().iter().map(|file| file.title()).collect();
    assert_eq!(
        titles,
        ["03-07-2024.md", "03-06-2024.md", "12-31-2023.md"]
    );
}

#[test]
fn empty_query_returns_the_full_catalog_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.append(date(2024, 3, 5), time(9, 0), "alpha").unwrap();
    store.append(date(2024, 3, 6), time(9, 0), "beta").unwrap();

    let mut index = NoteIndex::new();
    index.reload(&store).unwrap();

    assert_eq!(index.search(&store, ""), index.entries());
    assert_eq!(index.search(&store, "   "), index.entries());
}

#[test]
fn search_is_case_insensitive_and_preserves_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.append(date(2024, 3, 5), time(9, 0), "Bought MILK today").unwrap();
    store.append(date(2024, 3, 6), time(9, 0), "walked the dog").unwrap();
    store.append(date(2024, 3, 7), time(9, 0), "milk again").unwrap();

    let mut index = NoteIndex::new();
    index.reload(&store).unwrap();

    let hits = index.search(&store, "mIlK");
    let titles: Vec<String> = hits.iter().map(|file| file.title()).collect();
    assert_eq!(titles, ["03-07-2024.md", "03-05-2024.md"]);

    assert!(index.search(&store, "no such text").is_empty());
}

#[test]
fn unreadable_files_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.append(date(2024, 3, 5), time(9, 0), "kept milk").unwrap();
    store.append(date(2024, 3, 6), time(9, 0), "vanished milk").unwrap();

    let mut index = NoteIndex::new();
    index.reload(&store).unwrap();

    // The catalog still references the file after it disappears from disk.
    fs::remove_file(dir.path().join("logs").join("03-06-2024.md")).unwrap();

    let hits = index.search(&store, "milk");
    let titles: Vec<String> = hits.iter().map(|file| file.title()).collect();
    assert_eq!(titles, ["03-05-2024.md"]);
}
