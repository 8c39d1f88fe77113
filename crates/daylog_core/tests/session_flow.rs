use chrono::Local;
use daylog_core::{
    file_name_for, Config, Flow, FsNoteStore, InputEvent, NoteStore, Session, ViewModel,
};
use std::fs;

fn setup(dir: &std::path::Path) -> (Session<FsNoteStore>, Config) {
    let config = Config::with_base_dir(dir.to_path_buf()).unwrap();
    fs::create_dir_all(config.logs_dir()).unwrap();
    let session = Session::new(FsNoteStore::new(config.clone()), &config);
    (session, config)
}

fn type_text(session: &mut Session<FsNoteStore>, text: &str) {
    for c in text.chars() {
        session.handle_event(InputEvent::Char(c));
    }
}

#[test]
fn composing_a_note_creates_todays_log_and_returns_to_browse() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, config) = setup(dir.path());

    session.handle_event(InputEvent::BeginCompose);
    type_text(&mut session, "bought milk");
    assert_eq!(session.handle_event(InputEvent::Confirm), Flow::Continue);

    let today_name = file_name_for(Local::now().date_naive());
    match session.view() {
        ViewModel::Browse { items, error, .. } => {
            assert!(error.is_none());
            assert!(items.iter().any(|item| item.title == today_name));
        }
        other => panic!("expected Browse, got {other:?}"),
    }

    let content = fs::read_to_string(config.logs_dir().join(&today_name)).unwrap();
    assert!(content.ends_with("] bought milk\n"), "content: {content:?}");
}

#[test]
fn confirming_an_invalid_note_surfaces_the_error_and_keeps_the_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, config) = setup(dir.path());

    session.handle_event(InputEvent::BeginCompose);
    type_text(&mut session, "   ");
    session.handle_event(InputEvent::Confirm);

    match session.view() {
        ViewModel::Compose { buffer, error } => {
            assert_eq!(buffer, "   ");
            assert!(error.expect("error must surface").contains("empty"));
        }
        other => panic!("expected Compose, got {other:?}"),
    }
    // Nothing was written.
    assert_eq!(fs::read_dir(config.logs_dir()).unwrap().count(), 0);
}

#[test]
fn opening_a_log_shows_its_content_in_view_mode() {
    let dir = tempfile::tempdir().unwrap();
    let (_, config) = setup(dir.path());
    fs::write(
        config.logs_dir().join("03-05-2024.md"),
        "- [14:07] bought milk\n",
    )
    .unwrap();
    let mut session = Session::new(FsNoteStore::new(config.clone()), &config);

    session.handle_event(InputEvent::Confirm);
    match session.view() {
        ViewModel::View { title, content, .. } => {
            assert_eq!(title, "03-05-2024.md");
            assert_eq!(content, "- [14:07] bought milk\n");
        }
        other => panic!("expected View, got {other:?}"),
    }

    session.handle_event(InputEvent::Back);
    assert!(matches!(session.view(), ViewModel::Browse { .. }));
}

#[test]
fn search_filters_browse_until_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    let (_, config) = setup(dir.path());
    fs::write(config.logs_dir().join("03-05-2024.md"), "- [09:00] milk\n").unwrap();
    fs::write(config.logs_dir().join("03-06-2024.md"), "- [09:00] dog\n").unwrap();
    let mut session = Session::new(FsNoteStore::new(config.clone()), &config);

    session.handle_event(InputEvent::BeginSearch);
    type_text(&mut session, "milk");
    session.handle_event(InputEvent::Confirm);

    match session.view() {
        ViewModel::Browse { items, filter, .. } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].title, "03-05-2024.md");
            assert_eq!(filter, Some("milk"));
        }
        other => panic!("expected Browse, got {other:?}"),
    }

    session.handle_event(InputEvent::BeginSearch);
    session.handle_event(InputEvent::Cancel);
    match session.view() {
        ViewModel::Browse { items, filter, .. } => {
            assert_eq!(items.len(), 2);
            assert!(filter.is_none());
        }
        other => panic!("expected Browse, got {other:?}"),
    }
}

#[test]
fn backup_produces_a_zip_under_the_backups_directory() {
    let dir = tempfile::tempdir().unwrap();
    let (_, config) = setup(dir.path());
    fs::write(config.logs_dir().join("03-05-2024.md"), "- [09:00] milk\n").unwrap();
    let mut session = Session::new(FsNoteStore::new(config.clone()), &config);

    session.handle_event(InputEvent::TriggerBackup);
    assert!(matches!(
        session.view(),
        ViewModel::Browse { error: None, .. }
    ));

    let archives: Vec<_> = fs::read_dir(config.backups_dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(archives.len(), 1);
    assert!(archives[0].starts_with("backup-"));
    assert!(archives[0].ends_with(".zip"));
}

#[test]
fn catalog_refresh_after_append_is_visible_without_restart() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _) = setup(dir.path());

    match session.view() {
        ViewModel::Browse { items, .. } => assert!(items.is_empty()),
        other => panic!("expected Browse, got {other:?}"),
    }

    session.handle_event(InputEvent::BeginCompose);
    type_text(&mut session, "note");
    session.handle_event(InputEvent::Confirm);

    match session.view() {
        ViewModel::Browse { items, .. } => assert_eq!(items.len(), 1),
        other => panic!("expected Browse, got {other:?}"),
    }
}
