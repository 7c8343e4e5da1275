use std::sync::Arc;

use cwlog_core::{Diagnostic, RecordingSink};
use cwlog_store::{Session, Storage, FILTERS_KEY};
use tempfile::TempDir;

#[test]
fn filters_survive_a_restart_on_disk() {
    let temp = TempDir::new().expect("tempdir");
    let dir = temp.path().join("cwlog");

    {
        let mut session =
            Session::open(Storage::Dir(dir.clone()), Arc::new(RecordingSink::new()))
                .expect("open");
        assert!(session
            .filters_mut()
            .set_from_identifier("20251125091033515637"));
        session.filters_mut().toggle_case_sensitive();
    }

    let contents =
        std::fs::read_to_string(dir.join(format!("{FILTERS_KEY}.json"))).expect("file");
    let json: serde_json::Value = serde_json::from_str(&contents).expect("json");
    assert_eq!(json["tridQuery"], "20251125091033515637");
    assert_eq!(json["datePreset"], "custom");
    assert_eq!(json["caseSensitive"], true);

    let session =
        Session::open(Storage::Dir(dir), Arc::new(RecordingSink::new())).expect("reopen");
    let snapshot = session.filters().snapshot();
    assert_eq!(snapshot.trid_query, "20251125091033515637");
    assert!(snapshot.case_sensitive);
    assert!(!snapshot.start_date.is_empty());
}

#[test]
fn corrupt_file_is_reported_and_replaced() {
    let temp = TempDir::new().expect("tempdir");
    let dir = temp.path().to_path_buf();
    std::fs::write(dir.join("filters.json"), "garbage").expect("write");

    let sink = Arc::new(RecordingSink::new());
    let mut session = Session::open(Storage::Dir(dir.clone()), sink.clone()).expect("open");
    assert!(!session.filters().is_active());
    assert!(matches!(
        sink.events().as_slice(),
        [Diagnostic::SnapshotLoadFailed { .. }]
    ));

    session.filters_mut().set_search_query("fresh");
    let contents = std::fs::read_to_string(dir.join("filters.json")).expect("file");
    assert!(contents.contains("\"searchQuery\":\"fresh\""));
}
