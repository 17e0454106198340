//! Integration tests for the project store.
//!
//! Tests cover:
//! - Adding projects (prepend, defaults, blank names)
//! - Renaming, removing and toggling favorites, including unknown ids
//! - Change notification to subscribers
//! - CSV export and writing it to a file

mod common;

use common::*;

#[test]
fn test_add_prepends_new_project_with_defaults() {
    let store = store_with(&["Alpha", "Beta"]);

    let id = store.add("Gamma").expect("non-blank name is accepted");

    let list = store.list();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].id, id);
    assert_eq!(list[0].name, "Gamma");
    assert_eq!(list[0].tables, 0);
    assert!(!list[0].favorite);
    assert_eq!(list[1].name, "Alpha");
    assert_eq!(list[2].name, "Beta");
}

#[test]
fn test_add_trims_the_name() {
    let store = ProjectStore::new();
    store.add("  Padded  ");
    assert_eq!(store.list()[0].name, "Padded");
}

#[test]
fn test_add_blank_name_is_ignored() {
    let store = store_with(&["Alpha"]);
    let before = store.list();

    assert!(store.add("").is_none());
    assert!(store.add("   ").is_none());

    assert_eq!(store.list(), before);
}

#[test]
fn test_added_ids_are_unique() {
    let store = ProjectStore::new();
    let a = store.add("Same").unwrap();
    let b = store.add("Same").unwrap();
    assert_ne!(a, b);
    store.remove(a);
    let c = store.add("Same").unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_rename_keeps_position_and_refreshes_timestamp() {
    let store = store_with(&["Alpha", "Beta", "Gamma"]);
    let target = store.list()[1].clone();

    std::thread::sleep(std::time::Duration::from_millis(5));
    store.rename(target.id, "Beta Renamed");

    let list = store.list();
    assert_eq!(list[1].id, target.id);
    assert_eq!(list[1].name, "Beta Renamed");
    assert!(list[1].updated_at > target.updated_at);
    assert_eq!(list[0].name, "Alpha");
    assert_eq!(list[2].name, "Gamma");
}

#[test]
fn test_rename_unknown_id_is_noop() {
    let store = store_with(&["Alpha"]);
    let before = store.list();
    store.rename(ProjectId::new(), "Ghost");
    assert_eq!(store.list(), before);
}

#[test]
fn test_remove_present_and_absent_ids() {
    let store = store_with(&["Alpha", "Beta"]);
    let before = store.list();

    store.remove(ProjectId::new());
    assert_eq!(store.list(), before);

    store.remove(before[0].id);
    let after = store.list();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "Beta");
}

#[test]
fn test_remove_many_ignores_unknown_ids() {
    let store = store_with(&["Alpha", "Beta", "Gamma"]);
    let list = store.list();

    store.remove_many(&[list[0].id, ProjectId::new(), list[2].id]);

    let after = store.list();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "Beta");
}

#[test]
fn test_toggle_favorite_is_an_involution() {
    let store = store_with(&["Alpha"]);
    let id = store.list()[0].id;

    store.toggle_favorite(id);
    assert!(store.get(id).unwrap().favorite);

    store.toggle_favorite(id);
    assert!(!store.get(id).unwrap().favorite);

    let before = store.list();
    store.toggle_favorite(ProjectId::new());
    assert_eq!(store.list(), before);
}

#[test]
fn test_seeded_store_contains_demo_projects() {
    let store = ProjectStore::seeded();
    let list = store.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "Marketing Campaign 2025");
    assert_eq!(list[0].tables, 15);
    assert!(list[0].favorite);
    assert_eq!(list[1].name, "Sales Analytics");
    assert!(!list[1].favorite);
}

#[test]
fn test_snapshots_are_not_affected_by_later_mutations() {
    let store = store_with(&["Alpha"]);
    let snapshot = store.list();
    store.add("Beta");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_subscribers_see_mutations_but_not_noops() {
    let store = store_with(&["Alpha"]);
    let mut rx = store.subscribe();

    store.remove(ProjectId::new());
    store.rename(ProjectId::new(), "Ghost");
    store.add("  ");
    assert!(!rx.has_changed().unwrap());

    store.add("Beta");
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().len(), 2);
}

#[tokio::test]
async fn test_subscriber_is_woken_by_mutation() -> anyhow::Result<()> {
    let store = store_with(&["Alpha"]);
    let mut rx = store.subscribe();

    let writer = store.clone();
    let handle = tokio::spawn(async move {
        writer.add("From task");
    });

    rx.changed().await?;
    assert_eq!(rx.borrow().first().map(|p| p.name.clone()), Some("From task".to_string()));
    handle.await?;
    Ok(())
}

#[test]
fn test_csv_export_quotes_fields_with_commas() -> anyhow::Result<()> {
    let store = store_with(&["Plain", "Sales, Q3"]);

    let csv = store.export_csv(&store.list())?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,name,updatedAt,tables,favorite");
    assert!(lines[1].contains(",Plain,"));
    assert!(lines[2].contains(",\"Sales, Q3\","));
    assert!(lines[2].ends_with(",0,false"));
    Ok(())
}

#[test]
fn test_csv_escaping_rules() {
    use projdash::core::csv::escape_field;

    assert_eq!(escape_field("plain"), "plain");
    assert_eq!(escape_field("with space"), "with space");
    assert_eq!(escape_field("a,b"), "\"a,b\"");
    assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
}

#[test]
fn test_csv_export_of_empty_selection_is_header_only() -> anyhow::Result<()> {
    let store = ProjectStore::new();
    assert_eq!(store.export_csv(&[])?, "id,name,updatedAt,tables,favorite");
    Ok(())
}

#[test]
fn test_download_csv_writes_file() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join(projdash::core::csv::DEFAULT_CSV_FILE_NAME);
    let store = ProjectStore::seeded();

    store.download_csv(&store.list(), &path)?;

    let written = std::fs::read_to_string(&path)?;
    assert_eq!(written, store.export_csv(&store.list())?);
    assert!(written.contains("Marketing Campaign 2025,"));
    assert!(written.contains(",15,true"));
    Ok(())
}
