use pageloom_core::{PageId, PageIntent};
use pageloom_db::*;

fn page(title: &str, slug: &str) -> PageIntent {
    PageIntent::new(title, slug)
}

#[test]
fn insert_and_find_page() {
    let conn = open_memory().unwrap();
    let intent = page("About Us", "about-us")
        .with_status("draft")
        .with_template("wide")
        .with_excerpt("Who we are");
    let id = insert_page(&conn, &intent, 72).unwrap();

    let row = find_page(&conn, id).unwrap().unwrap();
    assert_eq!(row.id, id);
    assert_eq!(row.title, "About Us");
    assert_eq!(row.slug, "about-us");
    assert_eq!(row.status, "draft");
    assert_eq!(row.template, "wide");
    assert_eq!(row.excerpt, "Who we are");
    assert_eq!(row.parent_id, None);
    assert_eq!(row.featured_media_id, None);

    assert_eq!(find_page_by_slug(&conn, "about-us").unwrap().unwrap().id, id);
    assert!(find_page_by_slug(&conn, "missing").unwrap().is_none());
    assert!(find_page(&conn, PageId(999)).unwrap().is_none());
}

#[test]
fn parent_is_stored() {
    let conn = open_memory().unwrap();
    let home = insert_page(&conn, &page("Home", "home"), 72).unwrap();
    let about = insert_page(&conn, &page("About", "about").with_parent(Some(home)), 72).unwrap();

    assert_eq!(find_page(&conn, about).unwrap().unwrap().parent_id, Some(home));
}

#[test]
fn unknown_parent_is_rejected() {
    let conn = open_memory().unwrap();
    let result = insert_page(&conn, &page("Lost", "lost").with_parent(Some(PageId(42))), 72);
    assert!(matches!(result, Err(OperationError::Sqlite(_))));
    assert!(list_pages(&conn).unwrap().is_empty());
}

#[test]
fn duplicate_slugs_get_numbered() {
    let conn = open_memory().unwrap();
    let a = insert_page(&conn, &page("Team", "team"), 72).unwrap();
    let b = insert_page(&conn, &page("Team", "team"), 72).unwrap();
    let c = insert_page(&conn, &page("Team", "team"), 72).unwrap();

    assert_eq!(find_page(&conn, a).unwrap().unwrap().slug, "team");
    assert_eq!(find_page(&conn, b).unwrap().unwrap().slug, "team-2");
    assert_eq!(find_page(&conn, c).unwrap().unwrap().slug, "team-3");
}

#[test]
fn numbered_slug_respects_max_length() {
    let conn = open_memory().unwrap();
    insert_page(&conn, &page("Long", "abcde-fgh"), 9).unwrap();
    assert_eq!(unique_slug(&conn, "abcde-fgh", 9).unwrap(), "abcde-f-2");
    // Truncating to "abcde-" must not leave a double hyphen
    assert_eq!(unique_slug(&conn, "abcde-fgh", 8).unwrap(), "abcde-2");
}

#[test]
fn empty_slug_falls_back() {
    let conn = open_memory().unwrap();
    let a = insert_page(&conn, &page("?", ""), 72).unwrap();
    let b = insert_page(&conn, &page("!", ""), 72).unwrap();
    assert_eq!(find_page(&conn, a).unwrap().unwrap().slug, "page");
    assert_eq!(find_page(&conn, b).unwrap().unwrap().slug, "page-2");
}

#[test]
fn media_and_featured_link() {
    let conn = open_memory().unwrap();
    let id = insert_page(&conn, &page("Gallery", "gallery"), 72).unwrap();
    let media_id = insert_media(
        &conn,
        &NewMedia {
            page_id: id,
            source_url: "https://example.com/a.png",
            title: "Gallery",
            alt: "Gallery",
            description: "",
            mime_type: "image/png",
            data: &[0x89, b'P', b'N', b'G'],
        },
    )
    .unwrap();
    set_featured_media(&conn, id, media_id).unwrap();

    let row = find_page(&conn, id).unwrap().unwrap();
    assert_eq!(row.featured_media_id, Some(media_id));

    let media = media_for_page(&conn, id).unwrap();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].byte_size, 4);
    assert_eq!(media[0].mime_type, "image/png");
}

#[test]
fn set_featured_media_missing_page() {
    let conn = open_memory().unwrap();
    assert!(matches!(
        set_featured_media(&conn, PageId(7), 1),
        Err(OperationError::NotFound { .. })
    ));
}

#[test]
fn import_log_round_trip() {
    let conn = open_memory().unwrap();
    let mut first = ImportLog::new("csv", "pages.csv");
    first.imported_at = "2025-01-01T00:00:00+00:00".to_string();
    first.pages_created = 4;
    first.records_skipped = 1;
    insert_import_log(&conn, &first).unwrap();

    let mut second = ImportLog::new("outline", "-");
    second.imported_at = "2025-02-01T00:00:00+00:00".to_string();
    second.images_attached = 2;
    second.image_failures = 1;
    insert_import_log(&conn, &second).unwrap();

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].source_kind, "outline");
    assert_eq!(logs[0].images_attached, 2);
    assert_eq!(logs[1].source_name, "pages.csv");
    assert_eq!(logs[1].pages_created, 4);

    assert_eq!(list_import_logs(&conn, Some(1)).unwrap().len(), 1);
}
