use pageloom_core::PageIntent;
use pageloom_db::*;

#[test]
fn children_and_roots() {
    let conn = open_memory().unwrap();
    let home = insert_page(&conn, &PageIntent::new("Home", "home"), 72).unwrap();
    let about = insert_page(
        &conn,
        &PageIntent::new("About", "about").with_parent(Some(home)),
        72,
    )
    .unwrap();
    insert_page(
        &conn,
        &PageIntent::new("Team", "team").with_parent(Some(about)),
        72,
    )
    .unwrap();
    insert_page(&conn, &PageIntent::new("Contact", "contact"), 72).unwrap();

    let roots: Vec<String> = children_of(&conn, None)
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(roots, vec!["Home", "Contact"]);

    let under_home = children_of(&conn, Some(home)).unwrap();
    assert_eq!(under_home.len(), 1);
    assert_eq!(under_home[0].id, about);

    assert_eq!(list_pages(&conn).unwrap().len(), 4);
}

#[test]
fn stats_count_everything() {
    let conn = open_memory().unwrap();
    let empty = page_stats(&conn).unwrap();
    assert_eq!(empty.pages, 0);
    assert_eq!(empty.imports, 0);

    let home = insert_page(&conn, &PageIntent::new("Home", "home"), 72).unwrap();
    insert_page(
        &conn,
        &PageIntent::new("About", "about").with_parent(Some(home)),
        72,
    )
    .unwrap();
    insert_import_log(&conn, &ImportLog::new("csv", "a.csv")).unwrap();

    let stats = page_stats(&conn).unwrap();
    assert_eq!(stats.pages, 2);
    assert_eq!(stats.root_pages, 1);
    assert_eq!(stats.media, 0);
    assert_eq!(stats.imports, 1);
}
