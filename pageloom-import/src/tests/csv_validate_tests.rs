use super::*;

use std::io::Write;

fn write_upload(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> UploadDescriptor {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content).unwrap();
    UploadDescriptor::from_path(&path).unwrap()
}

fn rows_csv(n: usize) -> String {
    let mut s = String::from("post_title,post_parent\n");
    for i in 0..n {
        s.push_str(&format!("Page {i},\n"));
    }
    s
}

#[test]
fn test_valid_upload_parses() {
    let dir = tempfile::tempdir().unwrap();
    let upload = write_upload(&dir, "pages.csv", b"post_title,post_parent\nHome,\nAbout,Home\n");
    let table = validate_upload(&upload, &ValidationLimits::default()).unwrap();
    assert_eq!(table.headers, vec!["post_title", "post_parent"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1], vec!["About", "Home"]);
}

#[test]
fn test_transport_error_checked_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut upload = write_upload(&dir, "pages.exe", b"\x7FELF");
    upload.transport_error_code = 3;
    let err = validate_upload(&upload, &ValidationLimits::default()).unwrap_err();
    assert!(matches!(
        err,
        ImportError::UploadTransport(UploadStatus::Partial)
    ));
}

#[test]
fn test_declared_size_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let mut upload = write_upload(&dir, "pages.csv", b"post_title\nHome\n");
    upload.declared_size = 5 * 1024 * 1024 + 1;
    let err = validate_upload(&upload, &ValidationLimits::default()).unwrap_err();
    assert!(matches!(err, ImportError::FileTooLarge { .. }));
}

#[test]
fn test_actual_size_too_large_despite_small_declared_size() {
    let dir = tempfile::tempdir().unwrap();
    let mut upload = write_upload(&dir, "pages.csv", &rows_csv(50).into_bytes());
    upload.declared_size = 10;
    let limits = ValidationLimits {
        max_file_size: 100,
        max_rows: 10_000,
    };
    let err = validate_upload(&upload, &limits).unwrap_err();
    assert!(matches!(err, ImportError::FileTooLarge { limit: 100, .. }));
}

#[test]
fn test_missing_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let upload = UploadDescriptor {
        temp_path: dir.path().join("gone.csv"),
        declared_name: "gone.csv".to_string(),
        declared_size: 10,
        transport_error_code: 0,
    };
    let err = validate_upload(&upload, &ValidationLimits::default()).unwrap_err();
    assert!(matches!(err, ImportError::UnreadableFile { .. }));
}

#[test]
fn test_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let upload = write_upload(&dir, "pages.csv", b"");
    let err = validate_upload(&upload, &ValidationLimits::default()).unwrap_err();
    assert!(matches!(err, ImportError::EmptyFile));
}

#[test]
fn test_binary_content_rejected_before_extension() {
    let dir = tempfile::tempdir().unwrap();
    let upload = write_upload(&dir, "pages.csv", b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR");
    let err = validate_upload(&upload, &ValidationLimits::default()).unwrap_err();
    match err {
        ImportError::InvalidMimeType(mime) => assert_eq!(mime, "image/png"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let upload = write_upload(&dir, "pages.txt", b"post_title\nHome\n");
    let err = validate_upload(&upload, &ValidationLimits::default()).unwrap_err();
    assert!(matches!(err, ImportError::InvalidExtension(name) if name == "pages.txt"));
}

#[test]
fn test_extension_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let upload = write_upload(&dir, "PAGES.CSV", b"post_title\nHome\n");
    assert!(validate_upload(&upload, &ValidationLimits::default()).is_ok());
}

#[test]
fn test_has_csv_extension() {
    assert!(has_csv_extension("pages.csv"));
    assert!(has_csv_extension("Pages.Csv"));
    assert!(has_csv_extension(".csv"));
    assert!(!has_csv_extension("csv"));
    assert!(!has_csv_extension("pages.csv.txt"));
    assert!(!has_csv_extension("pagescsv"));
    assert!(!has_csv_extension(""));
}

#[test]
fn test_exactly_max_rows_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let upload = write_upload(&dir, "pages.csv", rows_csv(10_000).as_bytes());
    let table = validate_upload(&upload, &ValidationLimits::default()).unwrap();
    assert_eq!(table.rows.len(), 10_000);
}

#[test]
fn test_one_over_max_rows_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let upload = write_upload(&dir, "pages.csv", rows_csv(10_001).as_bytes());
    let err = validate_upload(&upload, &ValidationLimits::default()).unwrap_err();
    assert!(matches!(
        err,
        ImportError::TooManyRows {
            rows: 10_001,
            limit: 10_000
        }
    ));
}

#[test]
fn test_parse_strips_bom_and_trims_headers() {
    let table = parse_csv(b"\xEF\xBB\xBF post_title , slug \nHome,home\n", 10).unwrap();
    assert_eq!(table.headers, vec!["post_title", "slug"]);
}

#[test]
fn test_parse_keeps_ragged_rows() {
    let table = parse_csv(b"a,b\n1\n1,2,3\n", 10).unwrap();
    assert_eq!(table.rows, vec![vec!["1"], vec!["1", "2", "3"]]);
}

#[test]
fn test_parse_quoted_fields() {
    let table = parse_csv(b"post_title,meta_description\n\"Hello, World\",\"Line \"\"quoted\"\"\"\n", 10)
        .unwrap();
    assert_eq!(table.rows[0], vec!["Hello, World", "Line \"quoted\""]);
}

#[test]
fn test_parse_lossy_utf8() {
    let table = parse_csv(b"post_title\nCaf\xE9\n", 10).unwrap();
    assert_eq!(table.rows[0][0], "Caf\u{FFFD}");
}

#[test]
fn test_sniff_text_types() {
    assert_eq!(sniff_mime(b"a,b\n1,2\n"), "text/csv");
    assert_eq!(sniff_mime(b"\xEF\xBB\xBFa,b\n"), "text/csv");
    assert_eq!(sniff_mime(b"post_title\nHome\n"), "text/plain");
    assert_eq!(sniff_mime(b"  <!DOCTYPE html><html>"), "text/html");
    assert_eq!(sniff_mime(b"PK\x03\x04rest"), "application/zip");
    assert_eq!(sniff_mime(b"a,b\x00c"), "application/octet-stream");
    assert_eq!(sniff_mime(b""), "application/x-empty");
}

#[test]
fn test_sniffed_types_allowed() {
    assert!(ALLOWED_MIME_TYPES.contains(&sniff_mime(b"a,b\n")));
    assert!(ALLOWED_MIME_TYPES.contains(&sniff_mime(b"title\n")));
    assert!(!ALLOWED_MIME_TYPES.contains(&sniff_mime(b"<html>")));
}

#[test]
fn test_upload_status_codes() {
    assert!(UploadStatus::from_code(0).is_ok());
    assert_eq!(UploadStatus::from_code(1), UploadStatus::IniSize);
    assert_eq!(UploadStatus::from_code(4), UploadStatus::NoFile);
    assert_eq!(UploadStatus::from_code(42), UploadStatus::Unknown(42));
}
