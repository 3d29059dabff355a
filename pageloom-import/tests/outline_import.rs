use pageloom_core::{FeaturedImage, MemorySink, PageId, PageIntent, PageSink, SinkError};
use pageloom_import::*;

fn parent_of(sink: &MemorySink, title: &str) -> Option<PageId> {
    sink.find_by_title(title).unwrap().intent.parent
}

fn id_of(sink: &MemorySink, title: &str) -> PageId {
    sink.find_by_title(title).unwrap().id
}

#[test]
fn outline_builds_hierarchy() {
    let mut sink = MemorySink::new();
    let report = import_outline(
        "Home\n-About\n--Team\n--History\n-Services\nContact\n",
        &mut sink,
        &ImportOptions::default(),
        None,
    );

    assert_eq!(report.created, 6);
    assert!(report.skipped.is_empty());
    assert_eq!(parent_of(&sink, "Home"), None);
    assert_eq!(parent_of(&sink, "About"), Some(id_of(&sink, "Home")));
    assert_eq!(parent_of(&sink, "Team"), Some(id_of(&sink, "About")));
    assert_eq!(parent_of(&sink, "History"), Some(id_of(&sink, "About")));
    assert_eq!(parent_of(&sink, "Services"), Some(id_of(&sink, "Home")));
    assert_eq!(parent_of(&sink, "Contact"), None);
}

#[test]
fn dedent_invalidates_descendants() {
    let mut sink = MemorySink::new();
    let report = import_outline("A\n-B\n-C\nD\n-E\n", &mut sink, &ImportOptions::default(), None);

    assert_eq!(report.created, 5);
    let e_parent = parent_of(&sink, "E");
    assert_eq!(e_parent, Some(id_of(&sink, "D")));
    assert_ne!(e_parent, Some(id_of(&sink, "B")));
    assert_ne!(e_parent, Some(id_of(&sink, "C")));
}

#[test]
fn dedent_to_middle_level_drops_deeper_entries() {
    let mut sink = MemorySink::new();
    import_outline(
        "A\n-B\n--C\n-D\n---E\n",
        &mut sink,
        &ImportOptions::default(),
        None,
    );
    // E is at depth 3, but depth 2 was discarded when D (depth 1) was created
    assert_eq!(parent_of(&sink, "D"), Some(id_of(&sink, "A")));
    assert_eq!(parent_of(&sink, "E"), None);
}

#[test]
fn dash_only_line_is_skipped_without_corrupting_stack() {
    let mut sink = MemorySink::new();
    let report = import_outline(
        "Root\n-Child\n--   \n--Grandchild\n",
        &mut sink,
        &ImportOptions::default(),
        None,
    );

    assert_eq!(report.created, 3);
    assert_eq!(report.skipped_indices(), vec![3]);
    assert_eq!(report.skipped[0].reason, SkipReason::EmptyTitle);
    assert_eq!(parent_of(&sink, "Grandchild"), Some(id_of(&sink, "Child")));
}

#[test]
fn blank_lines_ignored_and_not_reported() {
    let mut sink = MemorySink::new();
    let report = import_outline("\nHome\n\n   \n-About\n", &mut sink, &ImportOptions::default(), None);
    assert_eq!(report.created, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(parent_of(&sink, "About"), Some(id_of(&sink, "Home")));
}

#[test]
fn empty_outline_creates_nothing() {
    let mut sink = MemorySink::new();
    let report = import_outline("", &mut sink, &ImportOptions::default(), None);
    assert_eq!(report.created, 0);
    assert!(sink.is_empty());
}

#[test]
fn fields_reach_the_sink() {
    let mut sink = MemorySink::new();
    let report = import_outline(
        "Gallery ::status=draft ::template=wide :* https://example.com/g.jpg :+ Our work",
        &mut sink,
        &ImportOptions::default(),
        None,
    );
    assert_eq!(report.created, 1);
    assert_eq!(report.images_attached, 1);

    let page = &sink.pages()[0];
    assert_eq!(page.intent.status, "draft");
    assert_eq!(page.intent.template, "wide");
    assert_eq!(page.intent.excerpt, "Our work");
    assert_eq!(page.featured_image.as_deref(), Some("https://example.com/g.jpg"));
}

/// Sink that fails to create pages with a given title and rejects every image.
struct FlakySink {
    inner: MemorySink,
    reject_title: &'static str,
}

impl PageSink for FlakySink {
    fn create_page(&mut self, intent: &PageIntent) -> Result<PageId, SinkError> {
        if intent.title == self.reject_title {
            return Err(SinkError::persist("rejected"));
        }
        self.inner.create_page(intent)
    }

    fn attach_featured_image(
        &mut self,
        _page_id: PageId,
        _image: &FeaturedImage<'_>,
    ) -> Result<(), SinkError> {
        Err(SinkError::fetch("HTTP 404"))
    }
}

#[test]
fn persist_failure_is_isolated() {
    let mut sink = FlakySink {
        inner: MemorySink::new(),
        reject_title: "B",
    };
    let report = import_outline("A\nB\n-C\nD\n", &mut sink, &ImportOptions::default(), None);

    assert_eq!(report.created, 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 2);
    assert!(matches!(report.skipped[0].reason, SkipReason::PersistFailure(_)));
    // B was never recorded, so C attaches to the last created page at depth 0
    assert_eq!(
        sink.inner.find_by_title("C").unwrap().intent.parent,
        Some(sink.inner.find_by_title("A").unwrap().id)
    );
}

#[test]
fn image_failure_keeps_page() {
    let mut sink = FlakySink {
        inner: MemorySink::new(),
        reject_title: "",
    };
    let report = import_outline(
        "Home :* https://example.com/missing.png",
        &mut sink,
        &ImportOptions::default(),
        None,
    );
    assert_eq!(report.created, 1);
    assert_eq!(report.images_attached, 0);
    assert_eq!(report.image_failures.len(), 1);
    assert!(matches!(
        report.image_failures[0].reason,
        SkipReason::ImageAttachFailure(_)
    ));
}

#[test]
fn progress_reports_each_page() {
    use std::cell::RefCell;

    struct Recorder(RefCell<Vec<String>>);
    impl ImportProgress for Recorder {
        fn on_record(&self, current: usize, total: usize, title: &str) {
            self.0.borrow_mut().push(format!("{current}/{total} {title}"));
        }
        fn on_phase(&self, _message: &str) {}
        fn on_complete(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    let recorder = Recorder(RefCell::new(Vec::new()));
    let mut sink = MemorySink::new();
    import_outline("A\n\n-B", &mut sink, &ImportOptions::default(), Some(&recorder));

    let events = recorder.0.into_inner();
    assert_eq!(events[0], "1/3 A");
    assert_eq!(events[1], "2/3 ");
    assert_eq!(events[2], "3/3 B");
    assert_eq!(events[3], "2 page(s) created, 0 skipped");
}

#[test]
fn log_progress_does_not_change_outcome() {
    let text = "Home\n-About\n--Team\n";
    let mut quiet_sink = MemorySink::new();
    let mut logged_sink = MemorySink::new();

    let quiet = import_outline(text, &mut quiet_sink, &ImportOptions::default(), Some(&SilentProgress));
    let logged = import_outline(text, &mut logged_sink, &ImportOptions::default(), Some(&LogProgress));

    assert_eq!(quiet, logged);
    assert_eq!(quiet_sink.pages(), logged_sink.pages());
}
