use pageloom_core::{Settings, slugify};

/// Print the slug for `title`. Written to stdout directly so it can be piped.
pub(crate) fn run_slug(settings: &Settings, title: &str, max_length: Option<usize>) {
    let max_length = max_length.unwrap_or(settings.import.slug_max_length);
    let slug = slugify(title, max_length);
    if slug.is_empty() {
        log::warn!("'{}' has no characters usable in a slug", title);
    }
    println!("{}", slug);
}
