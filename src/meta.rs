//! Extracts `<meta name="..." content="...">` declarations from a post's
//! markup. This is plain pattern matching over the raw text rather than HTML
//! parsing; anything that doesn't look like a declaration is ignored.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::error;

/// Maps lowercased meta names to their (trimmed) content.
pub type Meta = HashMap<String, String>;

static META_NAME_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+name=["']([^"']+)["']\s+content=["']([^"']*)["']"#).unwrap()
});

static META_CONTENT_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+content=["']([^"']*)["']\s+name=["']([^"']+)["']"#).unwrap()
});

/// Reads the file at `path` and extracts its meta declarations. Read failures
/// (missing file, bad permissions, invalid UTF-8) are logged and yield an
/// empty map.
pub fn read_meta(path: &Path) -> Meta {
    match std::fs::read_to_string(path) {
        Ok(html) => parse_meta(&html),
        Err(e) => {
            error!("Could not read {}: {}", path.display(), e);
            Meta::new()
        }
    }
}

/// Extracts meta declarations from `html`. The `name` then `content` ordering
/// is authoritative; declarations written `content` first only contribute
/// names that aren't already present.
pub fn parse_meta(html: &str) -> Meta {
    let mut meta = Meta::new();

    for caps in META_NAME_FIRST.captures_iter(html) {
        meta.insert(caps[1].trim().to_lowercase(), caps[2].trim().to_owned());
    }

    for caps in META_CONTENT_FIRST.captures_iter(html) {
        meta.entry(caps[2].trim().to_lowercase())
            .or_insert_with(|| caps[1].trim().to_owned());
    }

    meta
}
