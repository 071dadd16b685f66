//! Defines the [`Post`] and [`Error`] types and the logic for collecting posts
//! from the file system into memory.
//!
//! Every immediate subdirectory of the posts directory is a post. Its markup
//! file carries the post's metadata as `<meta>` declarations (see
//! [`crate::meta`]). The recognized names are:
//!
//! | name           | field               | fallback                   |
//! |----------------|---------------------|----------------------------|
//! | `post-slug`    | [`Post::slug`]      | the directory name         |
//! | `post-title`   | [`Post::title`]     | `title`, then the slug     |
//! | `post-date`    | [`Post::date`]      | none; the post is skipped  |
//! | `post-updated` | [`Post::updated`]   | empty                      |
//! | `post-summary` | [`Post::summary`]   | `description`, then empty  |
//! | `post-thumb`   | [`Post::thumb`]     | empty                      |
//! | `post-tags`    | [`Post::tags`]      | no tags                    |

use crate::config::Config;
use crate::meta::{read_meta, Meta};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// The format of [`Post::date`] and [`Post::updated`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Represents a blog post. Field order is the key order of the post objects in
/// the JSON index pages.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Post {
    /// The post's identifier, which is also the last segment of its URL.
    pub slug: String,

    /// The site-relative URL of the post: `/posts/{slug}/`.
    pub url: String,

    pub title: String,

    /// The publication date as `YYYY-MM-DD`. Always valid.
    pub date: String,

    /// The date of the last meaningful update, or empty.
    pub updated: String,

    pub summary: String,

    /// A thumbnail reference, or empty.
    pub thumb: String,

    /// Tags in the order they were written.
    pub tags: Vec<String>,
}

impl Post {
    /// Builds a post from its directory name and extracted metadata, applying
    /// the fallbacks described in the module docs. Fails if the date is
    /// missing or isn't a `YYYY-MM-DD` calendar date.
    pub fn from_meta(dir_name: &str, meta: &Meta) -> Result<Post> {
        let get = |name: &str| meta.get(name).map(String::as_str).filter(|v| !v.is_empty());

        let slug = get("post-slug").unwrap_or(dir_name).to_owned();
        let date = match get("post-date") {
            None => return Err(Error::MissingDate { slug }),
            Some(date) => date.to_owned(),
        };
        if !is_valid_date(&date) {
            return Err(Error::InvalidDate { slug, date });
        }

        Ok(Post {
            url: format!("/posts/{}/", slug),
            title: get("post-title")
                .or_else(|| get("title"))
                .unwrap_or(&slug)
                .to_owned(),
            date,
            updated: get("post-updated").unwrap_or_default().to_owned(),
            summary: get("post-summary")
                .or_else(|| get("description"))
                .unwrap_or_default()
                .to_owned(),
            thumb: get("post-thumb").unwrap_or_default().to_owned(),
            tags: parse_tags(get("post-tags").unwrap_or_default()),
            slug,
        })
    }

    /// The date that best describes when the post last changed: `updated` if
    /// set, otherwise `date`.
    pub fn lastmod(&self) -> &str {
        if self.updated.is_empty() {
            &self.date
        } else {
            &self.updated
        }
    }
}

/// Splits a comma-separated tag list, dropping blank entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reports whether `date` is a calendar date written exactly as `YYYY-MM-DD`.
pub fn is_valid_date(date: &str) -> bool {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) => parsed.format(DATE_FORMAT).to_string() == date,
        Err(_) => false,
    }
}

/// Scans `config.posts_directory` and returns its valid posts, most recent
/// first. Posts with equal dates keep directory-name order. Nothing here is
/// fatal: a missing posts directory yields no posts, and post directories
/// without a markup file or a valid date are logged and skipped.
pub fn collect_posts(config: &Config) -> Vec<Post> {
    let root = &config.posts_directory;
    let mut posts: Vec<Post> = Vec::new();

    if !root.is_dir() {
        warn!("Posts directory '{}' not found", root.display());
        return posts;
    }

    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for result in entries {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Could not read entry in {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(post) = collect_post(entry.path(), &config.post_file_name) {
            posts.push(post);
        }
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date));

    info!("Found {} valid posts", posts.len());
    posts
}

fn collect_post(dir: &Path, post_file_name: &str) -> Option<Post> {
    let markup = dir.join(post_file_name);
    if !markup.is_file() {
        warn!("No {} found in {}", post_file_name, dir.display());
        return None;
    }

    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match Post::from_meta(&dir_name, &read_meta(&markup)) {
        Ok(post) => Some(post),
        Err(e) => {
            warn!("{} - skipping", e);
            None
        }
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Explains why a post directory couldn't become a [`Post`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when the post has no `post-date`.
    MissingDate { slug: String },

    /// Returned when the post's `post-date` isn't a `YYYY-MM-DD` date.
    InvalidDate { slug: String, date: String },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingDate { slug } => write!(f, "Post '{}' missing post-date", slug),
            Error::InvalidDate { slug, date } => {
                write!(
                    f,
                    "Post '{}' has invalid date format '{}' (expected YYYY-MM-DD, zero-padded)",
                    slug, date
                )
            }
        }
    }
}

impl std::error::Error for Error {}
