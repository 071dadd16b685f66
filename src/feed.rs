//! Support for creating RSS 2.0 feeds from a list of posts.

use crate::post::{Post, DATE_FORMAT};
use chrono::{DateTime, NaiveDate, Utc};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Category, CategoryBuilder, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use std::fmt;
use std::io::Write;

/// The RFC 822 form used for `pubDate` and `lastBuildDate`.
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Bundled configuration for creating a feed.
pub struct FeedConfig {
    pub title: String,

    /// The site's home page.
    pub link: String,
    pub description: String,
    pub language: String,

    /// The absolute URL of the feed itself, advertised as the channel's
    /// `atom:link rel="self"`.
    pub self_link: String,

    /// Prepended to each post's site-relative URL to make item links.
    pub base_url: String,

    /// Only the first `item_limit` posts become items.
    pub item_limit: usize,

    /// The channel's `lastBuildDate`.
    pub build_date: DateTime<Utc>,
}

/// Creates a feed from some configuration ([`FeedConfig`]) and a list of
/// [`Post`]s and writes the result to a [`std::io::Write`]. `posts` are taken
/// to be sorted newest first.
pub fn write_feed<W: Write>(config: &FeedConfig, posts: &[Post], w: W) -> Result<()> {
    let mut w = feed(config, posts).pretty_write_to(w, b' ', 2)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

fn feed(config: &FeedConfig, posts: &[Post]) -> rss::Channel {
    let mut self_link = Link::default();
    self_link.set_href(config.self_link.clone());
    self_link.set_rel("self");
    self_link.set_mime_type(Some("application/rss+xml".to_owned()));

    let mut atom = AtomExtension::default();
    atom.set_links(vec![self_link]);

    ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.link.clone())
        .description(config.description.clone())
        .language(Some(config.language.clone()))
        .last_build_date(Some(config.build_date.format(RFC822_FORMAT).to_string()))
        .atom_ext(Some(atom))
        .items(feed_items(config, posts))
        .build()
}

fn feed_items(config: &FeedConfig, posts: &[Post]) -> Vec<Item> {
    posts
        .iter()
        .take(config.item_limit)
        .map(|post| {
            let link = format!("{}{}", config.base_url, post.url);
            ItemBuilder::default()
                .title(Some(post.title.clone()))
                .link(Some(link.clone()))
                .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
                .pub_date(Some(rfc822_date(&post.date)))
                .description(Some(post.summary.clone()))
                .categories(
                    post.tags
                        .iter()
                        .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
                        .collect::<Vec<Category>>(),
                )
                .build()
        })
        .collect()
}

/// Converts a `YYYY-MM-DD` date to RFC 822 at midnight GMT. Anything that
/// doesn't parse is passed through unchanged.
pub fn rfc822_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) => match parsed.and_hms_opt(0, 0, 0) {
            Some(midnight) => midnight.format(RFC822_FORMAT).to_string(),
            None => date.to_owned(),
        },
        Err(_) => date.to_owned(),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when there is an RSS-related error.
    Rss(rss::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Rss(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Rss(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible feed operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<rss::Error> for Error {
    /// Converts [`rss::Error`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: rss::Error) -> Error {
        Error::Rss(err)
    }
}
