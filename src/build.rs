//! Exports the [`build_site`] function which stitches together the high-level
//! steps of a build: collecting the posts ([`crate::post`]), removing stale
//! index pages and writing the new ones ([`crate::write`]), and generating the
//! sitemap ([`crate::sitemap`]) and the RSS feed ([`crate::feed`]).

use crate::config::Config;
use crate::feed::{write_feed, Error as FeedError, FeedConfig};
use crate::post::collect_posts;
use crate::sitemap::{write_sitemap, Error as SitemapError};
use crate::write::{Error as WriteError, Writer};
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a successful build produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub total_posts: usize,
    pub total_pages: usize,
}

/// Builds every artifact from a [`Config`] object. `now` becomes the feed's
/// build date. This calls into [`collect_posts`], [`Writer::write_indexes`],
/// [`write_sitemap`], and [`write_feed`] which do the heavy-lifting.
///
/// Posts that can't be read are skipped, but any failure to write an artifact
/// aborts the build. Artifacts written before the failure are left in place.
pub fn build_site(config: &Config, now: DateTime<Utc>) -> Result<Summary> {
    let posts = collect_posts(config);
    if posts.is_empty() {
        warn!("No posts found. Creating empty indexes.");
    }

    let writer = Writer {
        output_directory: &config.output_directory,
        page_prefix: &config.index_page_prefix,
        index_file_name: &config.index_file_name,
        page_size: config.index_page_size,
    };
    let removed = writer.clean();
    if removed > 0 {
        info!("Removed {} old index pages", removed);
    }
    let total_pages = writer.write_indexes(&posts)?;

    let sitemap_path = config.output_directory.join(&config.sitemap_file_name);
    write_sitemap(config, &posts, create(&sitemap_path)?)?;
    info!("Wrote {}", sitemap_path.display());

    let rss_path = config.output_directory.join(&config.rss_file_name);
    write_feed(&feed_config(config, now), &posts, create(&rss_path)?)?;
    info!("Wrote {}", rss_path.display());

    Ok(Summary {
        total_posts: posts.len(),
        total_pages,
    })
}

fn feed_config(config: &Config, now: DateTime<Utc>) -> FeedConfig {
    FeedConfig {
        title: config.site_name.clone(),
        link: config.base_url().to_owned(),
        description: config.site_description.clone(),
        language: config.site_language.clone(),
        self_link: config.absolute_url(&format!("/{}", config.rss_file_name)),
        base_url: config.base_url().to_owned(),
        item_limit: config.feed_item_limit,
        build_date: now,
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    match File::create(path) {
        Ok(file) => Ok(BufWriter::new(file)),
        Err(err) => Err(Error::Create {
            path: path.to_owned(),
            err,
        }),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during index writing,
/// sitemap or feed generation, or while creating an output file.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors writing the JSON index files.
    Write(WriteError),

    /// Returned for errors writing the sitemap.
    Sitemap(SitemapError),

    /// Returned for errors writing the feed.
    Feed(FeedError),

    /// Returned for I/O problems while creating an output file.
    Create { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Write(err) => err.fmt(f),
            Error::Sitemap(err) => write!(f, "Writing sitemap: {}", err),
            Error::Feed(err) => write!(f, "Writing feed: {}", err),
            Error::Create { path, err } => {
                write!(f, "Creating output file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Write(err) => Some(err),
            Error::Sitemap(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::Create { path: _, err } => Some(err),
        }
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<SitemapError> for Error {
    /// Converts [`SitemapError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: SitemapError) -> Error {
        Error::Sitemap(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_feed_config_from_site() -> std::result::Result<(), url::ParseError> {
        let config = Config::for_site(Url::parse("https://example.org/")?);
        let now = Utc::now();
        let feed = feed_config(&config, now);
        assert_eq!("https://example.org", feed.link);
        assert_eq!("https://example.org/rss.xml", feed.self_link);
        assert_eq!("https://example.org", feed.base_url);
        assert_eq!(50, feed.item_limit);
        assert_eq!(now, feed.build_date);
        Ok(())
    }

    #[test]
    fn test_missing_output_directory_is_fatal() -> std::result::Result<(), url::ParseError> {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::for_site(Url::parse("https://example.org/")?);
        config.posts_directory = dir.path().join("posts");
        config.output_directory = dir.path().join("does-not-exist");
        match build_site(&config, Utc::now()) {
            Err(Error::Write(WriteError::Create { path, .. })) => {
                assert_eq!(config.output_directory.join("posts-index-page-1.json"), path)
            }
            other => panic!("expected a create error, got {:?}", other),
        }
        Ok(())
    }
}
