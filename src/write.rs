use crate::post::Post;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Responsible for paginating [`Post`]s into JSON index pages and writing them
/// to disk alongside a pointer file which describes the pagination.
pub struct Writer<'a> {
    /// The directory in which the index files will be written.
    pub output_directory: &'a Path,

    /// Page `N` is written to `{output_directory}/{page_prefix}{N}.json`.
    pub page_prefix: &'a str,

    /// The pointer file is written to `{output_directory}/{index_file_name}`.
    pub index_file_name: &'a str,

    /// The number of posts per index page.
    pub page_size: usize,
}

/// The pagination shape shared by every index page and the pointer file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pagination {
    /// The 1-based page number.
    pub page: usize,
    pub per_page: usize,
    pub total_posts: usize,
    pub total_pages: usize,
}

/// One page of the index: the pagination fields followed by the page's posts.
#[derive(Debug, Serialize)]
struct IndexPage<'a> {
    #[serde(flatten)]
    pagination: Pagination,
    posts: &'a [Post],
}

/// Returns the number of index pages for `total_posts`. There is always at
/// least one page, even if it's empty.
pub fn total_pages(total_posts: usize, page_size: usize) -> usize {
    std::cmp::max(1, total_posts.div_ceil(page_size))
}

impl Writer<'_> {
    fn page_path(&self, page: usize) -> PathBuf {
        self.output_directory
            .join(format!("{}{}.json", self.page_prefix, page))
    }

    /// Deletes index pages left over from previous runs so a shrinking post
    /// count doesn't leave stale pages behind. Failures are logged rather than
    /// returned. Returns the number of files removed.
    pub fn clean(&self) -> usize {
        let mut removed = 0;
        for result in WalkDir::new(self.output_directory)
            .min_depth(1)
            .max_depth(1)
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Could not list {}: {}", self.output_directory.display(), e);
                    continue;
                }
            };
            let file_name = entry.file_name().to_string_lossy();
            if !entry.file_type().is_file()
                || !file_name.starts_with(self.page_prefix)
                || !file_name.ends_with(".json")
            {
                continue;
            }
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Could not remove {}: {}", entry.path().display(), e),
            }
        }
        removed
    }

    /// Writes one index page per `page_size` posts (at least one page) plus
    /// the pointer file. `posts` should already be sorted. Returns the number
    /// of pages written.
    pub fn write_indexes(&self, posts: &[Post]) -> Result<usize> {
        if self.page_size == 0 {
            return Err(Error::ZeroPageSize);
        }

        let pagination = Pagination {
            page: 1,
            per_page: self.page_size,
            total_posts: posts.len(),
            total_pages: total_pages(posts.len(), self.page_size),
        };

        for page in 1..=pagination.total_pages {
            let start = (page - 1) * self.page_size;
            let end = std::cmp::min(start + self.page_size, posts.len());
            let path = self.page_path(page);
            write_json(
                &path,
                &IndexPage {
                    pagination: Pagination { page, ..pagination },
                    posts: &posts[start..end],
                },
            )?;
            info!("Wrote {}", path.display());
        }

        let path = self.output_directory.join(self.index_file_name);
        write_json(&path, &pagination)?;
        info!("Wrote {}", path.display());

        Ok(pagination.total_pages)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|err| Error::Create {
        path: path.to_owned(),
        err,
    })?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush()?;
    Ok(())
}

/// The result of a fallible index-writing operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error in an index-writing operation.
#[derive(Debug)]
pub enum Error {
    /// Returned when the configured page size is zero.
    ZeroPageSize,

    /// Returned when an index file can't be created.
    Create { path: PathBuf, err: io::Error },

    /// An error serializing an index file.
    Json(serde_json::Error),

    /// An error writing an index file.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts a [`serde_json::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator while serializing.
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ZeroPageSize => write!(f, "Index page size must be at least 1"),
            Error::Create { path, err } => {
                write!(f, "Creating index file '{}': {}", path.display(), err)
            }
            Error::Json(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ZeroPageSize => None,
            Error::Create { path: _, err } => Some(err),
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}
