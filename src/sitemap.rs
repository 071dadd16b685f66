//! Support for creating a `sitemap.xml` from the site's static pages and a
//! list of posts.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.org/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::config::Config;
use crate::post::Post;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fmt;
use std::io::Write;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const POST_CHANGEFREQ: &str = "monthly";
const POST_PRIORITY: &str = "0.7";

/// A single `<url>` element.
#[derive(Debug, PartialEq)]
struct UrlEntry<'a> {
    loc: String,
    lastmod: &'a str,
    changefreq: &'a str,
    priority: &'a str,
}

/// Lists the static pages in declaration order followed by the posts in the
/// order given.
fn entries<'a>(config: &'a Config, posts: &'a [Post]) -> Vec<UrlEntry<'a>> {
    let static_pages = config.static_pages.iter().map(|page| UrlEntry {
        loc: config.absolute_url(&page.path),
        lastmod: &page.lastmod,
        changefreq: &page.changefreq,
        priority: &page.priority,
    });
    let posts = posts.iter().map(|post| UrlEntry {
        loc: config.absolute_url(&post.url),
        lastmod: post.lastmod(),
        changefreq: POST_CHANGEFREQ,
        priority: POST_PRIORITY,
    });
    static_pages.chain(posts).collect()
}

/// Writes the sitemap for `config`'s static pages and `posts` to `w`.
pub fn write_sitemap<W: Write>(config: &Config, posts: &[Post], w: W) -> Result<()> {
    let mut writer = quick_xml::Writer::new_with_indent(w, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;
    for entry in entries(config, posts) {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        write_text_element(&mut writer, "lastmod", entry.lastmod)?;
        write_text_element(&mut writer, "changefreq", entry.changefreq)?;
        write_text_element(&mut writer, "priority", entry.priority)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut w = writer.into_inner();
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut quick_xml::Writer<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem writing a sitemap.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when the XML writer fails.
    Xml(quick_xml::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Xml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Xml(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible sitemap operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<quick_xml::Error> for Error {
    /// Converts [`quick_xml::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator with the XML writer.
    fn from(err: quick_xml::Error) -> Error {
        Error::Xml(err)
    }
}
