//! Defines the [`Config`] type which carries every path, file name, and piece
//! of site identity that the build steps need. Nothing is read from the
//! environment; the values are compiled in and [`Config::for_site`] assembles
//! them around the site's base URL.

use std::path::PathBuf;
use url::Url;

/// The public URL of the site.
pub const SITE_URL: &str = "https://comparellms.in";

/// The site's name, used as the RSS channel title.
pub const SITE_NAME: &str = "comparellms";

/// The site's description, used as the RSS channel description.
pub const SITE_DESCRIPTION: &str = "Daily LLM comparisons and AI model benchmarks";

/// Last-modified date for the static sitemap pages.
pub const STATIC_PAGES_LASTMOD: &str = "2025-01-01";

/// A page which isn't a post but should still be listed in the sitemap.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticPage {
    /// Path relative to the site root, e.g. `/about.html`.
    pub path: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: String,
}

impl StaticPage {
    fn new(path: &str, lastmod: &str, changefreq: &str, priority: &str) -> StaticPage {
        StaticPage {
            path: path.to_owned(),
            lastmod: lastmod.to_owned(),
            changefreq: changefreq.to_owned(),
            priority: priority.to_owned(),
        }
    }
}

/// Everything the build needs to know. Each step borrows the fields it cares
/// about, so tests can point the directories at temporary locations.
#[derive(Clone, Debug)]
pub struct Config {
    /// The directory whose immediate subdirectories are posts.
    pub posts_directory: PathBuf,

    /// The markup file inside each post directory which holds the post's
    /// `<meta>` declarations.
    pub post_file_name: String,

    /// The directory into which every artifact is written.
    pub output_directory: PathBuf,

    /// File name prefix of the paginated index artifacts. Page `N` is written
    /// to `{index_page_prefix}{N}.json`.
    pub index_page_prefix: String,

    /// File name of the pagination pointer artifact.
    pub index_file_name: String,

    pub sitemap_file_name: String,
    pub rss_file_name: String,

    /// The number of posts per index page.
    pub index_page_size: usize,

    /// The maximum number of items in the RSS feed.
    pub feed_item_limit: usize,

    pub site_url: Url,
    pub site_name: String,
    pub site_description: String,
    pub site_language: String,

    /// Pages listed ahead of the posts in the sitemap, in order.
    pub static_pages: Vec<StaticPage>,
}

impl Config {
    /// Builds the compiled-in configuration for the site at `site_url`.
    pub fn for_site(site_url: Url) -> Config {
        Config {
            posts_directory: PathBuf::from("posts"),
            post_file_name: String::from("index.html"),
            output_directory: PathBuf::from("."),
            index_page_prefix: String::from("posts-index-page-"),
            index_file_name: String::from("posts-index.json"),
            sitemap_file_name: String::from("sitemap.xml"),
            rss_file_name: String::from("rss.xml"),
            index_page_size: 20,
            feed_item_limit: 50,
            site_url,
            site_name: SITE_NAME.to_owned(),
            site_description: SITE_DESCRIPTION.to_owned(),
            site_language: String::from("en-us"),
            static_pages: vec![
                StaticPage::new("/", STATIC_PAGES_LASTMOD, "daily", "1.0"),
                StaticPage::new("/blog/", STATIC_PAGES_LASTMOD, "daily", "0.9"),
                StaticPage::new("/about.html", STATIC_PAGES_LASTMOD, "monthly", "0.5"),
                StaticPage::new("/contact.html", STATIC_PAGES_LASTMOD, "monthly", "0.5"),
                StaticPage::new(
                    "/ai-content-policy.html",
                    STATIC_PAGES_LASTMOD,
                    "monthly",
                    "0.5",
                ),
            ],
        }
    }

    /// The site URL without a trailing slash. Site-relative paths like
    /// `/posts/foo/` are appended to this to make absolute URLs.
    pub fn base_url(&self) -> &str {
        self.site_url.as_str().trim_end_matches('/')
    }

    /// Makes an absolute URL from a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}
