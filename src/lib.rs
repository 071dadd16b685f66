//! The library code for the `blogindex` generator. It turns a directory of
//! blog posts into the artifacts a static blog front end needs:
//!
//! 1. Collecting posts from their markup files on disk ([`crate::meta`],
//!    [`crate::post`])
//! 2. Writing paginated JSON indexes of the posts ([`crate::write`])
//! 3. Writing the sitemap ([`crate::sitemap`]) and the RSS feed
//!    ([`crate::feed`])
//!
//! Each post is a directory holding an `index.html` whose `<meta>` tags carry
//! the post's slug, title, date, and so on. Posts are sorted newest first and
//! every artifact is regenerated from scratch on each run. [`build::build_site`]
//! runs all of the steps against a [`config::Config`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod feed;
pub mod logging;
pub mod meta;
pub mod post;
pub mod sitemap;
pub mod write;
