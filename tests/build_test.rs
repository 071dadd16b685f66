use blogindex::build::{build_site, Summary};
use blogindex::config::Config;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use url::Url;

fn config(root: &Path) -> Config {
    let mut config = Config::for_site(Url::parse("https://example.org").unwrap());
    config.posts_directory = root.join("posts");
    config.output_directory = root.join("out");
    fs::create_dir_all(&config.output_directory).unwrap();
    config
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

fn write_post(root: &Path, dir: &str, metas: &[(&str, &str)]) {
    let dir = root.join("posts").join(dir);
    fs::create_dir_all(&dir).unwrap();
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    for (name, content) in metas {
        html.push_str(&format!("  <meta name=\"{}\" content=\"{}\">\n", name, content));
    }
    html.push_str("</head>\n<body></body>\n</html>\n");
    fs::write(dir.join("index.html"), html).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_build_empty_site() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config(dir.path());

    let summary = build_site(&config, now())?;
    assert_eq!(
        Summary {
            total_posts: 0,
            total_pages: 1
        },
        summary
    );

    let out = &config.output_directory;
    let page = read_json(&out.join("posts-index-page-1.json"));
    assert_eq!(0, page["posts"].as_array().unwrap().len());
    let pointer = read_json(&out.join("posts-index.json"));
    assert_eq!(1, pointer["page"]);
    assert_eq!(1, pointer["total_pages"]);
    assert!(pointer.get("posts").is_none());

    let sitemap = fs::read_to_string(out.join("sitemap.xml"))?;
    assert_eq!(5, sitemap.matches("<url>").count());
    let rss = fs::read_to_string(out.join("rss.xml"))?;
    assert_eq!(0, rss.matches("<item>").count());
    Ok(())
}

#[test]
fn test_build_single_post() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config(dir.path());
    write_post(
        dir.path(),
        "foo",
        &[
            ("post-title", "Foo"),
            ("post-date", "2025-06-01"),
            ("post-tags", "a, b"),
        ],
    );

    build_site(&config, now())?;

    let rss = fs::read_to_string(config.output_directory.join("rss.xml"))?;
    assert_eq!(1, rss.matches("<item>").count());
    assert_eq!(2, rss.matches("<category>").count());
    let a = rss.find("<category>a</category>").unwrap();
    let b = rss.find("<category>b</category>").unwrap();
    assert!(a < b);
    assert!(rss.contains("<title>Foo</title>"));
    assert!(rss.contains("<link>https://example.org/posts/foo/</link>"));
    assert!(rss.contains("<pubDate>Sun, 01 Jun 2025 00:00:00 GMT</pubDate>"));
    assert!(rss.contains("<lastBuildDate>Mon, 02 Jun 2025 12:00:00 GMT</lastBuildDate>"));

    let page = read_json(&config.output_directory.join("posts-index-page-1.json"));
    let post = &page["posts"][0];
    assert_eq!("foo", post["slug"]);
    assert_eq!("/posts/foo/", post["url"]);
    assert_eq!("Foo", post["title"]);
    let tags: Vec<&str> = post["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    assert_eq!(vec!["a", "b"], tags);
    Ok(())
}

#[test]
fn test_build_skips_invalid_posts() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config(dir.path());
    write_post(dir.path(), "good", &[("post-date", "2025-01-01")]);
    write_post(dir.path(), "undated", &[("post-title", "Undated")]);
    write_post(dir.path(), "misdated", &[("post-date", "January 1st")]);
    fs::create_dir_all(dir.path().join("posts").join("empty"))?;

    let summary = build_site(&config, now())?;
    assert_eq!(1, summary.total_posts);

    let sitemap = fs::read_to_string(config.output_directory.join("sitemap.xml"))?;
    assert_eq!(6, sitemap.matches("<url>").count());
    assert!(!sitemap.contains("undated"));
    assert!(!sitemap.contains("misdated"));
    Ok(())
}

#[test]
fn test_build_paginates_sorted_posts() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config(dir.path());
    for i in 0..55 {
        let date = format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1);
        write_post(dir.path(), &format!("post-{:02}", i), &[("post-date", date.as_str())]);
    }

    let summary = build_site(&config, now())?;
    assert_eq!(55, summary.total_posts);
    assert_eq!(3, summary.total_pages);

    let mut dates = Vec::new();
    for n in 1..=3 {
        let page = read_json(
            &config
                .output_directory
                .join(format!("posts-index-page-{}.json", n)),
        );
        assert_eq!(n, page["page"]);
        assert_eq!(3, page["total_pages"]);
        for post in page["posts"].as_array().unwrap() {
            dates.push(post["date"].as_str().unwrap().to_owned());
        }
    }
    assert_eq!(55, dates.len());
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));

    let pointer = read_json(&config.output_directory.join("posts-index.json"));
    assert_eq!(1, pointer["page"]);
    assert_eq!(55, pointer["total_posts"]);

    let sitemap = fs::read_to_string(config.output_directory.join("sitemap.xml"))?;
    assert_eq!(60, sitemap.matches("<url>").count());
    let rss = fs::read_to_string(config.output_directory.join("rss.xml"))?;
    assert_eq!(50, rss.matches("<item>").count());
    Ok(())
}

#[test]
fn test_build_removes_stale_pages() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config(dir.path());
    for i in 0..25 {
        write_post(dir.path(), &format!("post-{:02}", i), &[("post-date", "2025-01-01")]);
    }
    let stale = config.output_directory.join("posts-index-page-5.json");
    fs::write(&stale, "{}")?;

    assert_eq!(2, build_site(&config, now())?.total_pages);
    assert!(!stale.exists());
    assert!(config.output_directory.join("posts-index-page-2.json").exists());
    assert!(!config.output_directory.join("posts-index-page-3.json").exists());
    Ok(())
}

#[test]
fn test_build_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = config(dir.path());
    write_post(dir.path(), "b", &[("post-date", "2025-01-01"), ("post-updated", "2025-02-01")]);
    write_post(dir.path(), "a", &[("post-date", "2025-01-01")]);
    write_post(dir.path(), "c", &[("post-date", "2025-03-01"), ("post-summary", "Ünïcode")]);

    let read_all = || -> std::io::Result<Vec<String>> {
        ["posts-index.json", "posts-index-page-1.json", "sitemap.xml", "rss.xml"]
            .iter()
            .map(|f| fs::read_to_string(config.output_directory.join(f)))
            .collect()
    };

    build_site(&config, now())?;
    let first = read_all()?;
    build_site(&config, now())?;
    let second = read_all()?;
    assert_eq!(first, second);
    assert!(first[1].contains("Ünïcode"));
    assert!(first[2].contains("<lastmod>2025-02-01</lastmod>"));
    Ok(())
}
