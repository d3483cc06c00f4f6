// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Module for discovering directory-export CSV URLs
pub mod urls {
    use super::*;
    use once_cell::sync::Lazy;
    use regex::Regex;

    /// Page listing the successive `directoryexport<N>.csv` files.
    pub const DEFAULT_DIRECTORY_URL: &str = "https://directory.mobilelibraries.net/exports/";

    static EXPORT_NUMBER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"directoryexport(\d+)\.csv$").expect("export number pattern"));

    /// Fetch every CSV export linked from the index page.
    pub async fn fetch_export_urls(client: &Client, index_url: &str) -> Result<Vec<Url>> {
        let base =
            Url::parse(index_url).with_context(|| format!("parsing index URL {}", index_url))?;
        let html = client
            .get(base.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", base))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", base))?
            .text()
            .await
            .with_context(|| format!("Reading text from {}", base))?;
        Ok(extract_export_urls(&base, &html))
    }

    /// Pull `.csv` hrefs out of the page and resolve them against it.
    pub fn extract_export_urls(base: &Url, html: &str) -> Vec<Url> {
        let selector = Selector::parse(r#"a[href$=".csv"]"#)
            .expect("CSS selector for CSV links should be valid");
        let doc = Html::parse_document(html);
        doc.select(&selector)
            .filter_map(|e| e.value().attr("href"))
            .filter_map(|href| base.join(href).ok())
            .collect()
    }

    /// Export sequence number from a `directoryexport<N>.csv` URL.
    pub fn export_number(url: &Url) -> Option<u32> {
        let caps = EXPORT_NUMBER.captures(url.path())?;
        caps[1].parse().ok()
    }

    /// Highest-numbered export on the page, i.e. the current one.
    pub fn latest_export_url(urls: &[Url]) -> Option<&Url> {
        urls.iter()
            .filter(|u| export_number(u).is_some())
            .max_by_key(|u| export_number(u))
    }
}

/// Module for downloading a single export to disk
pub mod csvs {
    use super::*;
    use std::path::{Path, PathBuf};
    use tokio::fs;

    /// Download `url` into `dest_dir`, named after the URL's file name.
    /// Returns the path written.
    pub async fn download_csv(
        client: &Client,
        url: &Url,
        dest_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let name = url
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|s| !s.is_empty())
            .with_context(|| format!("export URL {} has no file name", url))?;
        let dest = dest_dir.as_ref().join(name);

        let resp = client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?;
        let bytes = resp.bytes().await?;
        fs::write(&dest, &bytes)
            .await
            .with_context(|| format!("writing {:?}", dest))?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::urls::*;
    use url::Url;

    fn base() -> Url {
        Url::parse("https://directory.mobilelibraries.net/exports/").unwrap()
    }

    #[test]
    fn extracts_and_resolves_csv_links() {
        let html = r#"<html><body>
            <a href="directoryexport15.csv">export 15</a>
            <a href="directoryexport16.csv">export 16</a>
            <a href="notes.pdf">notes</a>
            <a href="/archive/directoryexport9.csv">old</a>
        </body></html>"#;

        let urls = extract_export_urls(&base(), html);
        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|u| u.path().ends_with(".csv")));
        assert_eq!(
            urls[0].as_str(),
            "https://directory.mobilelibraries.net/exports/directoryexport15.csv"
        );
        assert_eq!(
            urls[2].as_str(),
            "https://directory.mobilelibraries.net/archive/directoryexport9.csv"
        );
    }

    #[test]
    fn export_numbers_parse_from_the_path() {
        let url = base().join("directoryexport16.csv").unwrap();
        assert_eq!(export_number(&url), Some(16));

        let other = base().join("somethingelse.csv").unwrap();
        assert_eq!(export_number(&other), None);
    }

    #[test]
    fn newest_export_wins_numerically() {
        let urls: Vec<Url> = ["directoryexport9.csv", "directoryexport16.csv", "somethingelse.csv"]
            .iter()
            .map(|name| base().join(name).unwrap())
            .collect();

        // 16 beats 9 even though "9" sorts after "16" as a string
        let latest = latest_export_url(&urls).expect("a numbered export exists");
        assert_eq!(export_number(latest), Some(16));
    }

    #[test]
    fn pages_without_exports_yield_nothing() {
        let urls = extract_export_urls(&base(), "<html><body><p>empty</p></body></html>");
        assert!(urls.is_empty());
        assert!(latest_export_url(&urls).is_none());
    }
}
