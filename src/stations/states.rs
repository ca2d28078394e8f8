//! Extraction of US state abbreviations from the reference chart page.

use crate::stations::directory::download;
use crate::stations::error::StationDirectoryError;
use log::{debug, info};
use reqwest::Client;
use scraper::{Html, Selector};

/// Downloads the state chart page and returns the abbreviations it lists.
pub(crate) async fn fetch_state_codes(
    client: &Client,
    url: &str,
) -> Result<Vec<String>, StationDirectoryError> {
    let bytes = download(client.get(url), url).await?;
    let html = String::from_utf8_lossy(&bytes);
    let codes = parse_state_codes(&html);
    if codes.is_empty() {
        return Err(StationDirectoryError::NoStateCodes(url.to_string()));
    }
    info!("Found {} state abbreviations on {}", codes.len(), url);
    Ok(codes)
}

/// Collects every cell of the first table on the page whose text is exactly two
/// uppercase ASCII letters. Duplicates are dropped, document order is kept.
pub(crate) fn parse_state_codes(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let (Ok(table_selector), Ok(cell_selector)) =
        (Selector::parse("table"), Selector::parse("td, th"))
    else {
        return Vec::new();
    };
    let Some(table) = document.select(&table_selector).next() else {
        debug!("No table element in state chart page");
        return Vec::new();
    };

    let mut codes: Vec<String> = Vec::new();
    for cell in table.select(&cell_selector) {
        let text = cell.text().collect::<String>();
        let text = text.trim();
        let is_code = text.len() == 2 && text.chars().all(|c| c.is_ascii_uppercase());
        if is_code && !codes.iter().any(|code| code == text) {
            codes.push(text.to_string());
        }
    }
    codes
}
