use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use super::model::Mirror;
use crate::error::SourceError;

const MIRRORS_TABLE_SELECTOR: &str = "div.top-portlet #mirrors_list tbody";
const COUNTRY_HEADING_CLASS: &str = "head";
const MIN_MIRROR_COLUMNS: usize = 4;

/// Fetch the mirror directory page.
/// Any transport error or non-2xx status is fatal: without the page there is nothing to probe.
pub async fn fetch_directory_page(client: &Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| SourceError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| SourceError::Fetch {
        url: url.to_string(),
        source,
    })
}

/// Retrieve the mirrors whose status matches `status_filter` from the directory at `url`.
pub async fn get_up_to_date_mirrors(
    client: &Client,
    url: &str,
    status_filter: &str,
) -> Result<Vec<Mirror>, SourceError> {
    log::info!("Retrieving up-to-date mirrors from {}...", url);
    let page = fetch_directory_page(client, url).await?;
    let mirrors = parse_mirrors(&page, status_filter)?;
    log::info!("Found {} up-to-date mirrors.", mirrors.len());
    Ok(mirrors)
}

/// Parse the mirror table of a Launchpad archive mirror listing.
///
/// The table body holds two kinds of rows: `<tr class="head">` rows announce the
/// country of the rows that follow, and class-less rows describe one mirror each
/// (name, links, bandwidth, status). Rows with any other class are layout only.
pub fn parse_mirrors(html: &str, status_filter: &str) -> Result<Vec<Mirror>, SourceError> {
    let document = Html::parse_document(html);
    let table_selector = selector(MIRRORS_TABLE_SELECTOR)?;
    let th_selector = selector("th")?;
    let link_selector = selector("a[href]")?;

    let table = document.select(&table_selector).next().ok_or_else(|| {
        SourceError::Parse(format!("no element matches {MIRRORS_TABLE_SELECTOR:?}"))
    })?;

    let mut mirrors = Vec::new();
    let mut current_country = String::new();

    for row in child_elements(table, "tr") {
        let mut classes = row.value().classes().peekable();
        if classes.peek().is_some() {
            if classes.any(|class| class == COUNTRY_HEADING_CLASS) {
                current_country = row
                    .select(&th_selector)
                    .next()
                    .map(stripped_text)
                    .unwrap_or_default();
            }
            continue;
        }

        let columns: Vec<ElementRef<'_>> = child_elements(row, "td").collect();
        if columns.len() < MIN_MIRROR_COLUMNS {
            continue;
        }

        let status = stripped_text(columns[3]);
        if !status.contains(status_filter) {
            continue;
        }

        mirrors.push(Mirror {
            country: current_country.clone(),
            name: stripped_text(columns[0]),
            links: columns[1]
                .select(&link_selector)
                .filter_map(|a| a.value().attr("href"))
                .map(str::to_string)
                .collect(),
            bandwidth: stripped_text(columns[2]),
        });
    }

    Ok(mirrors)
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

/// Text content with every text node trimmed, joined without a separator.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="top-portlet">
          <table id="mirrors_list">
            <tbody>
              <tr class="head"><th colspan="4">Netherlands</th></tr>
              <tr>
                <td><a href="/ubuntu/+mirror/nluug">NLUUG</a></td>
                <td>
                  <a href="http://ftp.nluug.nl/os/Linux/distr/ubuntu/">http</a>
                  <a href="rsync://ftp.nluug.nl/ubuntu/">rsync</a>
                </td>
                <td>10 Gbps</td>
                <td><span class="distromirrorstatusUP">Up to date</span></td>
              </tr>
              <tr>
                <td>Stale Mirror</td>
                <td><a href="http://stale.example.nl/ubuntu/">http</a></td>
                <td>100 Mbps</td>
                <td>One week behind</td>
              </tr>
              <tr class="section-break"><td></td><td></td><td></td><td>Up to date</td></tr>
              <tr class="head"><th>  United Kingdom </th></tr>
              <tr>
                <td>Bytemark</td>
                <td><a href="https://mirror.bytemark.co.uk/ubuntu/">https</a></td>
                <td>1 Gbps</td>
                <td>Up to date</td>
              </tr>
              <tr><td>Too few cells</td><td>Up to date</td></tr>
            </tbody>
          </table>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_mirrors() {
        let mirrors = parse_mirrors(PAGE, "Up to date").expect("valid page");
        assert_eq!(mirrors.len(), 2);

        assert_eq!(mirrors[0].country, "Netherlands");
        assert_eq!(mirrors[0].name, "NLUUG");
        assert_eq!(mirrors[0].bandwidth, "10 Gbps");
        assert_eq!(
            mirrors[0].links,
            vec![
                "http://ftp.nluug.nl/os/Linux/distr/ubuntu/".to_string(),
                "rsync://ftp.nluug.nl/ubuntu/".to_string(),
            ]
        );

        assert_eq!(mirrors[1].country, "United Kingdom");
        assert_eq!(mirrors[1].name, "Bytemark");
        assert_eq!(mirrors[1].links, vec!["https://mirror.bytemark.co.uk/ubuntu/".to_string()]);
    }

    #[test]
    fn test_status_filter_is_configurable() {
        let mirrors = parse_mirrors(PAGE, "behind").expect("valid page");
        assert_eq!(mirrors.len(), 1);
        assert_eq!(mirrors[0].name, "Stale Mirror");
    }

    #[test]
    fn test_missing_table_is_a_parse_error() {
        let err = parse_mirrors("<html><body><p>maintenance</p></body></html>", "Up to date")
            .expect_err("no table");
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_empty_table_yields_no_mirrors() {
        let page = r#"<div class="top-portlet"><table id="mirrors_list"><tbody></tbody></table></div>"#;
        let mirrors = parse_mirrors(page, "Up to date").expect("valid page");
        assert!(mirrors.is_empty());
    }
}
