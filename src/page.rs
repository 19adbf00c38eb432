//! Extraction of values from the box's server-rendered pages.
//!
//! The web interface carries no JSON API; everything is scraped out of fixed
//! HTML fragments with the selectors the stock web UI itself renders
//! (`challenge`, `#network_clients`, `#infos`, `#wan_status`,
//! `#modem_uptime`). This is inherently tied to the firmware's exact markup:
//! a firmware update that reshapes these pages breaks extraction. That is a
//! compatibility risk with the device, not something this module can guard
//! against.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref CHALLENGE: Selector = Selector::parse("challenge").unwrap();
    static ref CLIENT_ROWS: Selector =
        Selector::parse("#network_clients > tbody > tr").unwrap();
    static ref CELLS: Selector = Selector::parse("td").unwrap();
    static ref INFO_ROWS: Selector = Selector::parse("#infos tr").unwrap();
    static ref ROW_LABEL: Selector = Selector::parse("th").unwrap();
    static ref ROW_VALUE: Selector = Selector::parse("td").unwrap();
    static ref STATUS_CELLS: Selector =
        Selector::parse("#wan_status, #modem_uptime").unwrap();
}

/// One row of the `#network_clients` table on the network page.
///
/// `cells` holds the row's `td` texts in source order with embedded
/// whitespace and newlines collapsed. The first cell is the device name.
#[derive(Debug, Clone)]
pub struct ConnectedDevice {
    pub cells: Vec<String>,
}

impl ConnectedDevice {
    /// Device name (first cell), or an empty string for a malformed row.
    pub fn name(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }

    /// Single summary line in the column order the stock web UI displays:
    /// name first, then source cells 4, 3, 2, 5.
    pub fn summary(&self) -> String {
        const DISPLAY_ORDER: [usize; 4] = [3, 2, 1, 4];
        let rest: Vec<&str> = DISPLAY_ORDER
            .iter()
            .map(|&i| self.cells.get(i).map(String::as_str).unwrap_or(""))
            .collect();
        format!("{}: {}", self.name(), rest.join(" "))
    }
}

/// One label/value pair from the status page.
#[derive(Debug, Clone)]
pub struct InfoEntry {
    pub label: String,
    pub value: String,
}

/// Extracts the challenge token from a challenge response body.
///
/// Returns `None` when the body carries no `challenge` element or the
/// element is empty.
pub fn extract_challenge(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let element = document.select(&CHALLENGE).next()?;
    let text = collapse_whitespace(&element.text().collect::<String>());
    if text.is_empty() { None } else { Some(text) }
}

/// Parses the `#network_clients` table rows on the network page.
///
/// One entry per `tr`; cell texts are whitespace-collapsed. Rows without any
/// `td` (header rows) are skipped.
pub fn parse_connected_devices(body: &str) -> Vec<ConnectedDevice> {
    let document = Html::parse_document(body);

    document
        .select(&CLIENT_ROWS)
        .filter_map(|row| {
            let cells: Vec<String> = row
                .select(&CELLS)
                .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
                .collect();
            if cells.is_empty() {
                None
            } else {
                Some(ConnectedDevice { cells })
            }
        })
        .collect()
}

/// Parses the status page: every `#infos` row plus the `#wan_status` and
/// `#modem_uptime` cells, labeled by the `th` preceding each.
pub fn parse_info_entries(body: &str) -> Vec<InfoEntry> {
    let document = Html::parse_document(body);
    let mut entries = Vec::new();

    for row in document.select(&INFO_ROWS) {
        let label = match row.select(&ROW_LABEL).next() {
            Some(th) => collapse_whitespace(&th.text().collect::<String>()),
            None => continue,
        };
        let value = row
            .select(&ROW_VALUE)
            .next()
            .map(|td| collapse_whitespace(&td.text().collect::<String>()))
            .unwrap_or_default();
        entries.push(InfoEntry { label, value });
    }

    for cell in document.select(&STATUS_CELLS) {
        let label = preceding_header(cell)
            .map(|th| collapse_whitespace(&th.text().collect::<String>()))
            .unwrap_or_default();
        let value = collapse_whitespace(&cell.text().collect::<String>());
        entries.push(InfoEntry { label, value });
    }

    entries
}

/// Nearest `th` sibling before `element` in its row.
fn preceding_header(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "th")
}

/// Collapses runs of whitespace (including newlines) to single spaces and
/// trims the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_is_extracted_from_response_body() {
        let body = "<challenge>Xb12RZ4s</challenge>";
        assert_eq!(extract_challenge(body).as_deref(), Some("Xb12RZ4s"));
    }

    #[test]
    fn challenge_text_is_trimmed() {
        let body = "<challenge>\n  Xb12RZ4s \n</challenge>";
        assert_eq!(extract_challenge(body).as_deref(), Some("Xb12RZ4s"));
    }

    #[test]
    fn missing_or_empty_challenge_yields_none() {
        assert_eq!(extract_challenge("<html><body>denied</body></html>"), None);
        assert_eq!(extract_challenge("<challenge>  </challenge>"), None);
    }

    const NETWORK_PAGE: &str = r#"
        <html><body>
        <table id="network_clients">
          <thead><tr><th>Name</th><th>MAC</th><th>IP</th><th>Link</th><th>Status</th></tr></thead>
          <tbody>
            <tr>
              <td>
                laptop
              </td>
              <td>aa:bb:cc:dd:ee:ff</td>
              <td>192.168.1.23</td>
              <td> ethernet </td>
              <td>actif</td>
            </tr>
            <tr>
              <td>phone</td><td>11:22:33:44:55:66</td><td>192.168.1.42</td>
              <td>wifi
              2.4GHz</td><td>actif</td>
            </tr>
          </tbody>
        </table>
        </body></html>"#;

    #[test]
    fn one_device_per_table_row() {
        let devices = parse_connected_devices(NETWORK_PAGE);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name(), "laptop");
        assert_eq!(devices[1].name(), "phone");
    }

    #[test]
    fn device_summary_reorders_columns_and_strips_whitespace() {
        let devices = parse_connected_devices(NETWORK_PAGE);
        // name first, then source columns 4, 3, 2, 5
        assert_eq!(
            devices[0].summary(),
            "laptop: ethernet 192.168.1.23 aa:bb:cc:dd:ee:ff actif"
        );
        // embedded newline inside a cell collapses to a single space
        assert_eq!(
            devices[1].summary(),
            "phone: wifi 2.4GHz 192.168.1.42 11:22:33:44:55:66 actif"
        );
    }

    #[test]
    fn short_rows_do_not_panic() {
        let body = r#"<table id="network_clients"><tbody>
            <tr><td>printer</td><td>aa:aa</td></tr>
        </tbody></table>"#;
        let devices = parse_connected_devices(body);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name(), "printer");
        // missing trailing columns render as empty fields, nothing panics
        assert!(devices[0].summary().starts_with("printer:"));
        assert!(devices[0].summary().contains("aa:aa"));
    }

    #[test]
    fn info_entries_cover_infos_table_and_status_cells() {
        let body = r#"
            <table id="infos">
              <tr><th>Version</th><td>NB6-MAIN-R3.3.4</td></tr>
              <tr><th>Mode</th><td>
                Routeur
              </td></tr>
            </table>
            <table>
              <tr><th>WAN</th><td id="wan_status">up</td></tr>
              <tr><th>Uptime</th><td id="modem_uptime"> 3 jours
                12 heures </td></tr>
            </table>"#;
        let entries = parse_info_entries(body);
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.label.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Version", "NB6-MAIN-R3.3.4"),
                ("Mode", "Routeur"),
                ("WAN", "up"),
                ("Uptime", "3 jours 12 heures"),
            ]
        );
    }
}
