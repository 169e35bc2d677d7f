use log::{info, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::records::{Honor, PlayerRecord, PLACEHOLDER_DESCRIPTION};

use super::markup::{collapse_text, find_label, first_following, next_sibling_element, text_after};

/// Pull a player record out of a player page. Every field lookup is
/// independent; a page missing "Height" still yields "Position" and "Name".
/// Returns `None` when the name cannot be resolved or the description is the
/// source's placeholder.
pub fn extract_player(body: &str, url: &Url) -> Option<PlayerRecord> {
    let doc = Html::parse_document(body);
    let mut record = PlayerRecord::new(url);

    record.name = extract_name(&doc, url);

    if let Some(raw) = labeled_value(&doc, "Born") {
        record.birth_year = first_year(&raw);
        if record.birth_year.is_none() {
            warn!("No 4-digit year in Born value {:?} for {}", raw, url);
        }
    } else {
        warn!("Missing field 'Born' for {}", url);
    }

    for (label, slot) in [
        ("Birth Place", &mut record.birth_place),
        ("Position", &mut record.position),
        ("Status", &mut record.status),
        ("Ethnicity", &mut record.nationality),
        ("Team Number", &mut record.number),
        ("Height", &mut record.height),
        ("Weight", &mut record.weight),
        ("Team", &mut record.team),
    ] {
        match labeled_value(&doc, label) {
            Some(value) => *slot = value,
            None => warn!("Missing field '{}' for {}", label, url),
        }
    }

    match extract_description(&doc) {
        Some(text) if text == PLACEHOLDER_DESCRIPTION => {
            info!("Skipping {}: placeholder description", url);
            return None;
        }
        Some(text) => record.description = text,
        None => warn!("Missing description for {}", url),
    }

    record.honors = extract_honors(&doc);

    if record.name.is_empty() {
        warn!("Discarding {}: player name could not be extracted", url);
        return None;
    }

    Some(record)
}

/// Name sits behind a `<b>Name</b> -> <br> -> <font>` chain.
fn extract_name(doc: &Html, url: &Url) -> String {
    let Some(label) = find_label(doc, "Name") else {
        warn!("Missing 'Name' label for {}", url);
        return String::new();
    };

    let font = next_sibling_element(label, "br").and_then(|br| next_sibling_element(br, "font"));
    let Some(font) = font else {
        warn!("No value node after 'Name' label for {}", url);
        return String::new();
    };

    // Improperly self-closed anchors leak a "/1234-" href fragment into the text.
    let raw = collapse_text(&font);
    let artifact = Regex::new(r"^/[^/]+-/").unwrap();
    artifact.replace(&raw, "").trim().to_string()
}

/// `<b>{label}</b> -> <br> -> value` walk shared by all secondary fields.
fn labeled_value(doc: &Html, label: &str) -> Option<String> {
    let label_el = find_label(doc, label)?;
    let br = next_sibling_element(label_el, "br")?;
    text_after(br)
}

fn first_year(raw: &str) -> Option<u32> {
    let year = Regex::new(r"\d{4}").unwrap();
    year.find(raw)?.as_str().parse().ok()
}

/// Description is the first paragraph after the `<b>Description</b>` label,
/// past whatever edit links sit between them.
fn extract_description(doc: &Html) -> Option<String> {
    let label = find_label(doc, "Description")?;
    let paragraph = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "p")?;

    let text = collapse_text(&paragraph);
    (!text.is_empty()).then_some(text)
}

fn extract_honors(doc: &Html) -> Vec<Honor> {
    let Some(label) = find_label(doc, "Career Honours") else {
        return Vec::new();
    };
    let Some(table) = first_following(doc, label, "table") else {
        return Vec::new();
    };

    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let mut honors = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() >= 2 {
            honors.push(Honor {
                honor: collapse_text(&cells[0]),
                year: collapse_text(&cells[1]),
            });
        }
    }
    honors
}
