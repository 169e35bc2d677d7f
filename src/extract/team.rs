use log::warn;
use scraper::{Html, Selector};
use url::Url;

use crate::frontier;
use crate::records::TeamRecord;

use super::markup::collapse_text;

/// Team pages don't use the label/value layout; the name comes from the
/// breadcrumb trail and the roster is whatever player links the page carries.
pub fn extract_team(body: &str, url: &Url, base: &Url) -> TeamRecord {
    let doc = Html::parse_document(body);
    let mut team = TeamRecord {
        url: url.to_string(),
        ..Default::default()
    };

    // 5th breadcrumb anchor: Home / Sport / Country / League / Team.
    let crumb_sel = Selector::parse("section#feature div.col-sm-12 a").unwrap();
    match doc.select(&crumb_sel).nth(4) {
        Some(anchor) => team.name = collapse_text(&anchor),
        None => warn!("Not enough breadcrumbs to name team at {}", url),
    }

    team.players = frontier::discover_players(body, base)
        .iter()
        .map(Url::to_string)
        .collect();

    team
}
