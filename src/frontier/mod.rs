use std::collections::HashSet;

use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

const TEAM_HREF: &str = r"^/team/\d+-";
const PLAYER_HREF: &str = r"^/player/\d+-";

/// Team links on a league page, first-seen order, deduplicated.
pub fn discover_teams(body: &str, base: &Url) -> Vec<Url> {
    discover_links(body, base, TEAM_HREF)
}

/// Player links on a team page, first-seen order, deduplicated.
pub fn discover_players(body: &str, base: &Url) -> Vec<Url> {
    discover_links(body, base, PLAYER_HREF)
}

fn discover_links(body: &str, base: &Url, href_pattern: &str) -> Vec<Url> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("a[href]").unwrap();
    let pattern = Regex::new(href_pattern).unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !pattern.is_match(href) {
            continue;
        }
        match base.join(href) {
            Ok(url) => {
                if seen.insert(url.to_string()) {
                    links.push(url);
                }
            }
            Err(e) => debug!("Ignoring unresolvable link {:?}: {}", href, e),
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.thesportsdb.com").unwrap()
    }

    #[test]
    fn team_links_are_filtered_by_shape() {
        let body = r#"<html><body>
            <a href="/team/134946-Arizona-Cardinals">Cardinals</a>
            <a href="/team/no-id-here">Not a team page</a>
            <a href="/league/4391-NFL">League</a>
            <a href="/team/134918-Chicago-Bears">Bears</a>
        </body></html>"#;

        let teams = discover_teams(body, &base());
        assert_eq!(
            teams.iter().map(Url::as_str).collect::<Vec<_>>(),
            vec![
                "https://www.thesportsdb.com/team/134946-Arizona-Cardinals",
                "https://www.thesportsdb.com/team/134918-Chicago-Bears",
            ]
        );
    }

    #[test]
    fn duplicate_links_are_collapsed_in_first_seen_order() {
        let body = r#"<html><body>
            <a href="/player/2-B">B</a>
            <a href="/player/1-A">A</a>
            <a href="/player/2-B">B again</a>
        </body></html>"#;

        let players = discover_players(body, &base());
        assert_eq!(
            players.iter().map(Url::as_str).collect::<Vec<_>>(),
            vec![
                "https://www.thesportsdb.com/player/2-B",
                "https://www.thesportsdb.com/player/1-A",
            ]
        );
    }

    #[test]
    fn relative_links_resolve_against_base() {
        let body = r#"<a href="/player/7-Seven">Seven</a>"#;
        let players = discover_players(body, &base());
        assert_eq!(players[0].as_str(), "https://www.thesportsdb.com/player/7-Seven");
    }
}
