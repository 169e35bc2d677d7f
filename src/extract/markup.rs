use scraper::{ElementRef, Html, Node, Selector};

/// The `<b>` label node whose full text equals `label`, ASCII-case-insensitive.
pub(super) fn find_label<'a>(doc: &'a Html, label: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse("b").unwrap();
    doc.select(&selector)
        .find(|el| collapse_text(el).eq_ignore_ascii_case(label))
}

/// First following sibling that is an element with the given tag name.
pub(super) fn next_sibling_element<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == tag)
}

/// The node immediately after `el`: bare text is trimmed, an element is
/// flattened to its text. A whitespace-only value counts as missing.
pub(super) fn text_after(el: ElementRef) -> Option<String> {
    let node = el.next_sibling()?;
    let value = match node.value() {
        Node::Text(text) => text.trim().to_string(),
        Node::Element(_) => ElementRef::wrap(node).map(|e| collapse_text(&e))?,
        _ => return None,
    };
    (!value.is_empty()).then_some(value)
}

/// All text under `el`, segment-trimmed and joined by single spaces.
pub(super) fn collapse_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `tag` element after `from` in document order, not restricted to
/// the sibling chain.
pub(super) fn first_following<'a>(
    doc: &'a Html,
    from: ElementRef<'a>,
    tag: &str,
) -> Option<ElementRef<'a>> {
    let mut past_label = false;
    for node in doc.root_element().descendants() {
        if !past_label {
            past_label = node.id() == from.id();
            continue;
        }
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name() == tag {
                return Some(el);
            }
        }
    }
    None
}
