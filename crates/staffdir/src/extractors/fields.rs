// ABOUTME: Named lookup helpers for reading text and attributes out of a document or a sub-element.
// ABOUTME: Every lookup returns an Option so a missing node is an explicit "not found", never a panic.

//! Field lookup utilities.
//!
//! Key behaviors:
//! - Only the first element matching a selector is considered.
//! - Whitespace is normalized (collapsed to single spaces, trimmed).
//! - Empty strings are treated as no match.

use scraper::{ElementRef, Html, Selector};

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Normalized text of the first element in `doc` matching `sel`.
pub fn doc_text(doc: &Html, sel: &Selector) -> Option<String> {
    let el = doc.select(sel).next()?;
    non_empty(normalize_whitespace(&el.text().collect::<String>()))
}

/// Trimmed `attr` of the first element in `doc` matching `sel`.
pub fn doc_attr(doc: &Html, sel: &Selector, attr: &str) -> Option<String> {
    let el = doc.select(sel).next()?;
    non_empty(el.value().attr(attr)?.trim().to_string())
}

/// Normalized text of the first descendant of `scope` matching `sel`.
pub fn scoped_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    let el = scope.select(sel).next()?;
    non_empty(normalize_whitespace(&el.text().collect::<String>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <html>
        <head><title>  Staff Directory |   Laketown   </title></head>
        <body>
            <a class="map" href="  https://maps.example.com/?daddr=1+Main  ">Map</a>
            <a class="blank" href="   ">Nothing</a>
            <div class="card">
                <span class="role">
                    Media   Specialist
                </span>
                <span class="empty">   </span>
            </div>
        </body>
        </html>
    "#;

    fn sel(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn doc_text_normalizes_whitespace() {
        let doc = Html::parse_document(SAMPLE_HTML);
        assert_eq!(
            doc_text(&doc, &sel("title")),
            Some("Staff Directory | Laketown".to_string())
        );
    }

    #[test]
    fn doc_attr_trims_value() {
        let doc = Html::parse_document(SAMPLE_HTML);
        assert_eq!(
            doc_attr(&doc, &sel("a.map"), "href"),
            Some("https://maps.example.com/?daddr=1+Main".to_string())
        );
    }

    #[test]
    fn blank_attr_is_not_found() {
        let doc = Html::parse_document(SAMPLE_HTML);
        assert_eq!(doc_attr(&doc, &sel("a.blank"), "href"), None);
        assert_eq!(doc_attr(&doc, &sel("a.map"), "title"), None);
    }

    #[test]
    fn scoped_text_reads_inside_scope() {
        let doc = Html::parse_document(SAMPLE_HTML);
        let card = doc.select(&sel("div.card")).next().unwrap();
        assert_eq!(
            scoped_text(card, &sel("span.role")),
            Some("Media Specialist".to_string())
        );
        assert_eq!(scoped_text(card, &sel("span.empty")), None);
        assert_eq!(scoped_text(card, &sel("title")), None);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace("   "), "");
    }
}
