use scraper::{Html, Selector};
use crate::utils::truncation::collapse_whitespace;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Readable text of an HTML page: title, meta description, then visible body text.
pub fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<String> = Vec::new();

    if let Some(title) = select_text(&document, "title") {
        parts.push(title);
    }
    if let Some(desc) = select_attr(&document, "meta[name='description']", "content") {
        parts.push(desc);
    }
    parts.push(visible_body_text(&document));

    collapse_whitespace(&parts.join("\n"))
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
}

fn visible_body_text(document: &Html) -> String {
    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .unwrap_or_else(|| document.root_element());

    let mut parts = Vec::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        let trimmed = text.trim();
        if !hidden && !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_visible_text_only() {
        let html = r#"<html><head><title>Acme | Careers</title>
            <meta name="description" content="Build rockets with us.">
            <style>body { color: red; }</style></head>
            <body><h1>Join   Acme</h1><script>var tracking = 1;</script>
            <p>We value <b>curiosity</b>.</p><noscript>Enable JS</noscript></body></html>"#;
        let text = extract_readable_text(html);
        assert!(text.starts_with("Acme | Careers Build rockets with us."));
        assert!(text.contains("Join Acme"));
        assert!(text.contains("We value curiosity ."));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Enable JS"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_readable_text(""), "");
    }
}
