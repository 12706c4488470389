//! HTML helpers for card fields.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("invalid regex"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("invalid regex")
});

/// Escapes text for use inside an HTML element or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Converts marked-up mnemonic text into a single line of plain text.
pub fn plain_text(html: &str) -> String {
    let stripped = TAG.replace_all(html, "");
    let unescaped = ENTITY.replace_all(&stripped, |caps: &Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    unescaped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entity(entity: &str) -> Option<String> {
    let c = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        char::from_u32(u32::from_str_radix(hex, 16).ok()?)?
    } else if let Some(dec) = entity.strip_prefix('#') {
        char::from_u32(dec.parse().ok()?)?
    } else {
        match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => ' ',
            "hellip" => '…',
            "mdash" => '—',
            "ndash" => '–',
            "lsquo" => '‘',
            "rsquo" => '’',
            "ldquo" => '“',
            "rdquo" => '”',
            _ => return None,
        }
    };
    Some(c.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_markup() {
        let mnemonic = "The <radical-highlight>ground</radical-highlight> is\n  flat &amp; wide.";
        assert_eq!(plain_text(mnemonic), "The ground is flat & wide.");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(plain_text("&#39;on&#x27;yomi&#39;"), "'on'yomi'");
        assert_eq!(plain_text("&unknown; &#xZZ;"), "&unknown; &#xZZ;");
    }

    #[test]
    fn leaves_unclosed_brackets() {
        assert_eq!(plain_text("1 < 2"), "1 < 2");
        assert_eq!(plain_text("<>"), "<>");
    }

    #[test]
    fn escapes_text() {
        assert_eq!(escape(r#"<b>"Tom" & Jerry</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; Jerry&lt;/b&gt;");
        assert_eq!(escape("人"), "人");
    }
}
