use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid markup tag regex"));

/// Strips every tag from a markup string and decodes the basic entities.
/// Works on any decorated citation, not only the ones produced here.
pub fn to_plain_text(markup: &str) -> String {
    decode_entities(&MARKUP_TAG.replace_all(markup, ""))
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    // `&amp;` last so `&amp;lt;` decodes to the literal `&lt;`.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_decodes_entities() {
        assert_eq!(
            to_plain_text("SILVA, M. <strong>A &amp; B</strong>. <em>Rev.</em>, 2020."),
            "SILVA, M. A & B. Rev., 2020."
        );
    }

    #[test]
    fn handles_foreign_markup() {
        assert_eq!(
            to_plain_text(r#"<span class="x"><i>T</i></span> &lt;b&gt;"#),
            "T <b>"
        );
        assert_eq!(to_plain_text("&amp;lt;"), "&lt;");
    }
}
