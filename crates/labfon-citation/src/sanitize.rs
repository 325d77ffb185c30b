//! Escaping of free text and validation of link targets.

use tracing::debug;
use url::Url;

/// Schemes accepted by [`HtmlSanitizer`] unless configured otherwise.
pub const DEFAULT_ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Makes untrusted text safe to interpolate into markup.
pub trait Sanitizer {
    /// Escapes text for element content.
    fn escape(&self, text: &str) -> String;

    /// Escapes text for a quoted attribute value.
    fn escape_attribute(&self, text: &str) -> String {
        escape_attribute(&self.escape(text))
    }

    /// Returns the normalized URL if its scheme is allowed.
    fn sanitize_url(&self, url: &str) -> Option<String>;
}

/// HTML escaping with a scheme allow-list for URLs.
#[derive(Debug, Clone)]
pub struct HtmlSanitizer {
    allowed_schemes: Vec<String>,
    base: Option<Url>,
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self {
            allowed_schemes: DEFAULT_ALLOWED_SCHEMES
                .iter()
                .map(|scheme| (*scheme).to_string())
                .collect(),
            base: None,
        }
    }
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative URLs against `base` instead of rejecting them.
    #[must_use]
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn with_allowed_schemes(mut self, schemes: &[&str]) -> Self {
        self.allowed_schemes = schemes.iter().map(|s| s.to_ascii_lowercase()).collect();
        self
    }
}

impl Sanitizer for HtmlSanitizer {
    fn escape(&self, text: &str) -> String {
        escape_html(text)
    }

    fn sanitize_url(&self, url: &str) -> Option<String> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return None;
        }
        let parsed = match Url::options().base_url(self.base.as_ref()).parse(trimmed) {
            Ok(parsed) => parsed,
            Err(error) => {
                debug!(url = trimmed, %error, "rejected unparsable url");
                return None;
            }
        };
        if self
            .allowed_schemes
            .iter()
            .any(|scheme| scheme == parsed.scheme())
        {
            Some(parsed.into())
        } else {
            debug!(url = trimmed, scheme = parsed.scheme(), "rejected url scheme");
            None
        }
    }
}

/// Escapes `&`, `<` and `>`. Quotes are left as-is, so the result is only
/// safe as element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes quotes in text that has already been through [`escape_html`].
fn escape_attribute(escaped: &str) -> String {
    escaped.replace('"', "&quot;").replace('\'', "&#39;")
}
