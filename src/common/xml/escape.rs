use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once per process; text runs and layout names all go through it.
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters for use in element text or attribute values.
///
/// # Examples
///
/// ```
/// use slidekit::common::xml::escape_xml;
/// assert_eq!(escape_xml("Content + Image/Icon"), "Content + Image/Icon");
/// assert_eq!(escape_xml("R&D <draft>"), "R&amp;D &lt;draft&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_in_attribute() {
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_escape_keeps_entities_literal() {
        // Registry names may already contain entity text; it is escaped again.
        assert_eq!(
            escape_xml("Companies &amp; Transactions"),
            "Companies &amp;amp; Transactions"
        );
    }
}
