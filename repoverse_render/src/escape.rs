//! XML escaping for user-supplied text and attribute values.

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    #[test]
    fn escapes_all_five_entities() {
        assert_eq!(
            escape_xml(r#"R&D <lab> "quotes" 'ticks'"#),
            "R&amp;D &lt;lab&gt; &quot;quotes&quot; &apos;ticks&apos;"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_xml("nebula-cache"), "nebula-cache");
    }
}
