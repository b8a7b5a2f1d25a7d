pub struct StringUtils {}

impl StringUtils {
    pub fn maybe_pluralize((singular, plural): (&str, &str), qty: usize) -> String {
        format!("{}", if qty == 1 { singular } else { plural })
    }

    pub fn maybe_pluralize_count(count: usize, (singular, plural): (&str, &str)) -> String {
        format!("{} {}", count, Self::maybe_pluralize((singular, plural), count))
    }

    /// Uppercased first letters of the first two words, e.g. "Sarah Chen" -> "SC".
    pub fn initials(name: &str) -> String {
        name.split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Escape the HTML-significant characters so text is inserted as data.
    pub fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(StringUtils::initials("Sarah Chen"), "SC");
        assert_eq!(StringUtils::initials("support"), "S");
        assert_eq!(StringUtils::initials("  emily   rose rodriguez "), "ER");
        assert_eq!(StringUtils::initials(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            StringUtils::escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(StringUtils::escape_html("plain"), "plain");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(StringUtils::maybe_pluralize_count(1, ("reply", "replies")), "1 reply");
        assert_eq!(StringUtils::maybe_pluralize_count(3, ("reply", "replies")), "3 replies");
    }
}
