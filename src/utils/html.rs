use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Question statements, explanations and simulado descriptions arrive from the
/// admin panel as rich text. Whitelist-based sanitization keeps safe tags
/// (like <b>, <p>) while stripping dangerous tags (<script>, <iframe>) and
/// malicious attributes (onclick). Fail-safe against Stored XSS.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
