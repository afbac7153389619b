/// Collapse runs of Unicode whitespace into one ASCII space and trim the
/// edges.
///
/// ```rust
/// use normalize::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  قل\u{00A0}\u{00A0}هو\n الله "), "قل هو الله");
/// assert_eq!(collapse_whitespace(" \t\r\n"), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(segment);
    }
    collapsed
}
