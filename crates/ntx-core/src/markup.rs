//! Escaping for note text embedded in markup.
//!
//! Note titles and bodies are user data stored on the server; they must never
//! be interpreted as markup by whatever sink displays them. Only the three
//! markup-significant characters are rewritten, nothing else.

/// Escapes `&`, `<` and `>` in note text.
///
/// Ampersand is rewritten first so already-escaped sequences are not
/// double-mangled into invalid entities.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
