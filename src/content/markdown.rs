//! Markdown to markup conversion for detail content

use pulldown_cmark::{html, Options, Parser};

/// Convert a markdown content string to markup
///
/// The default rendering path for node content. Empty input yields an
/// empty string.
pub fn to_markup(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, options);
    let mut markup = String::new();
    html::push_html(&mut markup, parser);
    markup
}
