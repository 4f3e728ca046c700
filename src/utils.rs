use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Node, Selector};
use std::borrow::Borrow;

const E: &str = "Invalid selector";
lazy_static! {
    /// Elements whose contents never reach the reader.
    static ref NOISY: Selector = Selector::parse(
        "script, style, noscript, template, iframe, svg, canvas, button, form, input, nav, aside"
    )
    .expect(E);
    static ref BLOCK: Selector = Selector::parse(
        "address, article, blockquote, br, dd, details, div, dl, dt, figcaption, \
         h1, h2, h3, h4, h5, h6, hr, li, ol, p, pre, section, summary, table, td, th, tr, ul"
    )
    .expect(E);
}

pub(crate) fn is_noisy(el: &ElementRef<'_>) -> bool {
    NOISY.matches(el)
}

/// Visible text of `el` with markup collapsed to single spaces.
pub(crate) fn visible_text(el: ElementRef<'_>) -> String {
    let mut buf = String::new();
    push_text(el, &mut buf);
    clean_text(&buf)
}

fn push_text(el: ElementRef<'_>, buf: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_noisy(&child) {
                    continue;
                }
                let block = BLOCK.matches(&child);
                if block {
                    buf.push(' ');
                }
                push_text(child, buf);
                if block {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }
}

pub fn clean_text(text: &str) -> String {
    let text = text.replace("Â\u{a0}", " ").replace('\u{a0}', " ");
    let text = regex!(r"¶").replace_all(text.borrow(), "");
    let text = regex!(r"\[\d+\]").replace_all(text.borrow(), "");
    let text = regex!(r"\s+").replace_all(text.borrow(), " ");
    text.trim().to_string()
}
