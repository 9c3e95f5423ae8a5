//! Anchor scanner
//!
//! Rebuilds anchor elements from a token stream: an `<a>` start tag carrying
//! attributes opens a pending anchor, text is accumulated while it is open,
//! and the matching `</a>` turns it into a [`Link`]. Only links passing
//! [`Link::is_valid`] are kept.

use crate::crawler::link::{Link, LinkRules};
use crate::crawler::tokenizer::{Tag, Token};

/// How the token stream ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// All input was consumed
    Clean,

    /// The stream reported an error; links found before it are kept
    Malformed(String),
}

/// Links discovered by a scan and how the scan ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub links: Vec<Link>,
    pub termination: Termination,
}

impl ScanOutcome {
    pub fn is_clean(&self) -> bool {
        self.termination == Termination::Clean
    }
}

/// Scans tokens for valid archive links found at `depth`
///
/// A start tag seen while another anchor is still pending is ignored, so
/// the text of both ends up in the first anchor's link.
pub fn scan_links<I>(tokens: I, depth: u32, rules: &LinkRules) -> ScanOutcome
where
    I: IntoIterator<Item = Token>,
{
    let mut links = Vec::new();
    let mut pending: Option<Tag> = None;
    let mut text = String::new();

    for token in tokens {
        match token {
            Token::Text(data) => {
                if pending.is_some() {
                    text.push_str(&data);
                }
            }
            Token::StartTag(tag) => {
                if !tag.is_anchor() || tag.attrs.is_empty() {
                    continue;
                }
                if pending.is_some() {
                    tracing::debug!("Nested link start ignored: {:?}", tag.attrs);
                    continue;
                }
                pending = Some(tag);
                text.clear();
            }
            Token::EndTag(name) => {
                if !name.eq_ignore_ascii_case("a") {
                    continue;
                }
                let Some(start) = pending.take() else {
                    tracing::warn!("Link end found without start: {}", text);
                    continue;
                };

                let link = new_link(&start, &text, depth, rules);
                if link.is_valid(rules) {
                    tracing::debug!("Link found {}", link);
                    links.push(link);
                }
                text.clear();
            }
            Token::Error(reason) => {
                return ScanOutcome {
                    links,
                    termination: Termination::Malformed(reason),
                };
            }
        }
    }

    ScanOutcome {
        links,
        termination: Termination::Clean,
    }
}

fn new_link(start: &Tag, text: &str, depth: u32, rules: &LinkRules) -> Link {
    let url = start
        .attr(&rules.url_attribute)
        .map(str::trim)
        .unwrap_or_default();

    Link::new(url, text.trim(), depth)
}
