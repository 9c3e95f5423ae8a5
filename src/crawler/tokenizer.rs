//! Markup tokenizer
//!
//! Turns a response body into a lazy sequence of [`Token`] values using the
//! html5ever tokenizer on its own, without a tree builder. Tags are reported
//! exactly as they appear in the source: unclosed anchors get no end tag and
//! stray end tags are kept.
//!
//! Input is fed to the tokenizer a chunk at a time as the iterator is
//! consumed. Bytes that are not valid UTF-8 are replaced, never treated as an
//! error. A clean end of input is signalled by the iterator running out; a
//! body whose transfer broke off ends with a [`Token::Error`] after the
//! tokens of the bytes that did arrive.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as HtmlToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use std::collections::VecDeque;

/// Bytes of input handed to the tokenizer per refill
const CHUNK_SIZE: usize = 8 * 1024;

/// A start tag and its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercase element name
    pub name: String,

    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
}

impl Tag {
    pub fn new(name: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Returns the value of the first attribute named `key`
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_anchor(&self) -> bool {
        self.name.eq_ignore_ascii_case("a")
    }
}

/// One lexical markup event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of character data
    Text(String),

    /// An opening tag
    StartTag(Tag),

    /// A closing tag, by element name
    EndTag(String),

    /// The input could not be read any further
    Error(String),
}

/// Collects html5ever tokens as [`Token`] values
#[derive(Default)]
struct Collector {
    queue: VecDeque<Token>,
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&mut self, token: HtmlToken, line: u64) -> TokenSinkResult<()> {
        match token {
            HtmlToken::TagToken(tag) => {
                // html5ever already lowercases tag names
                let name = String::from(&*tag.name);
                match tag.kind {
                    TagKind::StartTag => {
                        let attrs = tag
                            .attrs
                            .iter()
                            .map(|attr| {
                                (String::from(&*attr.name.local), String::from(&*attr.value))
                            })
                            .collect();
                        self.queue.push_back(Token::StartTag(Tag {
                            name: name.clone(),
                            attrs,
                        }));

                        if tag.self_closing {
                            self.queue.push_back(Token::EndTag(name));
                        } else if let Some(next) = content_state(&name) {
                            return next;
                        }
                    }
                    TagKind::EndTag => self.queue.push_back(Token::EndTag(name)),
                }
            }
            HtmlToken::CharacterTokens(text) => {
                self.queue.push_back(Token::Text(String::from(&*text)))
            }
            HtmlToken::ParseError(reason) => {
                tracing::trace!("Recoverable markup error on line {}: {}", line, reason);
            }
            HtmlToken::DoctypeToken(_)
            | HtmlToken::CommentToken(_)
            | HtmlToken::NullCharacterToken
            | HtmlToken::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizer state for the content of elements whose text is not markup
fn content_state(name: &str) -> Option<TokenSinkResult<()>> {
    match name {
        "title" | "textarea" => Some(TokenSinkResult::RawData(RawKind::Rcdata)),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            Some(TokenSinkResult::RawData(RawKind::Rawtext))
        }
        "script" => Some(TokenSinkResult::RawData(RawKind::ScriptData)),
        "plaintext" => Some(TokenSinkResult::Plaintext),
        _ => None,
    }
}

/// Lazy token sequence over a response body
pub struct TokenStream {
    tokenizer: Tokenizer<Collector>,
    input: BufferQueue,
    text: String,
    offset: usize,
    read_error: Option<String>,
    finished: bool,
}

impl TokenStream {
    /// Tokenizes a complete body
    pub fn new(body: &[u8]) -> Self {
        Self {
            tokenizer: Tokenizer::new(Collector::default(), TokenizerOpts::default()),
            input: BufferQueue::new(),
            text: String::from_utf8_lossy(body).into_owned(),
            offset: 0,
            read_error: None,
            finished: false,
        }
    }

    /// Tokenizes the part of a body read before the transfer failed
    ///
    /// The tokens of `partial` are followed by `Token::Error(reason)`.
    pub fn truncated(partial: &[u8], reason: impl Into<String>) -> Self {
        Self {
            read_error: Some(reason.into()),
            ..Self::new(partial)
        }
    }

    /// Hands the next chunk of input to the tokenizer, or ends it
    fn refill(&mut self) {
        if self.offset < self.text.len() {
            let mut end = (self.offset + CHUNK_SIZE).min(self.text.len());
            while !self.text.is_char_boundary(end) {
                end += 1;
            }
            self.input
                .push_back(StrTendril::from_slice(&self.text[self.offset..end]));
            self.offset = end;
            let _ = self.tokenizer.feed(&mut self.input);
        } else {
            self.tokenizer.end();
            self.finished = true;
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.tokenizer.sink.queue.pop_front() {
                return Some(token);
            }
            if self.finished {
                return self.read_error.take().map(Token::Error);
            }
            self.refill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_events(body: &[u8]) -> Vec<Token> {
        TokenStream::new(body)
            .filter(|token| match token {
                Token::StartTag(tag) => tag.is_anchor(),
                Token::EndTag(name) => name == "a",
                Token::Text(_) => false,
                Token::Error(_) => true,
            })
            .collect()
    }

    fn text_of(tokens: &[Token]) -> String {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_anchor_start_text_and_end() {
        let tokens: Vec<Token> =
            TokenStream::new(br#"<html><body><a data-id-url="x.zip">Go</a></body></html>"#).collect();

        let start = tokens
            .iter()
            .position(|t| matches!(t, Token::StartTag(tag) if tag.is_anchor()))
            .unwrap();
        assert_eq!(tokens[start + 1], Token::Text("Go".to_string()));
        assert_eq!(tokens[start + 2], Token::EndTag("a".to_string()));

        match &tokens[start] {
            Token::StartTag(tag) => assert_eq!(tag.attr("data-id-url"), Some("x.zip")),
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn test_clean_input_has_no_error_token() {
        assert!(!TokenStream::new(b"<p>plain</p>").any(|t| matches!(t, Token::Error(_))));
    }

    #[test]
    fn test_unclosed_anchor_has_no_end_tag() {
        let events = anchor_events(br#"<a data-id-url="https://e.com/SINIT.zip">Driver"#);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Token::StartTag(_)));
    }

    #[test]
    fn test_stray_end_tag_is_kept() {
        let events = anchor_events(br#"<p>text</a></p><a href="/x">X</a>"#);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Token::EndTag("a".to_string()));
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut body = b"<title>Caf".to_vec();
        body.push(0xe9);
        body.extend_from_slice(br#"</title><a data-id-url="https://e.com/SINIT.zip">Driver</a>"#);

        let tokens: Vec<Token> = TokenStream::new(&body).collect();

        assert!(!tokens.iter().any(|t| matches!(t, Token::Error(_))));
        assert!(text_of(&tokens).contains("Caf\u{fffd}"));
        assert_eq!(
            tokens
                .iter()
                .filter(|t| matches!(t, Token::StartTag(tag) if tag.is_anchor()))
                .count(),
            1
        );
    }

    #[test]
    fn test_truncated_body_ends_with_error() {
        let tokens: Vec<Token> =
            TokenStream::truncated(br#"<a data-id-url="one">One</a><a"#, "connection reset").collect();

        assert_eq!(tokens.last(), Some(&Token::Error("connection reset".to_string())));
        assert_eq!(
            tokens.iter().filter(|t| matches!(t, Token::Error(_))).count(),
            1
        );
    }

    #[test]
    fn test_script_content_is_text() {
        let tokens: Vec<Token> =
            TokenStream::new(br#"<script>if (a<b) { x = "</a>"; }</script><a href="/y">Y</a>"#)
                .collect();

        let ends = tokens
            .iter()
            .filter(|t| matches!(t, Token::EndTag(name) if name == "a"))
            .count();
        assert_eq!(ends, 1);
        assert!(text_of(&tokens).contains("a<b"));
    }

    #[test]
    fn test_long_body_spans_chunks() {
        let mut body = "<p>".to_string();
        body.push_str(&"é".repeat(CHUNK_SIZE));
        body.push_str(r#"</p><a data-id-url="z.zip">Z</a>"#);

        let events = anchor_events(body.as_bytes());
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_self_closing_anchor_gets_end_tag() {
        let events = anchor_events(br#"<a data-id-url="z.zip"/>"#);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_tag_names_are_lowercase() {
        assert_eq!(anchor_events(br#"<A HREF="/x">Up</A>"#).len(), 2);
    }

    #[test]
    fn test_attr_lookup() {
        let tag = Tag::new("A", &[("href", "/x"), ("data-id-url", "/y.zip")]);
        assert!(tag.is_anchor());
        assert_eq!(tag.attr("data-id-url"), Some("/y.zip"));
        assert_eq!(tag.attr("title"), None);
    }
}
