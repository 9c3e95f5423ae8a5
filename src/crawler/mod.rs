//! Crawler module for link discovery
//!
//! This module contains the page-side half of the grabber:
//! - HTTP fetching
//! - Tokenizing markup into tag and text events
//! - Rebuilding anchors and classifying them as archive links
//! - Depth-bounded traversal

mod fetcher;
mod link;
mod scanner;
mod tokenizer;
mod traversal;

pub use fetcher::{build_http_client, fetch_url};
pub use link::{Link, LinkRules};
pub use scanner::{scan_links, ScanOutcome, Termination};
pub use tokenizer::{Tag, Token, TokenStream};
pub use traversal::{traverse, traverse_recursive};
