//! Depth-bounded page traversal
//!
//! [`traverse`] fetches one page and scans it. Fetch failures are logged and
//! produce no links. [`traverse_recursive`] additionally visits the pages of
//! discovered links, one level deeper, for as long as the depth limit allows.

use crate::crawler::fetcher::fetch_url;
use crate::crawler::link::{Link, LinkRules};
use crate::crawler::scanner::{scan_links, Termination};
use crate::crawler::tokenizer::TokenStream;
use crate::url::resolve_link_url;
use reqwest::Client;

/// Fetches `url` and returns the valid links found on it at `depth`
pub async fn traverse(client: &Client, url: &str, depth: u32, rules: &LinkRules) -> Vec<Link> {
    let mut response = match fetch_url(client, url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("{}", e);
            return Vec::new();
        }
    };

    let mut body = Vec::new();
    let tokens = loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break TokenStream::new(&body),
            Err(e) => break TokenStream::truncated(&body, e.to_string()),
        }
    };

    let outcome = scan_links(tokens, depth, rules);

    if let Termination::Malformed(reason) = &outcome.termination {
        tracing::warn!(
            "Scan of {} stopped early ({}), keeping {} links",
            url,
            reason,
            outcome.links.len()
        );
    }

    tracing::debug!("{} links found on {}", outcome.links.len(), url);
    outcome.links
}

/// Traverses `url` and then every discovered link's page, depth first
///
/// Each link is followed with `depth + 1`, and only while that stays below
/// `rules.max_depth`. Relative link URLs are resolved against the page they
/// were found on; links that cannot be resolved are kept but not followed.
pub async fn traverse_recursive(
    client: &Client,
    url: &str,
    depth: u32,
    rules: &LinkRules,
) -> Vec<Link> {
    let mut found = Vec::new();
    let mut stack = vec![(url.to_string(), depth)];

    while let Some((page, depth)) = stack.pop() {
        let links = traverse(client, &page, depth, rules).await;

        if depth + 1 < rules.max_depth {
            for link in links.iter().rev() {
                match resolve_link_url(&page, &link.url) {
                    Ok(next) => stack.push((next.to_string(), depth + 1)),
                    Err(e) => tracing::warn!("Not following {}: {}", link.url, e),
                }
            }
        }

        found.extend(links);
    }

    found
}
