//! Candidate download links and the rules that classify them

use std::fmt;

/// Rules deciding whether a discovered anchor points at a wanted archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRules {
    /// Links discovered at this depth or deeper are rejected
    pub max_depth: u32,

    /// Marker the URL must contain, compared case-insensitively
    pub product_marker: String,

    /// Archive suffix the URL must contain, compared case-insensitively
    pub archive_suffix: String,

    /// Anchor attribute the URL is read from
    pub url_attribute: String,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            max_depth: 1,
            product_marker: "sinit".to_string(),
            archive_suffix: ".zip".to_string(),
            url_attribute: "data-id-url".to_string(),
        }
    }
}

/// A hyperlink discovered on a scanned page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Absolute or site-relative locator; empty when the anchor had none
    pub url: String,

    /// Trimmed anchor text
    pub text: String,

    /// Depth of the page the link was found on
    pub depth: u32,
}

impl Link {
    pub fn new(url: impl Into<String>, text: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            depth,
        }
    }

    /// Returns true if the link should be downloaded
    ///
    /// A link is valid when it was found above the depth limit, has anchor
    /// text, is not a `javascript` pseudo-URL, and its URL contains both the
    /// product marker and the archive suffix (case-insensitive, any order).
    pub fn is_valid(&self, rules: &LinkRules) -> bool {
        if self.depth >= rules.max_depth {
            return false;
        }

        if self.text.is_empty() || self.url.is_empty() {
            return false;
        }

        let url = self.url.to_lowercase();
        if url.contains("javascript") {
            return false;
        }

        url.contains(&rules.product_marker.to_lowercase())
            && url.contains(&rules.archive_suffix.to_lowercase())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("\t")?;
        }
        write!(f, "{} ({}) - {}", self.text, self.depth, self.url)
    }
}
