use crate::UrlError;
use url::Url;

/// Resolves a link's URL against the page it was found on
///
/// Absolute URLs are returned as they are; site-relative ones are joined onto
/// `base`. Only HTTP and HTTPS results are accepted.
///
/// # Examples
///
/// ```
/// use sinit_grabber::url::resolve_link_url;
///
/// let url = resolve_link_url("https://example.com/articles/txt.html", "/dl/sinit.zip").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/dl/sinit.zip");
/// ```
pub fn resolve_link_url(base: &str, link: &str) -> Result<Url, UrlError> {
    let link = link.trim();

    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|base| base.join(link))
            .map_err(|e| UrlError::Parse(format!("{} (base {}): {}", link, base, e)))?,
        Err(e) => return Err(UrlError::Parse(format!("{}: {}", link, e))),
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}
