/// Returns the final path segment of a URL
///
/// This is the substring after the last `/`, or the whole input when it has
/// no `/`.
///
/// # Examples
///
/// ```
/// use sinit_grabber::url::filename_from_url;
///
/// assert_eq!(filename_from_url("https://example.com/path/SINIT-tool.zip"), "SINIT-tool.zip");
/// assert_eq!(filename_from_url("SINIT-tool.zip"), "SINIT-tool.zip");
/// ```
pub fn filename_from_url(url: &str) -> &str {
    match url.rfind('/') {
        Some(index) => &url[index + 1..],
        None => url,
    }
}

/// Joins `dir` with `filename` stripped of its last extension
///
/// Not used by extraction, which flattens payloads straight into the output
/// folder; kept for callers that want one directory per archive.
///
/// # Examples
///
/// ```
/// use sinit_grabber::url::directory_name_from_filename;
///
/// assert_eq!(directory_name_from_filename("out", "SINIT-tool.zip"), "out/SINIT-tool");
/// ```
pub fn directory_name_from_filename(dir: &str, filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(index) => &filename[..index],
        None => filename,
    };
    format!("{}/{}", dir, stem)
}
