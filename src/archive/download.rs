use crate::archive::ArchiveError;
use crate::crawler::fetch_url;
use crate::FetchError;
use reqwest::{Client, Response};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Streams the body at `url` into a new file at `destination`
///
/// The file is only created once the server has answered with a success
/// status, and is removed again if the body cannot be read or written.
/// Returns the number of bytes written.
pub async fn download_archive(
    client: &Client,
    url: &str,
    destination: &Path,
) -> Result<u64, ArchiveError> {
    let mut response = fetch_url(client, url).await?;

    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(|e| ArchiveError::io(destination, e))?;

    match write_body(&mut response, &mut file, url, destination).await {
        Ok(written) => Ok(written),
        Err(e) => {
            drop(file);
            if let Err(remove) = tokio::fs::remove_file(destination).await {
                tracing::warn!(
                    "Failed to remove partial download {}: {}",
                    destination.display(),
                    remove
                );
            }
            Err(e)
        }
    }
}

async fn write_body(
    response: &mut Response,
    file: &mut tokio::fs::File,
    url: &str,
    destination: &Path,
) -> Result<u64, ArchiveError> {
    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| ArchiveError::io(destination, e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| ArchiveError::io(destination, e))?;

    Ok(written)
}
