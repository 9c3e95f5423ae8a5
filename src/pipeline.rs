//! Run driver
//!
//! Scans the seed page at depth 0, then downloads and unpacks every accepted
//! link one after another, in the order they were found. A failing link is
//! logged and skipped; the run always goes through the whole list.

use crate::archive::{process_link, OutputLayout};
use crate::config::Config;
use crate::crawler::{build_http_client, traverse, Link, LinkRules};
use crate::GrabberError;
use reqwest::Client;

pub use crate::output::RunSummary;

/// Runs the grabber with the given configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - The run finished; individual links may have failed
/// * `Err(GrabberError)` - The HTTP client or output layout could not be set up
pub async fn run(config: &Config) -> Result<RunSummary, GrabberError> {
    let client = build_http_client()?;
    let layout = OutputLayout::new(
        &config.output.output_folder,
        !config.output.keep_archives,
    )?;

    tracing::info!(
        "Writing payloads to {} (staging in {})",
        layout.output_folder.display(),
        layout.staging_dir.display()
    );

    Ok(run_with(
        &client,
        &config.crawler.seed_url,
        &config.link_rules(),
        &layout,
        &config.output.payload_extension,
    )
    .await)
}

/// Scans `seed_url` and processes every link found on it
pub async fn run_with(
    client: &Client,
    seed_url: &str,
    rules: &LinkRules,
    layout: &OutputLayout,
    payload_extension: &str,
) -> RunSummary {
    let links = traverse(client, seed_url, 0, rules).await;
    tracing::info!("{} archive links found on {}", links.len(), seed_url);

    process_links(client, seed_url, &links, layout, payload_extension).await
}

/// Downloads and unpacks `links` in order
pub async fn process_links(
    client: &Client,
    page_url: &str,
    links: &[Link],
    layout: &OutputLayout,
    payload_extension: &str,
) -> RunSummary {
    let mut summary = RunSummary {
        links_found: links.len(),
        ..RunSummary::default()
    };

    for link in links {
        tracing::info!("Processing {}", link);

        match process_link(client, link, page_url, layout, payload_extension).await {
            Ok(report) => {
                tracing::debug!(
                    "{} payloads from {}",
                    report.extracted.len(),
                    report.archive.display()
                );
                summary.archives_processed += 1;
                summary.extracted.extend(report.extracted);
            }
            Err(e) if e.is_illegal_path() => {
                tracing::error!("Extraction of {} aborted: {}", link.url, e);
                summary.archives_failed += 1;
            }
            Err(e) => {
                tracing::error!("Skipping {}: {}", link.url, e);
                summary.archives_failed += 1;
            }
        }
    }

    summary
}
