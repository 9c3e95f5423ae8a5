//! Run statistics

use std::path::PathBuf;

/// Summary of one grabber run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Valid archive links found on the seed page
    pub links_found: usize,

    /// Archives downloaded and unpacked without error
    pub archives_processed: usize,

    /// Links abandoned because of a download, archive, or path error
    pub archives_failed: usize,

    /// Payload files written to the output folder
    pub extracted: Vec<PathBuf>,
}

impl RunSummary {
    pub fn files_extracted(&self) -> usize {
        self.extracted.len()
    }

    /// Fraction of links that were processed successfully, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.links_found == 0 {
            return 0.0;
        }
        (self.archives_processed as f64 / self.links_found as f64) * 100.0
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Grabber Summary ===\n");

    println!("Links found: {}", summary.links_found);
    println!(
        "Archives processed: {} ({:.1}%)",
        summary.archives_processed,
        summary.success_rate()
    );
    println!("Archives failed: {}", summary.archives_failed);
    println!();

    println!("Payloads extracted ({}):", summary.files_extracted());
    for path in &summary.extracted {
        println!("  - {}", path.display());
    }
}
