//! URL and naming helpers
//!
//! Small string utilities used when turning a discovered link into a local
//! file: the archive's filename, a directory name derived from it, and the
//! absolute URL a site-relative link points at.

mod naming;
mod resolve;

pub use naming::{directory_name_from_filename, filename_from_url};
pub use resolve::resolve_link_url;
