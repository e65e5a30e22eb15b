// src/scan/mod.rs
// =============================================================================
// This module reads the documentation tree from disk.
//
// - files: recursive discovery of Markdown files and link collection
// - endpoints: endpoint candidates from the registry page's code fences
// =============================================================================

mod endpoints;
mod files;

pub use endpoints::load_endpoints;
pub use files::{collect_links, find_markdown_files};
