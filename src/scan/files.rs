// src/scan/files.rs
// =============================================================================
// Discovers documentation files and collects the links they contain.
//
// How it works:
// 1. Walk the docs root recursively with walkdir, sorted by file name so
//    every run sees the files in the same order
// 2. Prune hidden directories (.vuepress, .git, ...) without descending
// 3. Keep regular files whose extension is in the configured list
// 4. Read each file and run the Markdown extractor over it. Bytes that are
//    not valid UTF-8 are replaced, so one stray encoding never stops a scan
//
// Any walk or read error aborts the run: a half-scanned tree would report a
// misleadingly clean result.
// =============================================================================

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::checker::{extract_markdown_links, CheckTarget};

// Finds every documentation file below `root`
//
// Returns: paths in walk order (directories first by name, then their files)
pub fn find_markdown_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden_dir(entry));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = files.len(), "discovered documentation files");
    Ok(files)
}

// Hidden directories are skipped; the root itself is always walked even if
// its own name starts with a dot
fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Path of `file` relative to `root`, with `/` separators on every platform
pub fn relative_source(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// Reads every file and extracts its links, in file order
//
// Returns: all link targets, not yet de-duplicated across files
pub fn collect_links(root: &Path, files: &[PathBuf]) -> Result<Vec<CheckTarget>> {
    let mut all_links = Vec::new();

    for file in files {
        let bytes =
            std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        let source = relative_source(root, file);
        let links = extract_markdown_links(&content, &source);
        debug!(file = %source, links = links.len(), "extracted links");
        all_links.extend(links);
    }

    Ok(all_links)
}
