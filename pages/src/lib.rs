//! Loads a directory of HTML pages and feeds their text to the index.

pub mod mapping;
pub mod page;

use anyhow::{bail, Result};
use search_core::{IndexBuilder, InvertedIndex, Tokenizer};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use mapping::{load_url_mapping, parse_url_mapping};
pub use page::{parse_page, Page};

/// Name of the url mapping file inside the webpages directory.
pub const MAPPING_FILE: &str = "input.txt";

/// `.html`/`.htm` files directly inside `dir`, sorted by name.
pub fn html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
            if matches!(ext, "html" | "htm") {
                files.push(p.to_path_buf());
            }
        }
    }
    Ok(files)
}

/// Every page of a webpages directory plus its url mapping.
#[derive(Debug, Default)]
pub struct Site {
    pub root: PathBuf,
    pub url_map: HashMap<String, String>,
    pub pages: Vec<Page>,
}

impl Site {
    /// Read and parse every HTML file in `dir`. Unreadable files are logged and skipped.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        if !root.is_dir() {
            bail!("webpages directory '{}' not found", root.display());
        }
        let url_map = load_url_mapping(&root.join(MAPPING_FILE))?;

        let files = html_files(&root)?;
        if files.is_empty() {
            tracing::warn!(dir = %root.display(), "no html files found");
        }

        let mut pages = Vec::with_capacity(files.len());
        for path in files {
            let file_name = match path.file_name().and_then(|s| s.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };
            match fs::read_to_string(&path) {
                Ok(html) => {
                    let url = url_map.get(&file_name).map(String::as_str);
                    pages.push(parse_page(&file_name, &html, url));
                }
                Err(e) => tracing::warn!(file = %path.display(), error = %e, "skipping unreadable page"),
            }
        }
        Ok(Self { root, url_map, pages })
    }

    /// Index every page in name order.
    pub fn build_index(&self, tokenizer: Tokenizer) -> Result<InvertedIndex> {
        let mut builder = IndexBuilder::new(tokenizer);
        for page in &self.pages {
            let doc_id = builder.add_text(&page.file_name, &page.text)?;
            let unique_terms = builder.doc(doc_id).map(|d| d.term_counts.len()).unwrap_or(0);
            tracing::info!(file = %page.file_name, unique_terms, links = page.links.len(), "indexed");
        }
        let index = builder.finish();
        tracing::info!(
            num_docs = index.num_docs(),
            num_terms = index.vocabulary_size(),
            links = self.total_links(),
            "indexing complete"
        );
        Ok(index)
    }

    pub fn page(&self, file_name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.file_name == file_name)
    }

    pub fn url(&self, file_name: &str) -> Option<&str> {
        self.url_map.get(file_name).map(String::as_str)
    }

    pub fn links(&self, file_name: &str) -> Option<&BTreeSet<String>> {
        self.page(file_name).map(|p| &p.links)
    }

    pub fn total_links(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }
}
