use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Parse `<filename> <url>` lines. Blank lines, `//` comments and lines
/// without a separating space are ignored.
pub fn parse_url_mapping(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if let Some((file, url)) = line.split_once(' ') {
            map.insert(file.to_string(), url.trim().to_string());
        }
    }
    map
}

/// Load the mapping file; a missing file yields an empty map.
pub fn load_url_mapping(path: &Path) -> Result<HashMap<String, String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let map = parse_url_mapping(&text);
            tracing::info!(count = map.len(), path = %path.display(), "loaded url mappings");
            Ok(map)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "url mapping not found, urls will not be displayed");
            Ok(HashMap::new())
        }
        Err(e) => Err(e.into()),
    }
}
