use search_core::{QueryEngine, Tokenizer};
use search_pages::{html_files, Site};
use std::fs;
use tempfile::tempdir;

fn write_site(dir: &std::path::Path) {
    fs::write(
        dir.join("input.txt"),
        "// file url\nb_cloud.html https://sec.example/cloud/\na_malware.html https://sec.example/malware\n",
    )
    .unwrap();
    fs::write(
        dir.join("a_malware.html"),
        r#"<html><head><title>Malware</title></head><body>
        <p>Malware detection and malware removal.</p>
        <a href="tools.html">tools</a><a href="../cloud/">overview</a></body></html>"#,
    )
    .unwrap();
    fs::write(
        dir.join("b_cloud.html"),
        "<html><body><p>Cloud security threats</p><a href=\"index.html\">home</a></body></html>",
    )
    .unwrap();
    fs::write(dir.join("c_plain.htm"), "<p>cloud detection</p>").unwrap();
    fs::write(dir.join("notes.txt"), "malware malware malware").unwrap();
}

#[test]
fn lists_only_html_files_sorted() {
    let dir = tempdir().unwrap();
    write_site(dir.path());
    fs::create_dir(dir.path().join("nested.html")).unwrap();
    let names: Vec<String> = html_files(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a_malware.html", "b_cloud.html", "c_plain.htm"]);
}

#[test]
fn loads_pages_with_urls_and_links() {
    let dir = tempdir().unwrap();
    write_site(dir.path());
    let site = Site::load(dir.path()).unwrap();
    assert_eq!(site.pages.len(), 3);
    assert_eq!(site.url("b_cloud.html"), Some("https://sec.example/cloud/"));
    assert_eq!(site.url("c_plain.htm"), None);

    let links = site.links("a_malware.html").unwrap();
    assert!(links.contains("https://sec.example/tools.html"));
    assert!(links.contains("https://sec.example/cloud/"));
    assert!(site.links("b_cloud.html").unwrap().contains("https://sec.example/cloud/index.html"));
    assert_eq!(site.total_links(), 3);
}

#[test]
fn builds_a_searchable_index() {
    let dir = tempdir().unwrap();
    write_site(dir.path());
    let site = Site::load(dir.path()).unwrap();
    let index = site.build_index(Tokenizer::default()).unwrap();
    assert_eq!(index.num_docs(), 3);

    let out = QueryEngine::new(&index).search("malware detection");
    assert_eq!(out.hits.len(), 1);
    assert_eq!(out.hits[0].external_id, "a_malware.html");

    let out = QueryEngine::new(&index).search("cloud");
    let ids: Vec<&str> = out.hits.iter().map(|h| h.external_id.as_str()).collect();
    assert_eq!(ids, vec!["c_plain.htm", "b_cloud.html"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(Site::load(dir.path().join("nope")).is_err());
}

#[test]
fn empty_directory_loads_no_pages() {
    let dir = tempdir().unwrap();
    let site = Site::load(dir.path()).unwrap();
    assert!(site.pages.is_empty());
    assert_eq!(site.build_index(Tokenizer::default()).unwrap().num_docs(), 0);
}
