use search_core::{InvertedIndex, SearchOutcome};
use search_pages::Site;
use std::io::{self, Write};

const RULE: &str = "============================================================";

pub fn write_stats<W: Write>(w: &mut W, site: &Site, index: &InvertedIndex) -> io::Result<()> {
    writeln!(w, "\n{RULE}")?;
    writeln!(w, "Search Engine Statistics")?;
    writeln!(w, "{RULE}")?;
    writeln!(w, "Total Documents: {}", index.num_docs())?;
    writeln!(w, "Vocabulary Size: {} unique terms", index.vocabulary_size())?;
    writeln!(w, "Total Hyperlinks: {}", site.total_links())?;
    writeln!(w, "\nTop 10 Most Common Terms:")?;
    for (i, (term, count)) in index.top_terms(10).into_iter().enumerate() {
        writeln!(w, "  {}. '{}' appears in {} document(s)", i + 1, term, count)?;
    }
    writeln!(w, "{RULE}\n")
}

pub fn write_outcome<W: Write>(w: &mut W, site: &Site, outcome: &SearchOutcome) -> io::Result<()> {
    if !outcome.terms.is_empty() {
        writeln!(w, "\nSearch terms (after filtering): {:?}", outcome.terms)?;
        for tp in &outcome.term_postings {
            if tp.doc_count == 0 {
                writeln!(w, "  '{}' -> NOT FOUND in any document", tp.term)?;
            } else {
                writeln!(w, "  '{}' -> found in {} documents", tp.term, tp.doc_count)?;
            }
        }
    }
    if let Some(diag) = &outcome.diagnostic {
        writeln!(w, "! {diag}")?;
    }

    if outcome.hits.is_empty() {
        return writeln!(w, "\nNo results to display.");
    }

    writeln!(w, "\n{RULE}")?;
    writeln!(w, "Found {} matching document(s)", outcome.hits.len())?;
    writeln!(w, "{RULE}\n")?;
    for (i, hit) in outcome.hits.iter().enumerate() {
        let url = site.url(&hit.external_id).unwrap_or("URL not available");
        writeln!(w, "{}. {}", i + 1, hit.external_id)?;
        writeln!(w, "   Relevance Score (TF-IDF): {:.6}", hit.score)?;
        writeln!(w, "   URL: {url}")?;
        let links = site.links(&hit.external_id).map(|l| l.len()).unwrap_or(0);
        if links > 0 {
            writeln!(w, "   Links: {links} outgoing hyperlink(s)")?;
        }
        writeln!(w)?;
    }
    writeln!(w, "{RULE}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_core::{QueryEngine, Tokenizer};
    use search_pages::parse_page;

    fn site() -> Site {
        let mut site = Site::default();
        site.url_map.insert("a.html".into(), "https://sec.example/a".into());
        site.pages.push(parse_page(
            "a.html",
            "<p>firewall rules firewall</p><a href='b.html'>next</a>",
            Some("https://sec.example/a"),
        ));
        site.pages.push(parse_page("b.html", "<p>firewall audit</p>", None));
        site.pages.push(parse_page("c.html", "<p>audit logs</p>", None));
        site
    }

    fn render(site: &Site, query: &str) -> String {
        let index = site.build_index(Tokenizer::default()).unwrap();
        let outcome = QueryEngine::new(&index).search(query);
        let mut buf = Vec::new();
        write_outcome(&mut buf, site, &outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_ranked_hits_with_urls_and_links() {
        let s = site();
        let out = render(&s, "firewall");
        assert!(out.contains("Found 2 matching document(s)"));
        assert!(out.contains("1. a.html"));
        assert!(out.contains("   URL: https://sec.example/a"));
        assert!(out.contains("   Links: 1 outgoing hyperlink(s)"));
        assert!(out.contains("2. b.html"));
        assert!(out.contains("   URL: URL not available"));
        assert!(out.contains("'firewall' -> found in 2 documents"));
    }

    #[test]
    fn renders_diagnostics() {
        let s = site();
        let out = render(&s, "");
        assert!(out.contains("Empty query"));
        assert!(out.contains("No results to display."));

        let out = render(&s, "firewall xyzabc123notfound");
        assert!(out.contains("'xyzabc123notfound' -> NOT FOUND in any document"));
        assert!(out.contains("No results to display."));
    }

    #[test]
    fn renders_stats() {
        let s = site();
        let index = s.build_index(Tokenizer::default()).unwrap();
        let mut buf = Vec::new();
        write_stats(&mut buf, &s, &index).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Total Documents: 3"));
        assert!(out.contains("Total Hyperlinks: 1"));
        assert!(out.contains("1. 'audit' appears in 2 document(s)"));
        assert!(out.contains("2. 'firewall' appears in 2 document(s)"));
    }
}
