mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_core::{InvertedIndex, QueryEngine, StopwordSource, Tokenizer};
use search_pages::Site;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Regression queries run by `search test`.
const TEST_QUERIES: &[&str] = &[
    "",
    "the and is are",
    "xyzabc123notfound",
    "security",
    "encryption",
    "malware",
    "cloud",
    "cloud security",
    "network attack",
    "encryption cryptography",
    "malware detection",
    "incident response",
    "security threats protection",
    "firewall intrusion detection",
    "cybersecurity best practices",
];

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Index a directory of web pages and answer TF-IDF ranked AND queries", long_about = None)]
struct Cli {
    /// Directory holding the HTML pages and input.txt
    #[arg(long, global = true, default_value = "webpages")]
    webpages: PathBuf,
    /// Stopword list: builtin, english, or a path to a word list
    #[arg(long, global = true, default_value = "builtin")]
    stopwords: StopwordSource,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read queries from stdin until `exit` (default)
    Interactive,
    /// Run the regression query list and write the report to a file
    Test {
        #[arg(long, default_value = "output.txt")]
        output: PathBuf,
    },
    /// Run one query and print the results
    Query {
        query: String,
        /// Print the raw search outcome as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print index statistics
    Stats,
}

struct Engine {
    site: Site,
    index: InvertedIndex,
}

impl Engine {
    fn load(webpages: &Path, stopwords: &StopwordSource) -> Result<Self> {
        let stopwords = stopwords.load().with_context(|| format!("loading stopwords from {stopwords}"))?;
        let site = Site::load(webpages)?;
        let index = site.build_index(Tokenizer::new(stopwords))?;
        Ok(Self { site, index })
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let engine = Engine::load(&cli.webpages, &cli.stopwords)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let mut out = io::stdout().lock();
            run_interactive(&engine, io::stdin().lock(), &mut out)
        }
        Commands::Test { output } => run_tests(&engine, &output),
        Commands::Query { query, json } => run_query(&engine, &query, json),
        Commands::Stats => {
            let mut out = io::stdout().lock();
            report::write_stats(&mut out, &engine.site, &engine.index)?;
            Ok(())
        }
    }
}

fn run_query(engine: &Engine, query: &str, json: bool) -> Result<()> {
    let outcome = QueryEngine::new(&engine.index).search(query);
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &outcome)?;
        writeln!(out)?;
    } else {
        report::write_outcome(&mut out, &engine.site, &outcome)?;
    }
    Ok(())
}

/// Answer queries line by line until `exit`/`quit` or end of input.
fn run_interactive<R: BufRead, W: Write>(engine: &Engine, input: R, out: &mut W) -> Result<()> {
    let queries = QueryEngine::new(&engine.index);

    report::write_stats(out, &engine.site, &engine.index)?;
    writeln!(out, "Mini Search Engine - Interactive Mode")?;
    writeln!(out, "Type 'exit' or 'quit' to quit")?;
    writeln!(out, "Type 'stats' to see statistics\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, "Enter search query: ")?;
        out.flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let query = line.trim();
        match query.to_lowercase().as_str() {
            "exit" | "quit" => break,
            "stats" => report::write_stats(out, &engine.site, &engine.index)?,
            _ => {
                let outcome = queries.search(query);
                report::write_outcome(out, &engine.site, &outcome)?;
            }
        }
    }
    writeln!(out, "\nExiting search engine. Goodbye!")?;
    Ok(())
}

fn run_tests(engine: &Engine, output: &Path) -> Result<()> {
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let mut out = BufWriter::new(file);
    write_test_report(&mut out, engine)?;
    out.flush()?;
    let generated = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    tracing::info!(output = %output.display(), %generated, "test output saved");
    Ok(())
}

fn write_test_report<W: Write>(out: &mut W, engine: &Engine) -> Result<()> {
    let rule = "=".repeat(60);
    let thin = "-".repeat(60);

    writeln!(out, "{rule}\nSEARCH ENGINE - TEST OUTPUT\n{rule}")?;
    writeln!(out, "Total Documents Indexed: {}", engine.index.num_docs())?;
    writeln!(out, "Vocabulary Size: {} unique terms", engine.index.vocabulary_size())?;
    writeln!(out, "{rule}\n")?;

    let queries = QueryEngine::new(&engine.index);
    for (i, query) in TEST_QUERIES.iter().enumerate() {
        writeln!(out, "\n{thin}\nTEST CASE {}: Query = '{}'\n{thin}", i + 1, query)?;
        let outcome = queries.search(query);
        report::write_outcome(out, &engine.site, &outcome)?;
    }

    writeln!(out, "\n{rule}\nEND OF TEST OUTPUT\n{rule}")?;
    Ok(())
}
