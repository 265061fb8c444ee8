use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{IndexBuilder, QueryEngine, Tokenizer};

const SAMPLE: &str = "Network security protects the integrity of data. A firewall filters traffic, \
    intrusion detection systems flag anomalies, and incident response teams contain malware \
    outbreaks before they spread across the cloud.";

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let text = SAMPLE.repeat(200);
    c.bench_function("tokenize_sample", |b| b.iter(|| tokenizer.tokenize(&text)));
}

fn bench_search(c: &mut Criterion) {
    let mut builder = IndexBuilder::new(Tokenizer::default());
    for i in 0..500 {
        let text = format!("{SAMPLE} doc{i} {}", if i % 3 == 0 { "encryption" } else { "" });
        builder.add_text(&format!("page{i}.html"), &text).expect("unique ids");
    }
    let index = builder.finish();
    let engine = QueryEngine::new(&index);
    c.bench_function("search_two_terms", |b| b.iter(|| engine.search("encryption firewall")));
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
