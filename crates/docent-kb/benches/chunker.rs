use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use docent_kb::Chunker;
use docent_kb::keywords;

fn generate_faq_text(pairs: usize) -> String {
    let mut out = String::new();
    for i in 0..pairs {
        out.push_str(&format!(
            "Q{i}: What happens during session number {i} of the reunion weekend?\n\
             A{i}: Session {i} runs from the morning coffee hour through the evening \
             program, with meals, campus tours, and class gatherings in between.\n\n"
        ));
    }
    out
}

fn keyword_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword_extraction");

    for words in [50, 500, 5000] {
        let text = "registration housing entertainment schedule shuttle campus "
            .repeat(words / 6);
        group.bench_with_input(BenchmarkId::new("words", words), &words, |b, _| {
            b.iter(|| keywords::extract(black_box(&text), keywords::DEFAULT_MAX_TERMS));
        });
    }

    group.finish();
}

fn text_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_chunking");

    for pairs in [10, 100, 500] {
        let content = generate_faq_text(pairs);
        let chunker = Chunker::default();
        group.bench_with_input(BenchmarkId::new("qa_pairs", pairs), &pairs, |b, _| {
            b.iter(|| chunker.chunk("bench-doc", black_box(&content), "General", "text/plain"));
        });
    }

    group.finish();
}

criterion_group!(benches, keyword_extraction, text_chunking);
criterion_main!(benches);
