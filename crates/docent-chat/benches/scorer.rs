use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use docent_chat::scorer;
use docent_kb::{Chunk, ChunkKind};

fn generate_chunks(count: usize) -> Vec<Chunk> {
    (0..count)
        .map(|i| Chunk {
            id: format!("doc:{i}"),
            document_id: "doc".to_owned(),
            ordinal: i,
            kind: ChunkKind::Qa,
            question: Some(format!("What happens during session {i} of the weekend?")),
            answer: format!(
                "Session {i} covers the schedule from the morning coffee hour through \
                 the evening program, with campus tours and class gatherings between."
            ),
            context: None,
            category: "Activities".to_owned(),
            keywords: vec!["schedule".to_owned(), "session".to_owned(), format!("day{i}")],
            source_ref: None,
            active: true,
            embedding: None,
        })
        .collect()
}

fn scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    for count in [10, 100, 500] {
        let chunks = generate_chunks(count);
        group.bench_with_input(BenchmarkId::new("chunks", count), &count, |b, _| {
            b.iter(|| scorer::score(black_box("when is the schedule for saturday"), &chunks));
        });
    }

    group.finish();
}

criterion_group!(benches, scoring);
criterion_main!(benches);
