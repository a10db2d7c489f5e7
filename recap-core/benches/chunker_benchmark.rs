//! Benchmarks for sentence segmentation and chunking

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recap_core::{
    ByteTokenizer, ChunkerConfig, EnglishSegmenter, SentenceSegmenter, TokenChunker,
    UnicodeSegmenter,
};
use std::hint::black_box;

/// Generate test text of roughly `size_kb` kilobytes
fn generate_test_text(size_kb: usize) -> String {
    let base_text = "Dr. Smith reviewed the numbers. Revenue grew by 4.5 percent! \
                     Was that expected? The team thought so, etc. and moved on. ";
    let repetitions = (size_kb * 1024) / base_text.len() + 1;
    base_text.repeat(repetitions)
}

fn benchmark_segmenters(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    let text = generate_test_text(256);
    group.throughput(Throughput::Bytes(text.len() as u64));

    let english = EnglishSegmenter::new();
    group.bench_function("english", |b| {
        b.iter(|| english.segment(black_box(&text)).len());
    });

    group.bench_function("unicode", |b| {
        b.iter(|| UnicodeSegmenter.segment(black_box(&text)).len());
    });

    group.finish();
}

fn benchmark_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk");
    let tokenizer = ByteTokenizer;
    let segmenter = EnglishSegmenter::new();

    for size_kb in [16, 256] {
        let text = generate_test_text(size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));

        for max_tokens in [256, 1024] {
            let config = ChunkerConfig::with_max_tokens(max_tokens).unwrap();
            let chunker = TokenChunker::new(&tokenizer, &segmenter, config).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{size_kb}KB"), max_tokens),
                &text,
                |b, text| b.iter(|| chunker.chunk(black_box(text)).unwrap().chunks.len()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_segmenters, benchmark_chunker);
criterion_main!(benches);
