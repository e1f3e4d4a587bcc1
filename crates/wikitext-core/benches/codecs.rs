use criterion::{Criterion, criterion_group, criterion_main};
use wikitext_core::{EncodeMode, Fragment, link_type, percent_decode, percent_encode, url_cursor};

fn sample_text(size: usize) -> String {
    let base = "Meeting notes for café plans, see https://example.com/a b and mail bob@example.org.\n";
    base.repeat(size)
}

fn bench_percent(c: &mut Criterion) {
    let mut group = c.benchmark_group("percent");
    group.sample_size(10);

    let text = sample_text(100);
    let encoded = percent_encode(&text, EncodeMode::Data);
    group.bench_function("encode_data", |b| {
        b.iter(|| percent_encode(std::hint::black_box(&text), EncodeMode::Data));
    });
    group.bench_function("decode_data", |b| {
        b.iter(|| percent_decode(std::hint::black_box(&encoded), EncodeMode::Data));
    });

    group.finish();
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("links");
    group.sample_size(10);

    let links = [
        "https://example.com",
        "foo@bar.com",
        "../notes/today.txt",
        "wp?Rust",
        "Some:Page",
    ];
    group.bench_function("link_type", |b| {
        b.iter(|| {
            for link in links {
                std::hint::black_box(link_type(link));
            }
        });
    });

    let text = sample_text(100);
    group.bench_function("substitute_list_urls", |b| {
        b.iter(|| {
            let mut cursor = url_cursor();
            let out = cursor.substitute_list(
                |c| c.group(0).unwrap_or_default().len(),
                vec![Fragment::text(text.as_str())],
            );
            std::hint::black_box(out);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_percent, bench_links);
criterion_main!(benches);
