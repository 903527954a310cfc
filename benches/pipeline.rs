//! Benchmarks for the non-rendering hot path: initials extraction, both
//! hash strategies, and text → color mapping.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use initicon::color::color_from_text;
use initicon::hash::{Fnv1a, Murmur3, TextHasher};
use initicon::initials_for;

fn bench_initials(c: &mut Criterion) {
    c.bench_function("initials_two_tokens", |b| {
        b.iter(|| initials_for(black_box("Grace Brewster Murray Hopper")))
    });
    c.bench_function("initials_dirty_tokens", |b| {
        b.iter(|| initials_for(black_box("  Dr. O'Brien-Smith, Jr.  ")))
    });
}

fn bench_hashers(c: &mut Criterion) {
    let text = "Grace Brewster Murray Hopper";
    c.bench_function("hash_fnv1a", |b| {
        b.iter(|| Fnv1a.hash(black_box(text)))
    });
    let murmur = Murmur3::new(0x9747_b28c);
    c.bench_function("hash_murmur3", |b| {
        b.iter(|| murmur.hash(black_box(text)))
    });
}

fn bench_color(c: &mut Criterion) {
    c.bench_function("color_from_text", |b| {
        b.iter(|| color_from_text(black_box("Grace Hopper"), 0.65, 0.45, &Fnv1a))
    });
}

criterion_group!(benches, bench_initials, bench_hashers, bench_color);
criterion_main!(benches);
