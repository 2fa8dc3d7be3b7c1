use criterion::{criterion_group, criterion_main, Criterion};
use esregex::{Regex, StepLimit};
use std::hint::black_box;

fn compile_benchmark(c: &mut Criterion) {
    c.bench_function("compile", |b| {
        b.iter(|| Regex::new(black_box(r"(\d{1,2})/(\d{1,2})/(\d{4})")).unwrap())
    });

    c.bench_function("compile unicode sets", |b| {
        b.iter(|| Regex::with_flags(black_box(r"[\p{L}--[a-z]]+|[\q{abc|de}]"), "v").unwrap())
    });
}

fn match_benchmark(c: &mut Criterion) {
    let re = Regex::new(r"\d+").unwrap();
    c.bench_function("match", |b| b.iter(|| re.find(black_box("Price: $123"))));

    let re = Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap();
    c.bench_function("complex match", |b| {
        b.iter(|| re.find(black_box("Born on 12/25/1990 and graduated on 5/15/2012")))
    });

    let text = "lorem ipsum dolor sit amet ".repeat(200) + "needle";
    let re = Regex::new(r"needle").unwrap();
    c.bench_function("literal scan", |b| b.iter(|| re.find(black_box(&text))));

    let re = Regex::with_flags(r"\w+", "g").unwrap();
    c.bench_function("find all words", |b| {
        b.iter(|| re.find_iter(black_box(&text)).count())
    });

    let re = Regex::with_flags(r"(?<=\s)[aeiou]\w*(?!\w)", "i").unwrap();
    c.bench_function("lookarounds", |b| {
        b.iter(|| re.find_iter(black_box(&text)).count())
    });

    let units: Vec<u16> = "a".repeat(25).encode_utf16().collect();
    let re = Regex::new(r"(a*)*b").unwrap();
    c.bench_function("budget abort", |b| {
        b.iter(|| re.exec_with_budget(black_box(&units), 0, false, &mut StepLimit::new(100_000)))
    });
}

criterion_group!(benches, compile_benchmark, match_benchmark);
criterion_main!(benches);
