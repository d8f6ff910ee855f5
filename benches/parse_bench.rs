//! Benchmarks for parse throughput and dotted-path lookup.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vconfig::config::Config;
use vconfig::parser::parse;

/// Build a buffer with `sections` sections of `options` options each,
/// every section holding one nested subsection.
fn build_source(sections: usize, options: usize) -> String {
    let mut source = String::from("# generated\nroot_flag = yes\n");
    for s in 0..sections {
        source.push_str(&format!("[section_{s}]\n"));
        for o in 0..options {
            match o % 4 {
                0 => source.push_str(&format!("int_{o} = {}\n", o * 7)),
                1 => source.push_str(&format!("float_{o} = {}.5\n", o)),
                2 => source.push_str(&format!("str_{o} = \"value {o}\"\n")),
                _ => source.push_str(&format!("bool_{o} = no # trailing\n")),
            }
        }
        source.push_str("[nested]\ndepth = 2\n[/nested]\n");
        source.push_str(&format!("[/section_{s}]\n"));
    }
    source
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for sections in [10, 100, 1_000] {
        let source = build_source(sections, 20);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("sections", sections), &source, |b, src| {
            b.iter(|| {
                let root = parse(black_box(src.as_bytes())).unwrap();
                black_box(root.len())
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let config = Config::from_buffer(build_source(100, 20).as_bytes()).unwrap();
    let mut group = c.benchmark_group("lookup");

    group.bench_function("top_level", |b| {
        b.iter(|| black_box(config.get_bool(black_box("root_flag"))));
    });
    group.bench_function("one_dot", |b| {
        b.iter(|| black_box(config.get_int(black_box("section_50.int_8"))));
    });
    group.bench_function("two_dots", |b| {
        b.iter(|| black_box(config.get_int(black_box("section_99.nested.depth"))));
    });
    group.bench_function("missing", |b| {
        b.iter(|| black_box(config.get_value(black_box("section_50.absent"))));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_lookup);
criterion_main!(benches);
