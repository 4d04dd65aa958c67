use criterion::{criterion_group, criterion_main, Criterion};
use mave_hgvs::convert::{Config, Converter, Row};
use mave_hgvs::sequence::translate_cds;

lazy_static::lazy_static! {
    /// Repeated Met-Lys-Leu-Thr cassette, 1200 bases.
    static ref SEQ: String = "ATGAAACTGACA".repeat(100);

    static ref CONVERTER: Converter =
        Converter::new(&SEQ, Config::default()).expect("session should construct");
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("translate_cds 1200bp", |b| {
        b.iter(|| translate_cds(&SEQ, true, "*").unwrap())
    });

    let row = Row::SingleVariant("c.6A>G (p.=), c.12A>T (p.Thr4Ser), c.18G>A (p.=)".to_string());
    c.bench_function("parse_row mixed", |b| {
        b.iter(|| CONVERTER.parse_row(&row).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
