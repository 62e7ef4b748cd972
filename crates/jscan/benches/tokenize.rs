#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jscan::{Token, TokenStore, parse_slice};

/// A JSON array of `len` small objects, each with a handful of scalar
/// fields, roughly matching the shape of a typical logging/telemetry
/// record.
fn make_payload(len: usize) -> String {
    let mut s = String::from("[");
    for i in 0..len {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!(
            r#"{{"id":{i},"name":"item-{i}","active":true,"tags":["a","b"]}}"#
        ));
    }
    s.push(']');
    s
}

fn tokenize(payload: &[u8], storage: &mut [Token<'_>]) -> usize {
    let mut store = TokenStore::new(storage);
    parse_slice(payload.into(), &mut store).expect("payload is valid JSON")
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for &len in &[8usize, 64, 512] {
        let payload = make_payload(len);
        let mut storage = vec![Token::default(); len * 16 + 8];
        group.bench_with_input(BenchmarkId::from_parameter(len), &payload, |b, payload| {
            b.iter(|| black_box(tokenize(black_box(payload.as_bytes()), &mut storage)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
