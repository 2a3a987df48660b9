#[macro_use]
extern crate criterion;

use awcodec::prelude::*;
use criterion::{black_box, Criterion};
use serde_json::json;

fn sample() -> (Value, serde_json::Value) {
    let items: Vec<i32> = (0..64).collect();
    let v = Value::Object(
        vec![
            ("name".to_string(), Value::from("transformer")),
            ("rating".to_string(), Value::from(2.5f32)),
            ("live".to_string(), Value::from(true)),
            ("items".to_string(), Value::from(items.clone())),
        ]
        .into(),
    );
    let j = json!({"name": "transformer", "rating": 2.5, "live": true, "items": items});
    (v, j)
}

fn awb_encode(c: &mut Criterion) {
    c.bench_function("AWB object encode", |b| {
        let (v, _) = sample();
        b.iter(|| awb::encode_full(black_box(&v)))
    });
}

fn json_encode(c: &mut Criterion) {
    c.bench_function("JSON object encode", |b| {
        let (_, j) = sample();
        b.iter(|| serde_json::to_vec(black_box(&j)))
    });
}

fn awb_decode(c: &mut Criterion) {
    c.bench_function("AWB object decode", |b| {
        let enc = awb::encode_full(&sample().0).unwrap();
        b.iter(|| awb::decode(black_box(&enc)))
    });
}

fn json_decode(c: &mut Criterion) {
    c.bench_function("JSON object decode", |b| {
        let enc = serde_json::to_vec(&sample().1).unwrap_or_default();
        b.iter(|| serde_json::from_slice::<serde_json::Value>(black_box(&enc)))
    });
}

fn wstring_ser(c: &mut Criterion) {
    c.bench_function("Wstring ser", |b| {
        let s: String = std::iter::repeat("grid ").take(2_000).collect();
        b.iter(|| {
            let mut out = Vec::<u8>::with_capacity(20_016);
            out.put_wstring(black_box(&s));
            out
        })
    });
}

criterion_group!(
    benches,
    awb_encode,
    json_encode,
    awb_decode,
    json_decode,
    wstring_ser,
);

criterion_main!(benches);
