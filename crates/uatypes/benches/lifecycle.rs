// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_precision_loss)] // Stats/metrics need this
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::semicolon_if_nothing_returned)] // Benchmark code formatting

//! Lifecycle engine benchmarks
//!
//! Copy and delete of a nested structure, array copies of growing size,
//! and NumericRange parse / range copy.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::sync::Arc;
use uatypes::{
    ArrayValue, BuiltinKind, DataType, DataTypeBuilder, DataTypeRegistry, Engine, MemberValue,
    NodeId, NumericRange, Structure, Value, Variant,
};

fn setup() -> (Engine, Arc<DataType>) {
    let mut reg = DataTypeRegistry::builder();
    let double = reg.builtin(BuiltinKind::Double);
    let string = reg.builtin(BuiltinKind::String);
    let node_id = reg.builtin(BuiltinKind::NodeId);
    let sample = reg
        .add_custom(
            DataTypeBuilder::structure("Sample", NodeId::numeric(1, 1))
                .member("source", &node_id)
                .member("unit", &string)
                .array_member("values", &double)
                .build(),
        )
        .unwrap();
    let batch = reg
        .add_custom(
            DataTypeBuilder::structure("Batch", NodeId::numeric(1, 2))
                .member("name", &string)
                .array_member("samples", &sample)
                .build(),
        )
        .unwrap();
    (Engine::new(Arc::new(reg.build())), batch)
}

fn batch(samples: usize) -> Value {
    let items = (0..samples)
        .map(|i| {
            Value::Structure(Structure::new(vec![
                MemberValue::Scalar(Value::NodeId(NodeId::string(2, format!("sensor-{}", i)))),
                MemberValue::Scalar(Value::from("degC")),
                MemberValue::Array(ArrayValue::from_vec(
                    (0..16).map(|v| Value::Double(v as f64)).collect(),
                )),
            ]))
        })
        .collect();
    Value::Structure(Structure::new(vec![
        MemberValue::Scalar(Value::from("line-1")),
        MemberValue::Array(ArrayValue::from_vec(items)),
    ]))
}

// ============================================================================
// Structure lifecycle
// ============================================================================

fn bench_structure_copy(c: &mut Criterion) {
    let (engine, ty) = setup();
    let mut group = c.benchmark_group("structure_copy");
    for samples in [1usize, 16, 128] {
        let src = batch(samples);
        group.bench_with_input(BenchmarkId::from_parameter(samples), &src, |b, src| {
            b.iter_batched(
                || engine.default_value(&ty),
                |mut dst| {
                    engine.copy(black_box(src), &mut dst, &ty).unwrap();
                    dst
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_structure_delete(c: &mut Criterion) {
    let (engine, ty) = setup();
    let src = batch(16);
    c.bench_function("structure_delete_16", |b| {
        b.iter_batched(
            || engine.duplicate(&src, &ty).unwrap(),
            |value| engine.delete(black_box(value), &ty),
            BatchSize::SmallInput,
        )
    });
}

// ============================================================================
// Arrays and ranges
// ============================================================================

fn bench_array_copy(c: &mut Criterion) {
    let (engine, _) = setup();
    let double = Arc::clone(engine.registry().builtin_type(BuiltinKind::Double));
    let mut group = c.benchmark_group("array_copy_double");
    for len in [16usize, 1024, 65_536] {
        let src: Vec<Value> = (0..len).map(|v| Value::Double(v as f64)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &src, |b, src| {
            b.iter(|| engine.array_copy(black_box(src), &double).unwrap())
        });
    }
    group.finish();
}

fn bench_range_parse(c: &mut Criterion) {
    c.bench_function("range_parse_3d", |b| {
        b.iter(|| black_box("1:2,0:3,5").parse::<NumericRange>().unwrap())
    });
}

fn bench_range_copy(c: &mut Criterion) {
    let (engine, _) = setup();
    let int32 = Arc::clone(engine.registry().builtin_type(BuiltinKind::Int32));
    let items: Vec<Value> = (0..10_000).map(Value::Int32).collect();
    let mut matrix = Variant::new();
    matrix.set_array_copy(&engine, &items, int32).unwrap();
    matrix.set_array_dimensions(&engine, &[100, 100]).unwrap();
    let range: NumericRange = "10:59,20:79".parse().unwrap();

    c.bench_function("range_copy_50x60", |b| {
        b.iter(|| matrix.copy_range(&engine, black_box(&range)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_structure_copy,
    bench_structure_delete,
    bench_array_copy,
    bench_range_parse,
    bench_range_copy
);
criterion_main!(benches);
