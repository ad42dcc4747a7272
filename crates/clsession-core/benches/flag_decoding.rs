//! Benchmarks for bitmask decoding and attribute formatting.
//!
//! Verbose selection formats every registered attribute of every device,
//! so decoding and formatting sit on the reporting path.

use clsession_core::query::{
    decode_flags,
    flags::{DEVICE_TYPE_FLAGS, FP_CONFIG_FLAGS, QUEUE_PROPERTY_FLAGS},
    keys,
    params::find_param,
    ParamValue,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_decode_flags(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_flags");

    for (name, raw, table) in [
        ("fp_config", 0x3fu64, FP_CONFIG_FLAGS),
        ("fp_config_residual", 0x1_00ffu64, FP_CONFIG_FLAGS),
        ("device_type", 0x4u64, DEVICE_TYPE_FLAGS),
        ("queue_properties", 0x3u64, QUEUE_PROPERTY_FLAGS),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, &raw| {
            b.iter(|| decode_flags(black_box(raw), table));
        });
    }

    group.finish();
}

fn bench_format_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_value");

    let fp = ParamValue::Flags {
        raw: 0xbf,
        table: FP_CONFIG_FLAGS,
    };
    group.bench_function("flags", |b| b.iter(|| black_box(&fp).to_string()));

    let sizes = find_param(keys::DEVICE_MAX_WORK_ITEM_SIZES).map(|spec| spec.kind);
    if let Some(kind) = sizes {
        let raw: Vec<u8> = [1024usize, 1024, 64]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        group.bench_function("work_item_sizes", |b| {
            b.iter(|| kind.decode(black_box(&raw)).map(|v| v.to_string()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode_flags, bench_format_values);
criterion_main!(benches);
