//! Pipeline performance benchmarks.
//!
//! Measures the core chain (parse, dedupe, normalize, guard, explain) and the
//! heuristic extractor across batch sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use labscribe::{HeuristicExtractor, LabPipeline, RawTestInput};

const TESTS: &[(&str, &str, &str)] = &[
    ("Hemoglobin", "g/dL", "(low)"),
    ("WBC", "/uL", "(high)"),
    ("Platelet", "/uL", ""),
    ("Glucose", "mg/dl", "(high)"),
    ("Creatinine", "mg/dL", ""),
    ("Sodium", "mmol/L", "(normal)"),
    ("TSH", "", ""),
];

/// Generate a batch of raw inputs with distinct values, plus some noise.
fn generate_inputs(count: usize) -> Vec<RawTestInput> {
    (0..count)
        .map(|i| {
            if i % 10 == 9 {
                return RawTestInput::from("noise line without a value");
            }
            let (name, unit, status) = TESTS[i % TESTS.len()];
            RawTestInput::from(format!("{} {}.{} {} {}", name, 1 + i / 10, i % 10, unit, status))
        })
        .collect()
}

/// Generate a free-text report with the given number of result lines.
fn generate_report(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("hemglobin {}.{} g/dl lo, platlet 1,{:03},000", 9 + i % 5, i % 10, i % 500))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_run_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_raw");
    let pipeline = LabPipeline::new();

    for count in [10, 100, 1_000].iter() {
        let inputs = generate_inputs(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("inputs", count), &inputs, |b, inputs| {
            b.iter(|| black_box(pipeline.run_raw(inputs)))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let pipeline = LabPipeline::new();

    for count in [10, 100, 1_000].iter() {
        let inputs = generate_inputs(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("inputs", count), &inputs, |b, inputs| {
            b.iter(|| black_box(pipeline.normalize(inputs)))
        });
    }

    group.finish();
}

fn bench_heuristic_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristic_extraction");
    let extractor = HeuristicExtractor::new();

    for lines in [10, 100, 500].iter() {
        let report = generate_report(*lines);

        group.throughput(Throughput::Bytes(report.len() as u64));
        group.bench_with_input(BenchmarkId::new("lines", lines), &report, |b, report| {
            b.iter(|| black_box(extractor.extract_text(report, 0.8)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_run_raw,
    bench_normalize,
    bench_heuristic_extraction,
);
criterion_main!(benches);
