use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ortho_describe_rs::ortho_pipeline::CsvTelemetryAggregator;

const HEADER: &str = "SourceFile,GPS Altitude,Relative Altitude,Camera Model Name,Drone Model,Create Date,UTC At Exposure,Gps Status\n";

fn generate_telemetry_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from(HEADER);
    for i in 0..rows {
        let second = i % 60;
        let minute = (i / 60) % 60;
        csv.push_str(&format!(
            "IMG_{i:04}_1.TIF,{:.3},+{:.3},M3M,Mavic 3M,2023:06:01 10:{minute:02}:{second:02},2023:06:01 08:{minute:02}:{second:02}.{:03},{}\n",
            120.0 + (i % 17) as f64 * 0.25,
            80.0 + (i % 11) as f64 * 0.1,
            i % 1000,
            if i % 9 == 0 { "V" } else { "A" },
        ));
    }
    csv.into_bytes()
}

fn benchmark_aggregate_by_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_by_rows");

    for rows in [100, 1_000, 10_000] {
        let data = generate_telemetry_csv(rows);

        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            b.iter(|| {
                let _ = CsvTelemetryAggregator.aggregate_reader(black_box(data.as_slice()));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_aggregate_by_rows);
criterion_main!(benches);
