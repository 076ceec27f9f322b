use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dat2csv::models::VariableKey;
use dat2csv::processors::{MergeStore, YearSequencer};
use dat2csv::readers::DatReader;
use std::path::PathBuf;

// Synthetic DAT content: `mesh_count` blocks of 31-day months
fn create_dat_content(mesh_count: usize, raw: i32) -> String {
    let mut content = String::from("BENCHMARK\n");
    for mesh in 0..mesh_count {
        content.push_str(&format!("{:08}  35 100  20  30   5  45\n", 53390000 + mesh));
        for month in 1..=12u32 {
            let days = match month {
                2 => 28,
                4 | 6 | 9 | 11 => 30,
                _ => 31,
            };
            content.push_str(&format!("  {:>2}", month));
            for day in 0..days {
                content.push_str(&format!("{:>3}", (raw + day) % 1000));
            }
            content.push('\n');
        }
    }
    content
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_content");
    let reader = DatReader::new();

    for mesh_count in [10, 100, 1000] {
        let content = create_dat_content(mesh_count, 480);
        group.bench_with_input(
            BenchmarkId::new("meshes", mesh_count),
            &content,
            |b, content| {
                b.iter(|| {
                    let mut store = MergeStore::new();
                    reader
                        .parse_content(
                            black_box(content),
                            VariableKey::MeanTemperature,
                            2001,
                            &mut store,
                            "bench",
                        )
                        .unwrap();
                    store
                })
            },
        );
    }

    group.finish();
}

fn benchmark_merge_variables(c: &mut Criterion) {
    let reader = DatReader::new();
    let content = create_dat_content(200, 120);

    c.bench_function("merge_six_variables", |b| {
        b.iter(|| {
            let mut store = MergeStore::new();
            for key in VariableKey::ALL {
                reader
                    .parse_content(black_box(&content), key, 2001, &mut store, "bench")
                    .unwrap();
            }
            store
        })
    });
}

fn benchmark_year_sequencing(c: &mut Criterion) {
    let sequencer = YearSequencer::new();
    let files: Vec<PathBuf> = (0..100)
        .flat_map(|yy| {
            VariableKey::ALL
                .iter()
                .map(move |key| PathBuf::from(format!("MS{}20{:02}.dat", key.code(), yy)))
        })
        .collect();

    c.bench_function("year_tokens", |b| {
        b.iter(|| sequencer.year_tokens(black_box(&files)))
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_merge_variables,
    benchmark_year_sequencing
);
criterion_main!(benches);
