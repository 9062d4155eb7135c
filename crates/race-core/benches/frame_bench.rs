use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use race_core::{BarChartRace, RenderOptions, Table, TableOptions};

fn build_csv(entities: usize, periods: usize) -> String {
    let mut csv = String::from("Country");
    for p in 0..periods {
        csv.push_str(&format!(",{}", 1960 + p));
    }
    csv.push('\n');
    for e in 0..entities {
        csv.push_str(&format!("Country {e}"));
        for p in 0..periods {
            let v = ((e * 7919 + p * 104_729) % 10_007) as f64 * 1e9;
            csv.push_str(&format!(",{v}"));
        }
        csv.push('\n');
    }
    csv
}

fn race(entities: usize) -> BarChartRace {
    let table = Table::from_reader(build_csv(entities, 60).as_bytes(), &TableOptions::default()).expect("table");
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    BarChartRace::new(table, opts).expect("race")
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_for_frame");
    for &n in &[20usize, 250usize] {
        let r = race(n);
        group.bench_function(format!("entities_{n}"), |b| {
            b.iter(|| black_box(r.sort_for_frame("1990").expect("frame").len()));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    for &n in &[20usize, 250usize] {
        let mut r = race(n);
        group.bench_function(format!("entities_{n}"), |b| {
            b.iter(|| -> Result<()> {
                r.render_frame("1990")?;
                black_box(r.snapshot_rgba()?);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort, bench_render);
criterion_main!(benches);
