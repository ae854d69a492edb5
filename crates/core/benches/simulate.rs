//! Criterion benchmarks for one update cycle.
//!
//! Run with:
//!   cargo bench -p relivis
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use relivis::prelude::*;
use relivis::simulator::MAX_SUBJECTS;

fn controls(subjects: usize, trials: usize) -> ControlState {
    ControlState {
        subject_count: subjects,
        trial_count: trials,
        ..ControlState::default()
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let mut rng = Prng::new(42);
    let initial = InitialConditions::generate(&mut rng);

    for subjects in [1usize, 5, 10, MAX_SUBJECTS] {
        let params = controls(subjects, 10).sim_params();
        group.throughput(Throughput::Elements((subjects * 10) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(subjects), &params, |b, p| {
            b.iter(|| black_box(generate(&initial, p, &mut rng)));
        });
    }
    group.finish();
}

fn bench_update_cycle(c: &mut Criterion) {
    let mut chart = TrialChart::with_seed(42);
    let full = controls(MAX_SUBJECTS, 10);
    c.bench_function("update_full", |b| {
        b.iter(|| black_box(chart.update(black_box(&full))));
    });
}

#[cfg(feature = "svg")]
fn bench_svg_export(c: &mut Criterion) {
    let mut chart = TrialChart::with_seed(42);
    let frame = chart.update(&controls(MAX_SUBJECTS, 10));
    c.bench_function("svg_export", |b| {
        b.iter(|| {
            if let Ok(f) = &frame {
                black_box(relivis::export::scene_to_svg(&f.scene).ok());
            }
        });
    });
}

#[cfg(feature = "svg")]
criterion_group!(benches, bench_generate, bench_update_cycle, bench_svg_export);
#[cfg(not(feature = "svg"))]
criterion_group!(benches, bench_generate, bench_update_cycle);
criterion_main!(benches);
