use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orbital_anomaly::angle::Angle;
use orbital_anomaly::kepler_method::KeplerMethod;
use orbital_anomaly::parabolic::ParabolicElements;

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    let two_pi = std::f64::consts::TAU;
    rng.random::<f64>() * two_pi
}

fn make_cases(seed: u64, e_min: f64, e_max: f64) -> Vec<(f64, Angle)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..10_000usize)
        .map(|_| (rng.random_range(e_min..e_max), Angle::from_rad(rand_angle(&mut rng))))
        .collect()
}

fn bench_regime(c: &mut Criterion, label: &str, seed: u64, e_min: f64, e_max: f64) {
    for method in KeplerMethod::all() {
        // fixed point needs thousands of iterations as e → 1
        if *method == KeplerMethod::FixedPoint && e_max > 0.7 {
            continue;
        }

        c.bench_function(&format!("solve_kepler_equation/{label}/{method}"), |b| {
            b.iter_batched(
                || make_cases(seed, e_min, e_max),
                |cases| {
                    for (e, m) in cases {
                        let res = method.solve(black_box(e), black_box(m), 200);
                        black_box(res.ok());
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
}

/// Typical regime: e ∈ [0.0, 0.7]
fn bench_typical(c: &mut Criterion) {
    bench_regime(c, "typical_e<=0.7", 0xDEADBEEF, 0.0, 0.7);
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.99]
fn bench_high_e(c: &mut Criterion) {
    bench_regime(c, "high_e_0.7..0.99", 0xBADF00D, 0.7, 0.99);
}

/// Near-circular regime: e ≈ 1e-12
fn bench_near_circular(c: &mut Criterion) {
    bench_regime(c, "near_circular_e=1e-12", 0xFEEDFACE, 1e-12, 2e-12);
}

/// Fixed “stress” case from p. 205 of Meeus, useful for stability profiling.
fn bench_fixed_stress(c: &mut Criterion) {
    let e = 0.99_f64;
    let m = Angle::from_rad(0.2);

    c.bench_function("solve_kepler_equation/fixed_stress_case", |b| {
        b.iter(|| {
            let ea = KeplerMethod::NewtonRobust.solve(black_box(e), black_box(m), 50);
            black_box(ea.ok());
        })
    });
}

fn bench_parabolic(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let elements = ParabolicElements {
        time_p: 2450917.9358,
        perihelion_distance: 1.487469,
    };

    c.bench_function("solve_barker_equation/random_epochs", |b| {
        b.iter_batched(
            || {
                (0..10_000usize)
                    .map(|_| elements.time_p + rng.random_range(-2000.0..2000.0))
                    .collect::<Vec<_>>()
            },
            |epochs| {
                for jde in epochs {
                    black_box(elements.anomaly_distance(black_box(jde)).ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_near_circular, bench_fixed_stress, bench_parabolic
);
criterion_main!(benches);
