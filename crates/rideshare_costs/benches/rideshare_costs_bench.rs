use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rideshare_costs::{
    allocator::{allocate, overlap_discount},
    model::{Coordinate, Location, RouteSegment, Vehicle},
    overlap::overlap,
    session::RideSession,
};

fn random_segment(rng: &mut SmallRng) -> RouteSegment {
    let mut location = || {
        let coordinate =
            Coordinate::new(rng.random_range(12.0..13.0), rng.random_range(77.0..78.0))
                .unwrap_or(Coordinate::ZERO);
        Location::new(coordinate, "")
    };

    let start = location();
    let end = location();
    RouteSegment::new(start, end, rng.random_range(1.0..200.0))
}

fn overlap_benchmark(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let a = random_segment(&mut rng);
    let b = random_segment(&mut rng);

    c.bench_function("overlap", |bench| {
        bench.iter(|| overlap(black_box(&a), black_box(&b)))
    });
}

fn allocate_benchmark(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let vehicle = Vehicle::new(15.0, 100.0);

    let Ok(mut session) = RideSession::new(vehicle, random_segment(&mut rng)) else {
        return;
    };
    for i in 0..20 {
        let _ = session.add_passenger(&format!("passenger {}", i), random_segment(&mut rng));
    }
    let pending = random_segment(&mut rng);

    c.bench_function("overlap_discount (20 passengers)", |bench| {
        bench.iter(|| {
            overlap_discount(
                black_box(&pending),
                black_box(session.primary()),
                black_box(session.passengers()),
            )
        })
    });

    c.bench_function("allocate (20 passengers)", |bench| {
        bench.iter(|| {
            allocate(
                black_box(session.primary()),
                black_box(&vehicle),
                black_box(session.passengers()),
                Some(black_box(&pending)),
            )
        })
    });
}

criterion_group!(benches, overlap_benchmark, allocate_benchmark);
criterion_main!(benches);
