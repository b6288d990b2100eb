use criterion::{Criterion, criterion_group, criterion_main};
use logic_puzzles::puzzles::Puzzle;
use logic_puzzles::puzzles::icecream::IceCream;
use logic_puzzles::puzzles::schedule::Schedule;
use logic_puzzles::puzzles::zebra::Zebra;
use std::hint::black_box;
use std::time::Duration;

fn bench_zebra(c: &mut Criterion) {
    c.bench_function("zebra - build", |b| {
        b.iter(|| black_box(Zebra::build().unwrap()));
    });

    let (cs, _) = Zebra::build().unwrap();
    c.bench_function("zebra - encode", |b| {
        b.iter(|| black_box(cs.encode()));
    });
    c.bench_function("zebra - solve", |b| {
        b.iter(|| black_box(cs.solve().unwrap()));
    });
}

fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate all solutions");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let (cs, ice_cream) = IceCream::build().unwrap();
    group.bench_function("ice-cream", |b| {
        b.iter(|| black_box(ice_cream.solutions(&cs).unwrap()));
    });

    let (cs, schedule) = Schedule::build().unwrap();
    group.bench_function("schedule", |b| {
        b.iter(|| black_box(schedule.solutions(&cs).unwrap()));
    });

    let (cs, zebra) = Zebra::build().unwrap();
    group.bench_function("zebra", |b| {
        b.iter(|| black_box(zebra.solutions(&cs).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_zebra, bench_enumeration);
criterion_main!(benches);
