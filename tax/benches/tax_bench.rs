use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use wrap_tax::{TaxRate, TaxSchedule};
use wrap_types::BlockHeight;

fn bench_rate_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("tax_rate_apply");
    let rate = TaxRate::new(10).unwrap();

    for amount in [10u128, 123_456_789, 10_000_000_000, u128::MAX] {
        group.bench_with_input(BenchmarkId::new("apply", amount), &amount, |b, &amount| {
            b.iter(|| black_box(rate.apply(black_box(amount))));
        });
    }

    group.finish();
}

fn bench_schedule_tax_for(c: &mut Criterion) {
    let mut group = c.benchmark_group("tax_schedule");
    let mut schedule = TaxSchedule::new(TaxRate::new(10).unwrap(), 21_000);
    schedule.enable(BlockHeight::new(0)).unwrap();

    for height in [0u64, 20_999, 21_000, 1_000_000] {
        let now = BlockHeight::new(height);
        group.bench_with_input(BenchmarkId::new("tax_for", height), &now, |b, now| {
            b.iter(|| black_box(schedule.tax_for(black_box(2_000_000), *now)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rate_apply, bench_schedule_tax_for);
criterion_main!(benches);
