use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rill_core::Observable;
use rill_ops::ObservableExt;
use rill_sources::from_iter;

fn operator_chain(c: &mut Criterion) {
    let values: Vec<u64> = (0..10_000).map(|i| i / 3).collect();
    let chain = from_iter(values)
        .skip(10)
        .distinct_until_changed()
        .map(|x| x * 2)
        .filter(|x| x % 3 != 0)
        .start_with(0);

    c.bench_function("chain_10k", |b| {
        b.iter(|| {
            let sub = chain.subscribe(Box::new(rill_core::CallbackObserver::next_only(
                |v: u64| {
                    black_box(v);
                },
            )));
            black_box(sub)
        })
    });
}

fn bare_source(c: &mut Criterion) {
    let values: Vec<u64> = (0..10_000).collect();
    let source = from_iter(values);
    c.bench_function("source_10k", |b| {
        b.iter(|| black_box(source.subscribe_next(|v| {
            black_box(v);
        })))
    });
}

criterion_group!(benches, operator_chain, bare_source);
criterion_main!(benches);
