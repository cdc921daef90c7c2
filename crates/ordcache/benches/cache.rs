use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ordcache::{ConcurrentLruCache, LruCache};

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit_single_threaded", |b| {
        let mut cache = LruCache::new(1000);
        for i in 0..100u64 {
            cache.put(i, vec![b'x'; 1024]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)).is_ok());
            counter += 1;
        });
    });

    group.bench_function("get_hit_concurrent", |b| {
        let cache = ConcurrentLruCache::new(1000);
        for i in 0..100u64 {
            cache.put(i, vec![b'x'; 1024]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)).ok());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let cache = ConcurrentLruCache::new(1000);
        for i in 0..100u64 {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter % 100)).ok());
            } else {
                black_box(cache.put(counter % 2000, counter));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_new_key_full_cache", |b| {
        let mut cache = LruCache::new(10);

        let mut counter = 0u64;
        b.iter(|| {
            // Every put lands a new key and evicts the oldest
            black_box(cache.put(counter, counter));
            counter += 1;
        });
    });

    group.bench_function("get_miss", |b| {
        let cache = ConcurrentLruCache::new(10);
        for i in 0..100u64 {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 90)).ok());
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_eviction_churn
);
criterion_main!(benches);
