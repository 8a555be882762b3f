use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lastdone_core::models::{ReminderConfig, ReminderInterval, Task};
use lastdone_core::notification::{NotificationRequest, NotificationScheduler, NotificationService, SystemClock};
use lastdone_core::reminder::derive_on_interval_change;
use lastdone_core::store::{MemoryPersistence, TaskStore};
use uuid::Uuid;

struct NullNotifier;

impl NotificationService for NullNotifier {
    fn request_permission(&self) -> bool {
        true
    }

    fn add(&self, request: NotificationRequest) {
        black_box(request);
    }

    fn remove_all(&self, ids: &[Uuid]) {
        black_box(ids);
    }
}

const NAMES: [&str; 6] = [
    "Clean filter",
    "Wash car",
    "Water plants",
    "Change bed sheets",
    "Descale kettle",
    "Replace toothbrush",
];

fn create_test_task(i: usize) -> Task {
    let mut task = Task::new(
        format!("{} #{}", NAMES[i % NAMES.len()], i),
        Utc::now() - Duration::hours(i as i64),
    );
    let interval = ReminderInterval::ALL[i % ReminderInterval::ALL.len()];
    task.apply_reminder_fields(derive_on_interval_change(&task, interval, Utc::now()));
    task
}

fn create_store(size: usize) -> TaskStore<MemoryPersistence> {
    let mut store = TaskStore::open(MemoryPersistence::new());
    for i in 0..size {
        store.insert(create_test_task(i)).unwrap();
    }
    store
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_filter");
    for size in [100, 1_000, 10_000] {
        let store = create_store(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| store.filter(black_box("filt")).len())
        });
    }
    group.finish();
}

fn bench_save(c: &mut Criterion) {
    let store = create_store(1_000);
    c.bench_function("store_save_1000", |b| b.iter(|| store.save().unwrap()));
}

fn bench_schedule_or_cancel(c: &mut Criterion) {
    let scheduler = NotificationScheduler::new(
        NullNotifier,
        SystemClock,
        &ReminderConfig {
            timezone: "America/New_York".to_string(),
        },
    )
    .unwrap();
    let mut task = Task::new("Clean filter", Utc::now());
    task.apply_reminder_fields(derive_on_interval_change(&task, ReminderInterval::Week, Utc::now()));

    c.bench_function("schedule_or_cancel", |b| {
        b.iter(|| scheduler.schedule_or_cancel(black_box(&task)))
    });
}

criterion_group!(benches, bench_filter, bench_save, bench_schedule_or_cancel);
criterion_main!(benches);
