#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use lastdone_core::editor::TaskEditor;
use lastdone_core::models::{NewTaskData, ReminderConfig, Task};
use lastdone_core::notification::{Clock, NotificationRequest, NotificationScheduler, NotificationService};
use lastdone_core::store::{MemoryPersistence, TaskStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A single call made against the notification service.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Add(NotificationRequest),
    RemoveAll(Vec<Uuid>),
}

/// Notification service double that records every call and tracks what would be pending.
#[derive(Debug)]
pub struct RecordingNotifier {
    grant: bool,
    calls: Mutex<Vec<Call>>,
    permission_requests: Mutex<usize>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::with_permission(true)
    }

    pub fn with_permission(grant: bool) -> Self {
        Self {
            grant,
            calls: Mutex::new(Vec::new()),
            permission_requests: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn adds(&self) -> Vec<NotificationRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Add(request) => Some(request),
                Call::RemoveAll(_) => None,
            })
            .collect()
    }

    pub fn cancels_for(&self, id: Uuid) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::RemoveAll(ids) if ids.contains(&id)))
            .count()
    }

    /// Requests that would still be pending after replaying every call.
    pub fn pending(&self) -> HashMap<Uuid, NotificationRequest> {
        let mut pending = HashMap::new();
        for call in self.calls() {
            match call {
                Call::Add(request) => {
                    pending.insert(request.id, request);
                }
                Call::RemoveAll(ids) => {
                    for id in ids {
                        pending.remove(&id);
                    }
                }
            }
        }
        pending
    }

    pub fn permission_requests(&self) -> usize {
        *self.permission_requests.lock().unwrap()
    }
}

impl NotificationService for RecordingNotifier {
    fn request_permission(&self) -> bool {
        *self.permission_requests.lock().unwrap() += 1;
        self.grant
    }

    fn add(&self, request: NotificationRequest) {
        self.calls.lock().unwrap().push(Call::Add(request));
    }

    fn remove_all(&self, ids: &[Uuid]) {
        self.calls.lock().unwrap().push(Call::RemoveAll(ids.to_vec()));
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub type TestEditor = TaskEditor<Arc<MemoryPersistence>, Arc<RecordingNotifier>, Arc<FixedClock>>;

pub struct Harness {
    pub editor: TestEditor,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<FixedClock>,
    pub persistence: Arc<MemoryPersistence>,
}

/// The instant every harness clock starts at.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap()
}

pub fn setup() -> Harness {
    setup_with(Arc::new(MemoryPersistence::new()))
}

pub fn setup_with(persistence: Arc<MemoryPersistence>) -> Harness {
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = Arc::new(FixedClock::new(test_now()));
    let store = TaskStore::open(persistence.clone());
    let scheduler = NotificationScheduler::new(
        notifier.clone(),
        clock.clone(),
        &ReminderConfig::default(),
    )
    .expect("UTC is a valid timezone");

    Harness {
        editor: TaskEditor::new(store, scheduler),
        notifier,
        clock,
        persistence,
    }
}

/// Create a task last done `days_ago` days before the harness clock.
pub fn create_task(harness: &mut Harness, name: &str, days_ago: i64) -> Task {
    harness
        .editor
        .create_task(NewTaskData {
            name: name.to_string(),
            date: Some(test_now() - Duration::days(days_ago)),
        })
        .expect("Failed to create test task")
}
