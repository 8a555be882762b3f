//! Terminal delivery of reminder notifications.
//!
//! Each request becomes a tokio task sleeping until its trigger moment; removal
//! aborts the task. Nothing survives the process, which is why the app
//! reschedules every stored reminder at startup.

use chrono::Utc;
use lastdone_core::notification::{NotificationRequest, NotificationService};
use owo_colors::OwoColorize;
use std::collections::HashMap;
use std::io::IsTerminal;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct PendingMap {
    next_generation: u64,
    entries: HashMap<Uuid, Pending>,
}

pub struct TerminalNotifier {
    runtime: Handle,
    pending: Arc<Mutex<PendingMap>>,
}

impl TerminalNotifier {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: Arc::new(Mutex::new(PendingMap::default())),
        }
    }

    /// Number of reminders waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|p| p.entries.len()).unwrap_or(0)
    }
}

impl NotificationService for TerminalNotifier {
    fn request_permission(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    fn add(&self, request: NotificationRequest) {
        let Ok(mut pending) = self.pending.lock() else {
            warn!(id = %request.id, "notification registry poisoned; dropping request");
            return;
        };

        let delay = (request.trigger.instant - Utc::now())
            .to_std()
            .unwrap_or_default();
        let generation = pending.next_generation;
        pending.next_generation += 1;

        let id = request.id;
        let registry = Arc::clone(&self.pending);
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            println!(
                "\n{} {}\n  {}",
                "⏰".yellow(),
                request.title.bold(),
                request.body
            );
            info!(%id, "reminder delivered");
            if let Ok(mut pending) = registry.lock() {
                if pending.entries.get(&id).is_some_and(|p| p.generation == generation) {
                    pending.entries.remove(&id);
                }
            }
        });

        debug!(%id, delay_secs = delay.as_secs(), "reminder timer armed");
        if let Some(previous) = pending.entries.insert(id, Pending { generation, handle }) {
            previous.handle.abort();
        }
    }

    fn remove_all(&self, ids: &[Uuid]) {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        for id in ids {
            if let Some(previous) = pending.entries.remove(id) {
                previous.handle.abort();
                debug!(%id, "reminder timer disarmed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use lastdone_core::notification::TriggerMoment;
    use lastdone_core::timezone::trigger_moment;

    fn request_in(id: Uuid, delay: Duration) -> NotificationRequest {
        let trigger: TriggerMoment = trigger_moment(Utc::now() + delay, chrono_tz::Tz::UTC);
        NotificationRequest {
            id,
            title: "Reminder: Test".to_string(),
            body: "Time to do Test again!".to_string(),
            trigger,
        }
    }

    #[tokio::test]
    async fn test_remove_disarms_pending_reminder() {
        let notifier = TerminalNotifier::new(Handle::current());
        let id = Uuid::new_v4();

        notifier.add(request_in(id, Duration::hours(1)));
        assert_eq!(notifier.pending_count(), 1);

        notifier.remove_all(&[id]);
        notifier.remove_all(&[id]);
        assert_eq!(notifier.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_readding_replaces_previous_timer() {
        let notifier = TerminalNotifier::new(Handle::current());
        let id = Uuid::new_v4();

        notifier.add(request_in(id, Duration::hours(1)));
        notifier.add(request_in(id, Duration::hours(2)));
        assert_eq!(notifier.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_fired_reminder_leaves_registry() {
        let notifier = TerminalNotifier::new(Handle::current());
        notifier.add(request_in(Uuid::new_v4(), Duration::zero()));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(notifier.pending_count(), 0);
    }
}
