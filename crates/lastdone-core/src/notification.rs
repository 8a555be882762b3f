//! Notification scheduling against an external delivery service.
//!
//! The delivery service is fire-and-forget: `add` and `remove_all` return
//! nothing and their failures are never observed here. The scheduler keeps at
//! most one pending request per task id by always removing before adding.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{ReminderConfig, Task};
use crate::reminder::{default_notification_text, notification_title};
use crate::timezone::{parse_timezone, trigger_moment};

/// Calendar components of a one-shot trigger, in the scheduler's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// The same moment as an absolute instant
    pub instant: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Always the id of the task the reminder belongs to
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub trigger: TriggerMoment,
}

/// Host notification delivery service.
pub trait NotificationService {
    /// Ask the host for permission to deliver notifications.
    fn request_permission(&self) -> bool;
    fn add(&self, request: NotificationRequest);
    fn remove_all(&self, ids: &[Uuid]);
}

impl<T: NotificationService + ?Sized> NotificationService for Arc<T> {
    fn request_permission(&self) -> bool {
        (**self).request_permission()
    }

    fn add(&self, request: NotificationRequest) {
        (**self).add(request)
    }

    fn remove_all(&self, ids: &[Uuid]) {
        (**self).remove_all(ids)
    }
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// What `schedule_or_cancel` decided for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// No reminder configured; any pending request was removed
    Cancelled,
    /// The notification date had already passed; nothing was submitted
    Stale(DateTime<Utc>),
    Scheduled(TriggerMoment),
}

impl ScheduleOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleOutcome::Scheduled(_))
    }
}

#[derive(Debug)]
pub struct NotificationScheduler<N, C = SystemClock> {
    service: N,
    clock: C,
    timezone: Tz,
}

impl<N: NotificationService, C: Clock> NotificationScheduler<N, C> {
    pub fn new(service: N, clock: C, config: &ReminderConfig) -> Result<Self, CoreError> {
        let timezone = parse_timezone(&config.timezone)?;
        Ok(Self {
            service,
            clock,
            timezone,
        })
    }

    pub fn service(&self) -> &N {
        &self.service
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Remove any pending request for `task_id`. Safe to call when nothing is pending.
    pub fn cancel(&self, task_id: Uuid) {
        debug!(%task_id, "cancelling pending notification");
        self.service.remove_all(&[task_id]);
    }

    /// Replace the task's pending request with one matching its current reminder state.
    ///
    /// Cancel always happens first; a request is only added when the task has
    /// a reminder whose date is still in the future.
    pub fn schedule_or_cancel(&self, task: &Task) -> ScheduleOutcome {
        self.cancel(task.id);

        let notification_date = match task.notification_date {
            Some(date) if task.reminder_interval.is_enabled() => date,
            _ => return ScheduleOutcome::Cancelled,
        };

        if notification_date <= self.clock.now() {
            debug!(task_id = %task.id, %notification_date, "dropping stale notification");
            return ScheduleOutcome::Stale(notification_date);
        }

        let trigger = trigger_moment(notification_date, self.timezone);
        let body = if task.notification_text.is_empty() {
            default_notification_text(&task.name)
        } else {
            task.notification_text.clone()
        };

        debug!(task_id = %task.id, %notification_date, "scheduling notification");
        self.service.add(NotificationRequest {
            id: task.id,
            title: notification_title(&task.name),
            body,
            trigger,
        });
        ScheduleOutcome::Scheduled(trigger)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationState {
    #[default]
    NotRequested,
    Granted,
    Denied,
}

/// One-time permission request made when the application starts.
#[derive(Debug, Default)]
pub struct NotificationAuthorization {
    state: AuthorizationState,
}

impl NotificationAuthorization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthorizationState {
        self.state
    }

    /// Ask the service for permission the first time; later calls return the
    /// cached answer. Denial is logged, never reported as an error.
    pub fn request_once(&mut self, service: &impl NotificationService) -> bool {
        match self.state {
            AuthorizationState::Granted => return true,
            AuthorizationState::Denied => return false,
            AuthorizationState::NotRequested => {}
        }

        let granted = service.request_permission();
        if granted {
            info!("notification permission granted");
            self.state = AuthorizationState::Granted;
        } else {
            warn!("notification permission denied; reminders will not be delivered");
            self.state = AuthorizationState::Denied;
        }
        granted
    }
}
