//! Task editing state machine.
//!
//! [`TaskEditor`] owns the store and the scheduler and moves between
//! `Idle`, `Editing` and `Committing`. An open [`EditSession`] works on a draft
//! copy of the task: every change re-derives the reminder fields and previews
//! the resulting notification through the scheduler, but the stored task is
//! only replaced on [`TaskEditor::commit`]. [`TaskEditor::discard`] drops the
//! draft and reschedules from the stored task, so a previewed notification
//! never outlives the session.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{NewTaskData, ReminderInterval, Task};
use crate::notification::{Clock, NotificationScheduler, NotificationService, ScheduleOutcome, SystemClock};
use crate::reminder::{derive_on_commit, derive_on_date_or_name_change, derive_on_interval_change};
use crate::store::{Persistence, TaskStore};

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    original: Task,
    draft: Task,
}

impl EditSession {
    fn new(task: &Task) -> Self {
        Self {
            original: task.clone(),
            draft: task.clone(),
        }
    }

    pub fn task_id(&self) -> Uuid {
        self.original.id
    }

    /// The task as it was when the session began.
    pub fn original(&self) -> &Task {
        &self.original
    }

    pub fn draft(&self) -> &Task {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.original != self.draft
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Editing(EditSession),
    Committing,
}

pub struct TaskEditor<P, N, C = SystemClock> {
    store: TaskStore<P>,
    scheduler: NotificationScheduler<N, C>,
    state: EditorState,
}

impl<P: Persistence, N: NotificationService, C: Clock> TaskEditor<P, N, C> {
    pub fn new(store: TaskStore<P>, scheduler: NotificationScheduler<N, C>) -> Self {
        Self {
            store,
            scheduler,
            state: EditorState::Idle,
        }
    }

    pub fn store(&self) -> &TaskStore<P> {
        &self.store
    }

    pub fn scheduler(&self) -> &NotificationScheduler<N, C> {
        &self.scheduler
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditorState::Editing(session) => Some(session),
            _ => None,
        }
    }

    /// Add a new task without a reminder and persist the collection.
    pub fn create_task(&mut self, data: NewTaskData) -> Result<Task, CoreError> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidInput(
                "Task name cannot be empty.".to_string(),
            ));
        }

        let task = Task::new(name, data.date.unwrap_or_else(|| self.scheduler.clock().now()));
        self.store.insert(task.clone())?;
        self.store.save()?;
        info!(task_id = %task.id, name = %task.name, "task created");
        Ok(task)
    }

    /// Cancel the task's notification, then remove it and persist.
    ///
    /// An edit session open on the same task is closed without saving.
    pub fn delete_task(&mut self, id: Uuid) -> Result<Task, CoreError> {
        if self.store.find(id).is_none() {
            return Err(CoreError::NotFound(id));
        }

        self.scheduler.cancel(id);
        let task = self.store.delete(id)?;
        if self.session().is_some_and(|s| s.task_id() == id) {
            self.state = EditorState::Idle;
        }
        self.store.save()?;
        info!(task_id = %id, name = %task.name, "task deleted");
        Ok(task)
    }

    /// Record that the task was done now: move its date, re-derive the
    /// reminder and persist.
    pub fn mark_done(&mut self, id: Uuid) -> Result<(Task, ScheduleOutcome), CoreError> {
        if self.session().is_some_and(|s| s.task_id() == id) {
            return Err(CoreError::InvalidInput(
                "Finish or discard the open edit before marking this task done.".to_string(),
            ));
        }

        let now = self.scheduler.clock().now();
        let task = self.store.find_mut(id).ok_or(CoreError::NotFound(id))?;
        task.date = now;
        let fields = derive_on_date_or_name_change(task);
        task.apply_reminder_fields(fields);

        let task = task.clone();
        let outcome = self.scheduler.schedule_or_cancel(&task);
        self.store.save()?;
        info!(task_id = %id, name = %task.name, "task marked done");
        Ok((task, outcome))
    }

    /// Resubmit every stored task's notification. Returns how many were scheduled.
    pub fn reschedule_all(&self) -> usize {
        let scheduled = self
            .store
            .tasks()
            .iter()
            .filter(|task| task.reminder_interval.is_enabled())
            .map(|task| self.scheduler.schedule_or_cancel(task))
            .filter(ScheduleOutcome::is_scheduled)
            .count();
        debug!(scheduled, "rescheduled stored reminders");
        scheduled
    }

    pub fn begin_edit(&mut self, id: Uuid) -> Result<&EditSession, CoreError> {
        if !matches!(self.state, EditorState::Idle) {
            return Err(CoreError::InvalidInput(
                "Another edit session is already open.".to_string(),
            ));
        }

        let session = EditSession::new(self.store.find(id).ok_or(CoreError::NotFound(id))?);
        self.state = EditorState::Editing(session);
        debug!(task_id = %id, "edit session started");
        self.session().ok_or_else(no_session)
    }

    pub fn set_interval(&mut self, interval: ReminderInterval) -> Result<ScheduleOutcome, CoreError> {
        let now = self.scheduler.clock().now();
        let session = Self::session_mut(&mut self.state)?;
        let fields = derive_on_interval_change(&session.draft, interval, now);
        session.draft.apply_reminder_fields(fields);
        Ok(self.scheduler.schedule_or_cancel(&session.draft))
    }

    /// Returns `None` when the draft has no reminder to reschedule.
    pub fn set_date(&mut self, date: DateTime<Utc>) -> Result<Option<ScheduleOutcome>, CoreError> {
        let session = Self::session_mut(&mut self.state)?;
        session.draft.date = date;
        Ok(Self::rederive(&self.scheduler, session))
    }

    /// Returns `None` when the draft has no reminder to reschedule.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<Option<ScheduleOutcome>, CoreError> {
        let session = Self::session_mut(&mut self.state)?;
        session.draft.name = name.into();
        Ok(Self::rederive(&self.scheduler, session))
    }

    /// Override the notification date directly. Only valid while a reminder is set.
    pub fn set_notification_date(&mut self, date: DateTime<Utc>) -> Result<ScheduleOutcome, CoreError> {
        let session = Self::session_mut(&mut self.state)?;
        if !session.draft.reminder_interval.is_enabled() {
            return Err(CoreError::InvalidInput(
                "Choose a reminder interval before picking a notification date.".to_string(),
            ));
        }
        session.draft.notification_date = Some(date);
        Ok(self.scheduler.schedule_or_cancel(&session.draft))
    }

    /// Write the draft onto the stored task, settle its notification and persist.
    pub fn commit(&mut self) -> Result<Task, CoreError> {
        let session = match std::mem::replace(&mut self.state, EditorState::Committing) {
            EditorState::Editing(session) => session,
            other => {
                self.state = other;
                return Err(no_session());
            }
        };

        let mut task = session.draft;
        let fields = derive_on_commit(&task, self.scheduler.clock().now());
        task.apply_reminder_fields(fields);

        let Some(stored) = self.store.find_mut(task.id) else {
            self.state = EditorState::Idle;
            return Err(CoreError::NotFound(task.id));
        };
        *stored = task.clone();

        if task.reminder_interval.is_enabled() {
            self.scheduler.schedule_or_cancel(&task);
        } else {
            self.scheduler.cancel(task.id);
        }

        self.state = EditorState::Idle;
        self.store.save()?;
        info!(task_id = %task.id, interval = task.reminder_interval.selector(), "task edit committed");
        Ok(task)
    }

    /// Close the session without saving. The stored task's notification is
    /// resubmitted, replacing whatever the draft previewed.
    pub fn discard(&mut self) -> Result<(), CoreError> {
        let session = match std::mem::take(&mut self.state) {
            EditorState::Editing(session) => session,
            other => {
                self.state = other;
                return Err(no_session());
            }
        };

        match self.store.find(session.task_id()) {
            Some(stored) => {
                self.scheduler.schedule_or_cancel(stored);
            }
            None => self.scheduler.cancel(session.task_id()),
        }
        debug!(task_id = %session.task_id(), "edit session discarded");
        Ok(())
    }

    fn session_mut(state: &mut EditorState) -> Result<&mut EditSession, CoreError> {
        match state {
            EditorState::Editing(session) => Ok(session),
            _ => Err(no_session()),
        }
    }

    fn rederive(
        scheduler: &NotificationScheduler<N, C>,
        session: &mut EditSession,
    ) -> Option<ScheduleOutcome> {
        let fields = derive_on_date_or_name_change(&session.draft);
        session.draft.apply_reminder_fields(fields);
        session
            .draft
            .reminder_interval
            .is_enabled()
            .then(|| scheduler.schedule_or_cancel(&session.draft))
    }
}

fn no_session() -> CoreError {
    CoreError::InvalidInput("No edit session is open.".to_string())
}
