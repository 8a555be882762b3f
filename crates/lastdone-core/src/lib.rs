//! # Lastdone Core Library
//!
//! Tracks recurring chores as "last done on date X" and keeps at most one
//! pending reminder notification per task.
//!
//! ## Core Modules
//!
//! - [`models`]: Task records, reminder intervals and transfer objects
//! - [`reminder`]: Pure reminder policy deriving notification dates and text
//! - [`notification`]: Scheduler enforcing cancel-then-add against the host
//!   notification service, plus the one-time permission request
//! - [`editor`]: Edit-session state machine coordinating policy, scheduler and store
//! - [`store`]: Ordered task collection with whole-document persistence
//! - [`timezone`]: Timezone parsing and trigger moment construction
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lastdone_core::{
//!     editor::TaskEditor,
//!     models::{NewTaskData, ReminderConfig, ReminderInterval},
//!     notification::{NotificationRequest, NotificationScheduler, NotificationService, SystemClock},
//!     store::{JsonFilePersistence, TaskStore},
//! };
//! use uuid::Uuid;
//!
//! struct PrintNotifier;
//!
//! impl NotificationService for PrintNotifier {
//!     fn request_permission(&self) -> bool { true }
//!     fn add(&self, request: NotificationRequest) { println!("{}: {}", request.title, request.body) }
//!     fn remove_all(&self, _ids: &[Uuid]) {}
//! }
//!
//! fn main() -> Result<(), lastdone_core::error::CoreError> {
//!     let store = TaskStore::open(JsonFilePersistence::new("tasks.json"));
//!     let scheduler = NotificationScheduler::new(PrintNotifier, SystemClock, &ReminderConfig::default())?;
//!     let mut editor = TaskEditor::new(store, scheduler);
//!
//!     let task = editor.create_task(NewTaskData {
//!         name: "Clean filter".to_string(),
//!         ..Default::default()
//!     })?;
//!
//!     editor.begin_edit(task.id)?;
//!     editor.set_interval(ReminderInterval::FourWeeks)?;
//!     let task = editor.commit()?;
//!     println!("Next reminder: {:?}", task.notification_date);
//!     Ok(())
//! }
//! ```

pub mod editor;
pub mod error;
pub mod models;
pub mod notification;
pub mod reminder;
pub mod store;
pub mod timezone;
