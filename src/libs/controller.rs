//! The task list controller.
//!
//! Owns the in-memory collection and drives every user action through the
//! same cycle: mutate, persist, render, then surface whatever notice the
//! persistence step produced. Nothing in here is fatal; storage problems turn
//! into banner notices and the controller keeps working from memory.
//!
//! ```rust,no_run
//! use tasklist::libs::clock::SystemClock;
//! use tasklist::libs::controller::{ControllerSettings, TaskListController};
//! use tasklist::libs::persistence::{PersistenceAdapter, DEFAULT_STORAGE_KEY};
//! use tasklist::libs::storage::{FileStore, MemoryStore};
//! use tasklist::libs::view::TerminalView;
//!
//! let persistence = PersistenceAdapter::new(
//!     Box::new(FileStore::at("/tmp/tasks")),
//!     Box::new(MemoryStore::new()),
//!     DEFAULT_STORAGE_KEY,
//! );
//! let mut controller = TaskListController::initialize(
//!     persistence,
//!     TerminalView::new(),
//!     Box::new(SystemClock),
//!     ControllerSettings::default(),
//! );
//! let id = controller.submit_task("Buy milk").unwrap();
//! controller.toggle_task(id);
//! ```

use super::clock::Clock;
use super::config::NoticeConfig;
use super::messages::Message;
use super::notice::{Banner, Notice, Severity};
use super::persistence::{PersistenceAdapter, SaveTarget};
use super::task::{Task, TaskId};
use super::view::{render_tasks, RenderedList, TaskAction, TaskView};
use chrono::Duration;
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task description required")]
    EmptyDescription,
    #[error("no task ids left")]
    IdsExhausted,
}

/// Auto-dismiss delays for the warnings the controller raises by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub startup_warning: Duration,
    pub fallback_warning: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings::from(&NoticeConfig::default())
    }
}

impl From<&NoticeConfig> for ControllerSettings {
    fn from(config: &NoticeConfig) -> Self {
        ControllerSettings {
            startup_warning: config.startup_warning(),
            fallback_warning: config.fallback_warning(),
        }
    }
}

pub struct TaskListController<V: TaskView> {
    tasks: Vec<Task>,
    next_id: TaskId,
    persistence: PersistenceAdapter,
    view: V,
    clock: Box<dyn Clock>,
    banner: Banner,
    settings: ControllerSettings,
}

impl<V: TaskView> TaskListController<V> {
    /// Restores the saved tasks, binds `view` and draws the first frame.
    ///
    /// A load failure leaves the list empty and is reported after the first
    /// render. Missing durable storage adds a warning that dismisses itself
    /// after `settings.startup_warning`.
    pub fn initialize(persistence: PersistenceAdapter, view: V, clock: Box<dyn Clock>, settings: ControllerSettings) -> Self {
        let mut controller = TaskListController {
            tasks: Vec::new(),
            next_id: 1,
            persistence,
            view,
            clock,
            banner: Banner::default(),
            settings,
        };

        let restored = controller.restore();
        controller.render();

        if !controller.persistence.is_durable_backend_available() {
            controller.notify(Message::DurableStorageUnavailable, Severity::Warning, settings.startup_warning);
        }
        if !restored {
            controller.notify(Message::TasksLoadFailed, Severity::Error, Duration::zero());
        }
        controller
    }

    fn restore(&mut self) -> bool {
        match self.persistence.load() {
            Ok(snapshot) => {
                self.tasks = snapshot.tasks;
                self.next_id = snapshot.next_id;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks, starting fresh");
                self.tasks.clear();
                self.next_id = 1;
                false
            }
        }
    }

    pub fn submit_task(&mut self, raw_text: &str) -> Result<TaskId, ValidationError> {
        let text = raw_text.trim();
        if text.is_empty() {
            self.notify(Message::TaskDescriptionRequired, Severity::Error, Duration::zero());
            return Err(ValidationError::EmptyDescription);
        }

        let Some(following) = self.next_id.checked_add(1) else {
            self.notify(Message::TaskIdsExhausted, Severity::Error, Duration::zero());
            return Err(ValidationError::IdsExhausted);
        };
        let task = Task::new(self.next_id, text, self.clock.now());
        self.next_id = following;
        let id = task.id;
        self.tasks.push(task);
        debug!(id, "task added");

        let pending = self.persist();
        self.view.reset_input();
        self.render();
        self.surface(pending);
        Ok(id)
    }

    /// Flips the completion flag of `id`. Unknown ids are ignored.
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        task.toggle();
        debug!(id, completed = task.completed, "task toggled");

        self.commit();
        true
    }

    /// Removes `id` from the list. Returns `false` when there was nothing to remove.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        debug!(id, "task deleted");

        self.commit();
        true
    }

    /// Entry point for the controls of a rendered item.
    pub fn dispatch(&mut self, action: TaskAction) -> bool {
        match action {
            TaskAction::Toggle(id) => self.toggle_task(id),
            TaskAction::Delete(id) => self.delete_task(id),
        }
    }

    /// Clears the banner and redraws the list.
    pub fn render(&mut self) -> RenderedList {
        self.banner.clear();
        self.view.draw_notice(None);

        let list = render_tasks(&self.tasks);
        self.view.draw_list(&list);
        list
    }

    /// Shows `message` in the banner. A zero `duration` keeps it until the next clear or render.
    pub fn notify(&mut self, message: impl Display, severity: Severity, duration: Duration) {
        let notice = Notice::new(message.to_string(), severity, duration, self.clock.now());
        self.surface(Some(notice));
    }

    /// Dismisses the banner once its notice has expired.
    pub fn tick(&mut self) -> bool {
        if self.banner.expire(self.clock.now()) {
            self.view.draw_notice(None);
            return true;
        }
        false
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.banner.current(self.clock.now())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn commit(&mut self) {
        let pending = self.persist();
        self.render();
        self.surface(pending);
    }

    /// Saves the collection and returns the notice the outcome calls for, if any.
    fn persist(&self) -> Option<Notice> {
        let now = self.clock.now();
        match self.persistence.save(&self.tasks) {
            Ok(SaveTarget::Durable) => None,
            Ok(SaveTarget::Volatile) => Some(Notice::new(
                Message::TemporaryStorageInUse.to_string(),
                Severity::Warning,
                self.settings.fallback_warning,
                now,
            )),
            Err(e) => {
                warn!(error = %e, "failed to save tasks");
                Some(Notice::new(Message::TasksSaveFailed.to_string(), Severity::Error, Duration::zero(), now))
            }
        }
    }

    fn surface(&mut self, notice: Option<Notice>) {
        let Some(notice) = notice else {
            return;
        };
        debug!(severity = %notice.severity, message = %notice.message, "notice");
        self.view.draw_notice(Some(&notice));
        self.banner.show(notice);
    }
}
