#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;
    use tasklist::libs::clock::Clock;
    use tasklist::libs::config::NoticeConfig;
    use tasklist::libs::controller::{ControllerSettings, TaskListController, ValidationError};
    use tasklist::libs::notice::{Notice, Severity};
    use tasklist::libs::persistence::{PersistenceAdapter, DEFAULT_STORAGE_KEY};
    use tasklist::libs::storage::{FileStore, MemoryStore, Storage, StorageError, PROBE_KEY};
    use tasklist::libs::view::{RenderedList, TaskAction, TaskView};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    #[derive(Clone)]
    struct TestClock(Rc<Cell<DateTime<Utc>>>);

    impl TestClock {
        fn new() -> Self {
            TestClock(Rc::new(Cell::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())))
        }

        fn advance(&self, duration: Duration) {
            self.0.set(self.0.get() + duration);
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct RecordingView {
        lists: Vec<RenderedList>,
        notices: Vec<Option<Notice>>,
        input_resets: usize,
    }

    impl RecordingView {
        fn last_list(&self) -> &RenderedList {
            self.lists.last().expect("nothing rendered")
        }
    }

    impl TaskView for RecordingView {
        fn draw_list(&mut self, list: &RenderedList) {
            self.lists.push(list.clone());
        }

        fn draw_notice(&mut self, notice: Option<&Notice>) {
            self.notices.push(notice.cloned());
        }

        fn reset_input(&mut self) {
            self.input_resets += 1;
        }
    }

    /// Shared in-memory store whose availability and writes can be broken on demand.
    #[derive(Clone, Default)]
    struct SwitchableStore {
        inner: Rc<MemoryStore>,
        unavailable: Rc<Cell<bool>>,
        reject_writes: Rc<Cell<bool>>,
    }

    impl Storage for SwitchableStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.unavailable.get() {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: io::Error::new(io::ErrorKind::Other, "switched off"),
                });
            }
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.unavailable.get() || (self.reject_writes.get() && key != PROBE_KEY) {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "write rejected"),
                });
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            if self.unavailable.get() {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: io::Error::new(io::ErrorKind::Other, "switched off"),
                });
            }
            self.inner.remove_item(key)
        }
    }

    struct ControllerTestContext {
        temp_dir: TempDir,
        clock: TestClock,
    }

    impl TestContext for ControllerTestContext {
        fn setup() -> Self {
            ControllerTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                clock: TestClock::new(),
            }
        }
    }

    impl ControllerTestContext {
        fn file_store(&self) -> FileStore {
            FileStore::at(self.temp_dir.path())
        }

        fn open(&self) -> TaskListController<RecordingView> {
            let persistence = PersistenceAdapter::new(Box::new(self.file_store()), Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
            self.open_with(persistence)
        }

        fn open_with(&self, persistence: PersistenceAdapter) -> TaskListController<RecordingView> {
            self.open_configured(persistence, ControllerSettings::default())
        }

        fn open_configured(&self, persistence: PersistenceAdapter, settings: ControllerSettings) -> TaskListController<RecordingView> {
            TaskListController::initialize(persistence, RecordingView::default(), Box::new(self.clock.clone()), settings)
        }

        fn add(&self, controller: &mut TaskListController<RecordingView>, text: &str) -> u64 {
            self.clock.advance(Duration::seconds(1));
            controller.submit_task(text).unwrap()
        }
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_initialize_with_nothing_saved(ctx: &mut ControllerTestContext) {
        let controller = ctx.open();

        assert!(controller.tasks().is_empty());
        assert_eq!(controller.next_id(), 1);
        assert!(controller.notice().is_none());
        assert!(controller.view().last_list().empty_state_visible);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_walkthrough(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();

        let milk = ctx.add(&mut controller, "Buy milk");
        assert_eq!(milk, 1);
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.tasks()[0].text, "Buy milk");
        assert!(!controller.tasks()[0].completed);

        let bob = ctx.add(&mut controller, "Call Bob");
        assert_eq!(bob, 2);
        assert_eq!(controller.view().last_list().order(), vec![2, 1]);

        assert!(controller.toggle_task(1));
        let list = controller.view().last_list();
        assert_eq!(list.order(), vec![2, 1]);
        assert!(!list.items[0].checked);
        assert!(list.items[1].checked);

        assert!(controller.delete_task(2));
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.tasks()[0].id, 1);
        assert!(controller.tasks()[0].completed);
        assert!(!controller.view().last_list().empty_state_visible);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_submit_trims_and_resets_input(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();

        ctx.add(&mut controller, "   Water plants \t");
        assert_eq!(controller.tasks()[0].text, "Water plants");
        assert_eq!(controller.view().input_resets, 1);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_blank_submission_is_rejected(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        ctx.add(&mut controller, "Existing");
        let renders = controller.view().lists.len();

        for blank in ["", "   ", "\t\n"] {
            assert_eq!(controller.submit_task(blank), Err(ValidationError::EmptyDescription));
            let notice = controller.notice().expect("validation notice");
            assert_eq!(notice.severity, Severity::Error);
            assert_eq!(notice.message, "Please enter a task description");
        }

        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.next_id(), 2);
        assert_eq!(controller.view().lists.len(), renders);
        assert_eq!(controller.view().input_resets, 1);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_toggle_twice_restores_state(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        let id = ctx.add(&mut controller, "Read a book");

        controller.toggle_task(id);
        assert!(controller.tasks()[0].completed);
        controller.toggle_task(id);
        assert!(!controller.tasks()[0].completed);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_toggle_unknown_id_is_ignored(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        ctx.add(&mut controller, "Only task");
        let renders = controller.view().lists.len();

        assert!(!controller.toggle_task(42));
        assert!(!controller.tasks()[0].completed);
        assert_eq!(controller.view().lists.len(), renders);
        assert!(controller.notice().is_none());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_delete_is_idempotent(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        ctx.add(&mut controller, "First");
        let second = ctx.add(&mut controller, "Second");

        assert!(controller.delete_task(second));
        assert_eq!(controller.tasks().len(), 1);

        assert!(!controller.delete_task(second));
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.tasks()[0].text, "First");
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_ids_are_not_reused_after_delete(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        ctx.add(&mut controller, "a");
        let b = ctx.add(&mut controller, "b");
        controller.delete_task(b);

        let c = ctx.add(&mut controller, "c");
        assert_eq!(c, 3);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_deleting_last_task_shows_empty_state(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        let id = ctx.add(&mut controller, "Lonely");

        controller.delete_task(id);
        let list = controller.view().last_list();
        assert!(list.empty_state_visible);
        assert!(list.items.is_empty());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_dispatch_item_actions(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        ctx.add(&mut controller, "Walk the dog");

        let item = controller.view().last_list().items[0].clone();
        assert!(controller.dispatch(item.toggle_action()));
        assert!(controller.tasks()[0].completed);

        assert!(controller.dispatch(item.delete_action()));
        assert!(controller.tasks().is_empty());
        assert!(!controller.dispatch(TaskAction::Delete(item.id)));
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_tasks_survive_restart(ctx: &mut ControllerTestContext) {
        let mut first = ctx.open();
        ctx.add(&mut first, "Persist me");
        let done = ctx.add(&mut first, "And me");
        first.toggle_task(done);
        let saved = first.tasks().to_vec();
        drop(first);

        let mut second = ctx.open();
        assert_eq!(second.tasks(), saved.as_slice());
        assert_eq!(second.next_id(), 3);
        assert_eq!(second.view().last_list().order(), vec![1, 2]);

        assert_eq!(ctx.add(&mut second, "New one"), 3);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_corrupt_snapshot_starts_fresh(ctx: &mut ControllerTestContext) {
        ctx.file_store().set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();

        let mut controller = ctx.open();
        assert!(controller.tasks().is_empty());
        assert_eq!(controller.next_id(), 1);

        let notice = controller.notice().expect("load failure notice");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Failed to load saved tasks. Starting fresh.");
        assert_eq!(notice.expires_at, None);

        assert_eq!(ctx.add(&mut controller, "Fresh start"), 1);
    }

    fn saved_with_id(id: u64) -> String {
        format!(r#"[{{"id":{},"text":"Last one","completed":false,"createdAt":"2024-01-01T00:00:00Z"}}]"#, id)
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_saved_max_id_starts_fresh(ctx: &mut ControllerTestContext) {
        ctx.file_store().set_item(DEFAULT_STORAGE_KEY, &saved_with_id(u64::MAX)).unwrap();

        let mut controller = ctx.open();
        assert!(controller.tasks().is_empty());
        assert_eq!(controller.next_id(), 1);

        let notice = controller.notice().expect("load failure notice");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Failed to load saved tasks. Starting fresh.");

        assert_eq!(ctx.add(&mut controller, "Fresh start"), 1);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_submit_after_last_id_is_rejected(ctx: &mut ControllerTestContext) {
        ctx.file_store().set_item(DEFAULT_STORAGE_KEY, &saved_with_id(u64::MAX - 1)).unwrap();

        let mut controller = ctx.open();
        assert_eq!(controller.next_id(), u64::MAX);
        let renders = controller.view().lists.len();

        assert_eq!(controller.submit_task("One too many"), Err(ValidationError::IdsExhausted));
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.next_id(), u64::MAX);
        assert_eq!(controller.view().lists.len(), renders);

        let notice = controller.notice().expect("exhaustion notice");
        assert_eq!(notice.severity, Severity::Error);
        assert!(notice.message.starts_with("No task IDs left."));
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_huge_startup_warning_never_expires(ctx: &mut ControllerTestContext) {
        let durable = SwitchableStore::default();
        durable.unavailable.set(true);
        let persistence = PersistenceAdapter::new(Box::new(durable), Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        let notices = NoticeConfig {
            startup_warning_ms: u64::MAX / 2,
            ..NoticeConfig::default()
        };

        let mut controller = ctx.open_configured(persistence, ControllerSettings::from(&notices));
        let startup = controller.notice().expect("startup warning").clone();
        assert_eq!(startup.severity, Severity::Warning);
        assert_eq!(startup.expires_at, None);

        ctx.clock.advance(Duration::days(365));
        assert!(!controller.tick());
        assert!(controller.notice().is_some());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_render_clears_notice(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        controller.notify("Heads up", Severity::Info, Duration::zero());
        assert!(controller.notice().is_some());

        controller.render();
        assert!(controller.notice().is_none());
        assert_eq!(controller.view().notices.last(), Some(&None));
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_notice_auto_dismiss(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        controller.notify("Short lived", Severity::Info, Duration::milliseconds(3000));

        ctx.clock.advance(Duration::milliseconds(2999));
        assert!(!controller.tick());
        assert!(controller.notice().is_some());

        ctx.clock.advance(Duration::milliseconds(1));
        assert!(controller.notice().is_none());
        assert!(controller.tick());
        assert!(!controller.tick());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_stale_expiry_does_not_clear_newer_notice(ctx: &mut ControllerTestContext) {
        let mut controller = ctx.open();
        controller.notify("Old", Severity::Info, Duration::seconds(1));
        controller.notify("New", Severity::Error, Duration::zero());

        ctx.clock.advance(Duration::seconds(5));
        assert!(!controller.tick());
        assert_eq!(controller.notice().map(|n| n.message.as_str()), Some("New"));
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_volatile_fallback_warnings(ctx: &mut ControllerTestContext) {
        let durable = SwitchableStore::default();
        durable.unavailable.set(true);
        let volatile = SwitchableStore::default();
        let persistence = PersistenceAdapter::new(Box::new(durable.clone()), Box::new(volatile.clone()), DEFAULT_STORAGE_KEY);

        let mut controller = ctx.open_with(persistence);
        let startup = controller.notice().expect("startup warning").clone();
        assert_eq!(startup.severity, Severity::Warning);
        assert_eq!(startup.expires_at, Some(ctx.clock.now() + Duration::seconds(8)));

        ctx.add(&mut controller, "Kept in session");
        let fallback = controller.notice().expect("fallback warning").clone();
        assert_eq!(fallback.severity, Severity::Warning);
        assert_eq!(fallback.message, "Using temporary storage. Tasks will be lost when the session ends.");
        assert_eq!(fallback.expires_at, Some(ctx.clock.now() + Duration::seconds(5)));
        assert!(volatile.inner.get_item(DEFAULT_STORAGE_KEY).unwrap().is_some());

        ctx.clock.advance(Duration::seconds(5));
        assert!(controller.tick());
        assert!(controller.notice().is_none());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_save_failure_keeps_memory(ctx: &mut ControllerTestContext) {
        let durable = SwitchableStore::default();
        let persistence = PersistenceAdapter::new(Box::new(durable.clone()), Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        let mut controller = ctx.open_with(persistence);

        durable.reject_writes.set(true);
        let id = ctx.add(&mut controller, "Not saved");

        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.tasks()[0].id, id);
        let notice = controller.notice().expect("save failure notice");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Failed to save tasks. Changes may not persist.");
        assert!(durable.inner.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_durable_store_lost_mid_session(ctx: &mut ControllerTestContext) {
        let durable = SwitchableStore::default();
        let volatile = SwitchableStore::default();
        let persistence = PersistenceAdapter::new(Box::new(durable.clone()), Box::new(volatile.clone()), DEFAULT_STORAGE_KEY);
        let mut controller = ctx.open_with(persistence);

        ctx.add(&mut controller, "Before");
        assert!(controller.notice().is_none());
        assert!(durable.inner.get_item(DEFAULT_STORAGE_KEY).unwrap().is_some());

        durable.unavailable.set(true);
        ctx.add(&mut controller, "After");
        assert_eq!(controller.notice().map(|n| n.severity), Some(Severity::Warning));

        let saved = volatile.inner.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains("Before"));
        assert!(saved.contains("After"));
    }
}
