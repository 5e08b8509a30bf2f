//! Core library modules for tasklist.
//!
//! - **Data**: [`task`] records and the [`storage`] backends they are saved to
//! - **Persistence**: [`persistence`] routes snapshots between durable and volatile storage
//! - **Controller**: [`controller`] drives add, toggle and delete through persist and render
//! - **Presentation**: [`view`] projects tasks for display, [`notice`] holds the banner
//! - **Infrastructure**: [`config`], [`data_storage`], [`clock`], [`messages`]
//!
//! ```rust,no_run
//! use tasklist::libs::persistence::{PersistenceAdapter, DEFAULT_STORAGE_KEY};
//! use tasklist::libs::storage::{FileStore, MemoryStore};
//!
//! let persistence = PersistenceAdapter::new(
//!     Box::new(FileStore::at("/tmp/tasks")),
//!     Box::new(MemoryStore::new()),
//!     DEFAULT_STORAGE_KEY,
//! );
//! let snapshot = persistence.load()?;
//! println!("{} tasks, next id {}", snapshot.tasks.len(), snapshot.next_id);
//! # Ok::<(), tasklist::libs::persistence::PersistenceError>(())
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod data_storage;
pub mod messages;
pub mod notice;
pub mod persistence;
pub mod storage;
pub mod task;
pub mod view;
