pub mod config;
pub mod contact;
pub mod ffi;
pub mod model;
pub mod notify;
pub mod prefs;
pub mod random;
pub mod related;
pub mod search;
pub mod shopping;
pub mod storage;
pub mod store;
pub mod text;

pub use config::Config;
pub use model::*;
pub use notify::{Level, Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use random::{RandomSource, ThreadRandom};
pub use related::related_recipes;
pub use shopping::{ItemId, ShoppingListItem, ShoppingListManager};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{CatalogError, RecipeStore, StoreError};

uniffi::setup_scaffolding!();
