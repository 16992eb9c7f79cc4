//! covid-search - Twitter search builder for COVID-19 relief leads.
//!
//! Turns a selection of keywords, exclusions and a city into a Twitter
//! advanced-search query, opens it in the browser and keeps a short history
//! of past searches.
//!
//! # Example
//!
//! ```no_run
//! use covid_search::{Config, MemoryStore, PrintNavigator, SearchSession};
//!
//! let mut session = SearchSession::new(Config::default(), MemoryStore::new(), PrintNavigator);
//! session.set_city("Pune");
//! session.toggle_include("Plasma");
//!
//! if let Some(outcome) = session.start_search() {
//!     println!("{}", outcome.query);
//! }
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod navigation;
pub mod query;
pub mod selection;
pub mod session;
pub mod storage;
pub mod tag;

pub use config::{Config, ResourceLink, Settings};
pub use error::{ConfigError, Error, Result, StorageError};
pub use history::{HistoryRecord, HistoryStore};
pub use navigation::{BrowserNavigator, NavigationOutcome, Navigator, PrintNavigator};
pub use query::{QueryBuilder, TermMapping};
pub use selection::SelectionState;
pub use session::{SearchOutcome, SearchPreview, SearchSession};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use tag::Tag;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
