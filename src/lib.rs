pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::progress::{ProgressService, QueryOptions};
pub use domain::error::ProgressError;
pub use domain::model::{Progress, ProgressSource, Query, RawQuery};
pub use state::AppState;
