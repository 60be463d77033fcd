pub mod error;
pub mod extract;
pub mod model;
pub mod progress;
pub mod traits;
