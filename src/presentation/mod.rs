pub mod badge;
pub mod theme;
