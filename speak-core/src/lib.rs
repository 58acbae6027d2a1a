pub mod app;
pub mod celebration;
pub mod error;
pub mod handlers;
pub mod key_event;
pub mod prompts;
pub mod session;
pub mod style;
pub mod timer;
pub mod types;
pub mod ui;
pub mod utils;
pub mod view;
