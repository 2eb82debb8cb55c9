pub mod app;
pub mod console;
pub mod events;
