pub mod error;
pub mod output;
pub mod parameters;
pub mod source;
