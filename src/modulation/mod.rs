pub mod oscillation;

pub use oscillation::OscillationController;
