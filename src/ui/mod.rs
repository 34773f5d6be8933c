pub mod chart;
pub mod state;
pub mod style;
