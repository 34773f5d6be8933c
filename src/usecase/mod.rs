pub mod ports;
pub mod sequencer;
pub mod services;
