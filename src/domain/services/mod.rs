pub mod aggregator;
pub mod pivot;
pub mod projector;
pub mod schema;
pub mod table;
pub mod temporal;
