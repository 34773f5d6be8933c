pub mod cell;
pub mod dataset;
pub mod grid;
pub mod header;
pub mod row;
pub mod series;
