pub mod chart_service;
pub mod load_service;
