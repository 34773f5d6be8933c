pub mod resource;
pub mod state_store;
