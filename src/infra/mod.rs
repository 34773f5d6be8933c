pub mod fetch;
pub mod import;
#[cfg(not(target_arch = "wasm32"))]
pub mod sqlite;
