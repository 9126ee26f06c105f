pub mod error;
pub mod loader;
pub mod model;
pub mod search;
pub mod store;
