pub mod env;
pub mod memory;
