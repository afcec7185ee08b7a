// fincheck/src/commands/mod.rs

pub mod check_config;
pub mod validate;
