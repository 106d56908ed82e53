// programs/bastion_whitelist/src/instructions/mod.rs

pub mod initialize;
pub mod providers;

pub use initialize::*;
pub use providers::*;
