// programs/bastion_pool/src/instructions/mod.rs

pub mod initialize;
pub mod liquidity;
pub mod reservation;
pub mod loans;
pub mod views;

pub use initialize::*;
pub use liquidity::*;
pub use reservation::*;
pub use loans::*;
pub use views::*;
