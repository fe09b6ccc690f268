pub mod inventory;
pub mod cart;

pub use inventory::*;
pub use cart::*;
