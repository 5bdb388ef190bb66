pub mod investment;
pub mod settlement;
pub mod vault;
