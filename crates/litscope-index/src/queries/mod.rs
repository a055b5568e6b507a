pub mod audit;
pub mod paper;
