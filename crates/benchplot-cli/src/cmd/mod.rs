pub mod chart;
pub mod export;
pub mod problems;
pub mod summary;
