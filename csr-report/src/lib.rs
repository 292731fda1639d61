pub mod assemble;
pub mod chart;
pub mod export;
pub mod section;
