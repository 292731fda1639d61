pub mod aggregate;
pub mod buckets;
pub mod filter;
pub mod trend;
pub mod window;
