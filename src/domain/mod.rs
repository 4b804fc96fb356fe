// Domain layer - Core data types
pub mod pool;
pub mod reading;
