pub mod audit;
pub mod logger;
pub mod setup;
