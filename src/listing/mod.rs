pub mod error;
pub mod link;
pub mod rows;
