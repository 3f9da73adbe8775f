pub mod element_model;
pub mod error;
pub mod fingerprint;
pub mod flatten;
pub mod loader;
