//! Field mapping tools for CMS content-type integrations.
//!
//! The core is [`mapping::flatten::flatten`], which replaces component
//! elements with their relabeled children. Around it sit a mapping loader,
//! an injectable [`translate::translator::Translator`], the listing link
//! renderer and the remote connection tester.

pub mod cli;
pub mod connection;
pub mod listing;
pub mod mapping;
pub mod trace;
pub mod translate;

pub use mapping::element_model::{Element, Flattenable};
pub use mapping::flatten::{flatten, flatten_deep, flatten_with};
