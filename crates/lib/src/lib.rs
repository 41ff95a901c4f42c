//! Documentation indexer core: scan a `rust-docs` tree of skill and topic documents, extract
//! their metadata, classify skills, and render one aggregated index document.

pub mod config;
pub mod docs;
pub mod error;
pub mod index;
pub mod render;
pub mod scan;
pub mod skills;
pub mod source;
