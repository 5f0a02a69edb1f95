//! Library crate root for the comment translator.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod comments;
pub mod config;
pub mod pipeline;
pub mod translator;
