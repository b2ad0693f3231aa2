//! Discogen Core Library
//!
//! This library provides the core functionality for generating typed API
//! client source code from discovery documents.

pub mod codemodel;
pub mod config;
pub mod decorator;
pub mod discovery;
pub mod error;
pub mod generate;
pub mod ident;
pub mod render;

pub use crate::{
    config::Config,
    decorator::Pipeline,
    discovery::{DiscoveryContext, Service},
    error::{Error, Result},
    generate::{generate, GenerationReport, SourceUnit},
};

/// Result type for discogen generation operations
pub type DiscogenResult<T> = std::result::Result<T, Error>;
