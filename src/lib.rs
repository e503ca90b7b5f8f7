//! tslister - list the client-side types of a Serenity project
//!
//! tslister finds the TypeScript sources of a project, either through its
//! `tsconfig.json` files or through the conventional `Modules`, `Imports`
//! and `typings/serenity` layout, and extracts the classes, interfaces and
//! enums they declare, along with whether the project uses ES modules,
//! global namespaces, or both.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: tsconfig.json reading and file enumeration
//! - `core`: Discovery, module posture and type extraction
//! - `error`: Library error type
//! - `fs`: File system abstraction (disk and in-memory)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fs;
pub mod utils;

pub use crate::core::{
    CancellationToken, Discovery, DiscoveryStrategy, ExternalType, TypeLister, TypeListing,
};
pub use error::{ListError, Result};
