//! Discovery and listing engine.
//!
//! Files are resolved from the project's tsconfig files or, failing that,
//! from the conventional directory layout, and then handed to a type
//! extractor.

pub mod cancel;
pub mod corelib;
pub mod extract;
pub mod legacy;
pub mod lister;
pub mod posture;
pub mod resolver;

pub use cancel::CancellationToken;
pub use extract::{AstTypeExtractor, ExternalType, TypeExtractor, TypeKind};
pub use lister::{Discovery, DiscoveryStrategy, TypeLister, TypeListerBuilder, TypeListing};
pub use posture::{ModuleMode, ModulePosture};
