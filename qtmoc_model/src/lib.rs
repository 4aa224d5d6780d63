//! Class model for the Go → Qt meta-object translation.
//!
//! Scanned Go declarations become [`ClassRecord`]s in a [`Registry`]; struct
//! tags become signal and slot [`MemberRecord`]s; the resolver then pulls
//! constructors and destructors down each base chain and drops every class
//! that does not derive from [`ROOT_OBJECT`].

pub mod builder;
mod class;
mod error;
pub mod library;
mod registry;
pub mod resolver;
pub mod signature;
pub mod tag;
pub mod types;

pub use builder::ClassModelBuilder;
pub use class::{ClassRecord, MemberCategory, MemberRecord, ParameterRecord, Virtuality, Visibility};
pub use error::ModelError;
pub use library::LibraryModule;
pub use registry::{MAIN_MODULE, ROOT_OBJECT, Registry};
pub use resolver::{ResolveReport, resolve};
pub use types::{NativeType, map_type};
