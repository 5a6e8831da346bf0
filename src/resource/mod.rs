//! Declarative resource commands
//!
//! Each CLI command is a [`ResourceCommandDescriptor`]: plain data naming the
//! verb, the REST resource, the list columns and how create arguments map into
//! the request body. The [`CommandRegistry`] holds them by command name.

pub mod body;
pub mod descriptor;
pub mod quark;
pub mod registry;

pub use body::{ArgValue, ArgValues, build_body};
pub use descriptor::{ArgumentSpec, Resource, ResourceCommandDescriptor, Verb};
pub use registry::{CommandRegistry, registry};
