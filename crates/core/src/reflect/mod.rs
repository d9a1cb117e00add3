pub mod descriptor;
pub mod registry;

pub use descriptor::{Marker, MethodDescriptor, Reflect, TypeDescriptor, TypeKind};
pub use registry::{ComponentClass, TypeRegistry};
