#[allow(clippy::module_inception)]
pub mod container;
pub mod builder;
pub mod candidate;
pub mod hook;

pub use builder::ContainerBuilder;
pub use candidate::{Candidate, CandidateFactory, ResolvedType};
pub use container::Container;
pub use hook::{LoggedProxyHook, PreparationHook};
