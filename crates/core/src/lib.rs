//! Core of the weave framework: statically declared type metadata, a marker
//! scanner, interception proxies, and a small container that swaps marked
//! candidates for proxies while preparing them.

pub mod aop;
pub mod config;
pub mod container;
pub mod errors;
pub mod foundation;
pub mod logging;
pub mod reflect;
pub mod resources;

// Re-export key types for convenience
pub use aop::{
    advice, matches, ConsoleSink, InterceptionPolicy, InterceptionProxyBuilder, Invocation,
    LoggingInterceptor, MemorySink, MethodInterceptor, Proxy, ProxyFactory, ProxyMode, ProxyType,
    StdoutSink,
};
pub use config::{AppConfig, AppConfigTrait, ConfigError, Environment};
pub use container::{
    Candidate, Container, ContainerBuilder, LoggedProxyHook, PreparationHook, ResolvedType,
};
pub use errors::{AopError, AopResult};
pub use foundation::{Component, LifecycleState};
pub use logging::{init_logging, LoggingConfig};
pub use reflect::{ComponentClass, Marker, MethodDescriptor, Reflect, TypeDescriptor, TypeRegistry};
pub use resources::ResourceLoader;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framework information
pub const FRAMEWORK_NAME: &str = "weave";

/// Get framework version
pub fn version() -> &'static str {
    VERSION
}
