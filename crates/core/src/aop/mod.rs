pub mod builder;
pub mod factory;
pub mod interceptor;
pub mod invocation;
pub mod proxy;
pub mod scanner;
pub mod sink;

pub use builder::InterceptionProxyBuilder;
pub use factory::ProxyFactory;
pub use interceptor::{advice, FnInterceptor, LoggingInterceptor, MethodInterceptor};
pub use invocation::Invocation;
pub use proxy::{Proxy, ProxyMode, ProxyType};
pub use scanner::{matches, InterceptionPolicy};
pub use sink::{ConsoleSink, MemorySink, StdoutSink};
