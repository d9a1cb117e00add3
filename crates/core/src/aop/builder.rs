use crate::aop::factory::ProxyFactory;
use crate::aop::interceptor::{LoggingInterceptor, MethodInterceptor};
use crate::aop::proxy::{Proxy, ProxyType};
use crate::aop::sink::ConsoleSink;
use crate::errors::AopResult;
use crate::reflect::TypeDescriptor;
use std::sync::Arc;

/// Builds class-mode proxies carrying the fixed before/after logging chain.
///
/// Type-only proxies (no target) and bound proxies for the same type share one
/// [`ProxyType`], so a type resolved ahead of construction stays valid once the
/// instance exists.
#[derive(Debug, Clone)]
pub struct InterceptionProxyBuilder {
    interceptor: Arc<LoggingInterceptor>,
}

impl InterceptionProxyBuilder {
    pub fn new(sink: Arc<dyn ConsoleSink>) -> Self {
        Self {
            interceptor: Arc::new(LoggingInterceptor::new(sink)),
        }
    }

    /// Factory for `ty`: its class surface, its interfaces and the logging chain
    pub fn factory(&self, ty: &TypeDescriptor) -> ProxyFactory {
        let interceptor: Arc<dyn MethodInterceptor> = self.interceptor.clone();
        ProxyFactory::new()
            .with_target_class(ty.clone())
            .with_interfaces(ty.interfaces().into_iter().cloned())
            .proxy_target_class(true)
            .add_interceptor(interceptor)
    }

    /// Type the proxy for `ty` will have, without needing an instance
    pub fn proxy_type(&self, ty: &TypeDescriptor) -> AopResult<ProxyType> {
        self.factory(ty).proxy_type()
    }

    /// Build a proxy for `ty`, bound to `target` when one is given
    pub fn build_proxy<T: ?Sized>(
        &self,
        target: Option<Arc<T>>,
        ty: &TypeDescriptor,
    ) -> AopResult<Proxy<T>> {
        self.factory(ty).build(target)
    }
}
