use crate::aop::interceptor::MethodInterceptor;
use crate::aop::proxy::{Proxy, ProxyMode, ProxyType};
use crate::errors::{AopError, AopResult};
use crate::reflect::TypeDescriptor;
use std::fmt;
use std::sync::Arc;

/// Builder for proxies and proxy types.
///
/// A factory with no target class, or with `proxy_target_class(false)` and at
/// least one interface, produces interface-mode proxies. Otherwise the proxy
/// exposes the whole target class.
#[derive(Clone, Default)]
pub struct ProxyFactory {
    target_class: Option<TypeDescriptor>,
    interfaces: Vec<TypeDescriptor>,
    proxy_target_class: bool,
    interceptors: Vec<Arc<dyn MethodInterceptor>>,
}

impl ProxyFactory {
    /// Create an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concrete type being proxied
    pub fn with_target_class(mut self, target_class: TypeDescriptor) -> Self {
        self.target_class = Some(target_class);
        self
    }

    /// Add an interface to the proxy surface
    pub fn add_interface(mut self, interface: TypeDescriptor) -> Self {
        if !self.interfaces.iter().any(|known| known.name() == interface.name()) {
            self.interfaces.push(interface);
        }
        self
    }

    /// Replace the proxy interfaces
    pub fn with_interfaces<I>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        self.interfaces.clear();
        for interface in interfaces {
            self = self.add_interface(interface);
        }
        self
    }

    /// Expose the full target class surface rather than interfaces only
    pub fn proxy_target_class(mut self, enabled: bool) -> Self {
        self.proxy_target_class = enabled;
        self
    }

    /// Append an interceptor to the chain
    pub fn add_advice<I>(self, interceptor: I) -> Self
    where
        I: MethodInterceptor + 'static,
    {
        self.add_interceptor(Arc::new(interceptor))
    }

    /// Append a shared interceptor to the chain
    pub fn add_interceptor(mut self, interceptor: Arc<dyn MethodInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Mode the built proxies will use
    pub fn mode(&self) -> ProxyMode {
        if self.target_class.is_some() && (self.proxy_target_class || self.interfaces.is_empty()) {
            ProxyMode::TargetClass
        } else {
            ProxyMode::Interfaces
        }
    }

    /// Compute the proxy type without creating a proxy
    pub fn proxy_type(&self) -> AopResult<ProxyType> {
        if let Some(class) = &self.target_class {
            if class.is_interface() {
                return Err(AopError::configuration(format!(
                    "target class '{}' is an interface",
                    class.name()
                )));
            }
        }
        if let Some(interface) = self.interfaces.iter().find(|i| !i.is_interface()) {
            return Err(AopError::configuration(format!(
                "'{}' is not an interface",
                interface.name()
            )));
        }

        ProxyType::new(self.mode(), self.target_class.clone(), self.interfaces.clone())
    }

    /// Build a proxy, optionally bound to a target
    pub fn build<T: ?Sized>(&self, target: Option<Arc<T>>) -> AopResult<Proxy<T>> {
        let proxy_type = self.proxy_type()?;
        tracing::debug!(
            proxy = %proxy_type.name(),
            mode = ?proxy_type.mode(),
            bound = target.is_some(),
            interceptors = self.interceptors.len(),
            "Building proxy"
        );
        Ok(Proxy::new(proxy_type, target, self.interceptors.clone().into()))
    }
}

impl fmt::Debug for ProxyFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyFactory")
            .field("target_class", &self.target_class.as_ref().map(|c| c.name()))
            .field(
                "interfaces",
                &self.interfaces.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("proxy_target_class", &self.proxy_target_class)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
