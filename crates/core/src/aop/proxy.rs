use crate::aop::interceptor::MethodInterceptor;
use crate::aop::invocation::Invocation;
use crate::errors::{AopError, AopResult};
use crate::foundation::Component;
use crate::reflect::TypeDescriptor;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// Which call surface a proxy exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyMode {
    /// Same surface as the concrete target type, plus its interfaces
    TargetClass,
    /// Only the methods of the listed interfaces
    Interfaces,
}

/// Externally visible type of a proxy.
///
/// Two proxies built from the same factory settings have equal `ProxyType`s,
/// whether or not a target was bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyType {
    mode: ProxyMode,
    primary: TypeDescriptor,
    target_class: Option<TypeDescriptor>,
    interfaces: Vec<TypeDescriptor>,
}

impl ProxyType {
    pub(crate) fn new(
        mode: ProxyMode,
        target_class: Option<TypeDescriptor>,
        interfaces: Vec<TypeDescriptor>,
    ) -> AopResult<Self> {
        let primary = match mode {
            ProxyMode::TargetClass => target_class.clone().ok_or_else(|| {
                AopError::configuration("class-mode proxies need a target class")
            })?,
            ProxyMode::Interfaces => interfaces.first().cloned().ok_or_else(|| {
                AopError::configuration("interface-mode proxies need at least one interface")
            })?,
        };

        Ok(Self {
            mode,
            primary,
            target_class,
            interfaces,
        })
    }

    pub fn mode(&self) -> ProxyMode {
        self.mode
    }

    /// The target class in class mode, or the first interface otherwise
    pub fn primary(&self) -> &TypeDescriptor {
        &self.primary
    }

    pub fn target_class(&self) -> Option<&TypeDescriptor> {
        self.target_class.as_ref()
    }

    pub fn interfaces(&self) -> &[TypeDescriptor] {
        &self.interfaces
    }

    /// Generated-looking name, e.g. `Greeter$$Proxy`
    pub fn name(&self) -> String {
        format!("{}$$Proxy", self.primary.name())
    }

    /// Check if a method belongs to the proxy's call surface
    pub fn exposes(&self, method: &str) -> bool {
        let on_class = self.mode == ProxyMode::TargetClass
            && self
                .target_class
                .as_ref()
                .map(|class| class.find_method(method).is_some())
                .unwrap_or(false);

        on_class
            || self
                .interfaces
                .iter()
                .any(|interface| interface.find_method(method).is_some())
    }

    /// Names of every method callable through the proxy
    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.mode == ProxyMode::TargetClass {
            if let Some(class) = &self.target_class {
                names.extend(class.unique_methods().iter().map(|method| method.name()));
            }
        }
        for interface in &self.interfaces {
            for method in interface.unique_methods() {
                if !names.contains(&method.name()) {
                    names.push(method.name());
                }
            }
        }
        names
    }

    /// Check whether values of this proxy type can stand in for the named type
    pub fn is_assignable_to(&self, name: &str) -> bool {
        let via_class = self.mode == ProxyMode::TargetClass
            && self
                .target_class
                .as_ref()
                .map(|class| class.is_assignable_to(name))
                .unwrap_or(false);

        via_class
            || self
                .interfaces
                .iter()
                .any(|interface| interface.is_assignable_to(name))
    }
}

/// Decorator that routes every call through an interceptor chain before
/// delegating to an optional target.
///
/// The target is never handed out; the only way to reach it is a delegated call.
pub struct Proxy<T: ?Sized> {
    proxy_type: ProxyType,
    target: Option<Arc<T>>,
    interceptors: Arc<[Arc<dyn MethodInterceptor>]>,
}

impl<T: ?Sized> Proxy<T> {
    pub(crate) fn new(
        proxy_type: ProxyType,
        target: Option<Arc<T>>,
        interceptors: Arc<[Arc<dyn MethodInterceptor>]>,
    ) -> Self {
        Self {
            proxy_type,
            target,
            interceptors,
        }
    }

    pub fn proxy_type(&self) -> &ProxyType {
        &self.proxy_type
    }

    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Rebuild this proxy around a concrete target, keeping its type and chain
    pub fn bind(self, target: Arc<T>) -> Proxy<T> {
        Proxy {
            proxy_type: self.proxy_type,
            target: Some(target),
            interceptors: self.interceptors,
        }
    }

    /// Intercept a typed call. `call` runs against the target once the chain
    /// proceeds and its value is handed back as-is, without passing through
    /// the chain's [`Value`]. Only when an interceptor answers without
    /// proceeding is its value converted into `R`.
    pub fn call<R, F>(&self, method: &str, args: Vec<Value>, call: F) -> AopResult<R>
    where
        R: DeserializeOwned,
        F: Fn(&T) -> AopResult<R>,
    {
        let slot: RefCell<Option<R>> = RefCell::new(None);
        let value = self.dispatch(method, &args, &|target: &T, _: &[Value]| {
            let result = call(target)?;
            *slot.borrow_mut() = Some(result);
            Ok(Value::Null)
        })?;
        match slot.into_inner() {
            Some(result) => Ok(result),
            None => Ok(serde_json::from_value(value)?),
        }
    }

    /// Intercept a call with no result. Whatever the chain returns is discarded.
    pub fn call_void<F>(&self, method: &str, args: Vec<Value>, call: F) -> AopResult<()>
    where
        F: Fn(&T) -> AopResult<()>,
    {
        self.dispatch(method, &args, &|target: &T, _: &[Value]| {
            call(target)?;
            Ok(Value::Null)
        })?;
        Ok(())
    }

    fn dispatch(
        &self,
        method: &str,
        args: &[Value],
        call: &dyn Fn(&T, &[Value]) -> AopResult<Value>,
    ) -> AopResult<Value> {
        if !self.proxy_type.exposes(method) {
            return Err(AopError::no_such_method(self.proxy_type.name(), method));
        }

        tracing::trace!(proxy = %self.proxy_type.name(), method, "Dispatching proxied call");

        let joinpoint = |args: &[Value]| -> AopResult<Value> {
            match &self.target {
                Some(target) => call(target, args),
                None => Err(AopError::not_bound(self.proxy_type.name())),
            }
        };

        Invocation::new(method, args, &self.interceptors, &joinpoint).proceed()
    }
}

impl<T: ?Sized> Clone for Proxy<T> {
    fn clone(&self) -> Self {
        Self {
            proxy_type: self.proxy_type.clone(),
            target: self.target.clone(),
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("proxy_type", &self.proxy_type.name())
            .field("bound", &self.is_bound())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl<T> Component for Proxy<T>
where
    T: Component + ?Sized,
{
    fn descriptor(&self) -> &TypeDescriptor {
        self.proxy_type.primary()
    }

    fn invoke(&self, method: &str, args: &[Value]) -> AopResult<Value> {
        self.dispatch(method, args, &|target: &T, args: &[Value]| {
            target.invoke(method, args)
        })
    }

    fn proxy_type(&self) -> Option<&ProxyType> {
        Some(&self.proxy_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::MethodDescriptor;

    fn greeter() -> TypeDescriptor {
        TypeDescriptor::class("Greeter")
            .method(MethodDescriptor::new("greet"))
            .implements(TypeDescriptor::interface("Polite").method(MethodDescriptor::new("thank")))
    }

    #[test]
    fn test_class_mode_surface() {
        let class = greeter();
        let interfaces = class.interfaces().into_iter().cloned().collect();
        let ty = ProxyType::new(ProxyMode::TargetClass, Some(class.clone()), interfaces).unwrap();

        assert_eq!(ty.name(), "Greeter$$Proxy");
        assert!(ty.exposes("greet"));
        assert!(ty.exposes("thank"));
        assert!(!ty.exposes("shout"));
        assert_eq!(ty.method_names(), vec!["greet", "thank"]);
        assert!(ty.is_assignable_to("Greeter"));
        assert!(ty.is_assignable_to("Polite"));
    }

    #[test]
    fn test_interface_mode_surface() {
        let polite = TypeDescriptor::interface("Polite").method(MethodDescriptor::new("thank"));
        let ty = ProxyType::new(ProxyMode::Interfaces, Some(greeter()), vec![polite]).unwrap();

        assert_eq!(ty.primary().name(), "Polite");
        assert!(ty.exposes("thank"));
        assert!(!ty.exposes("greet"));
        assert!(!ty.is_assignable_to("Greeter"));
    }

    #[test]
    fn test_proxy_type_needs_a_surface() {
        assert!(matches!(
            ProxyType::new(ProxyMode::TargetClass, None, Vec::new()),
            Err(AopError::Configuration { .. })
        ));
        assert!(matches!(
            ProxyType::new(ProxyMode::Interfaces, Some(greeter()), Vec::new()),
            Err(AopError::Configuration { .. })
        ));
    }
}
