use crate::aop::ProxyType;
use crate::errors::AopResult;
use crate::reflect::TypeDescriptor;
use serde_json::Value;
use std::fmt;

/// Reflective call surface of a container-managed object.
///
/// Implementors dispatch on the method name and report unknown names with
/// [`AopError::NoSuchMethod`](crate::errors::AopError::NoSuchMethod).
pub trait Component: Send + Sync + 'static {
    /// Static metadata of the concrete type
    fn descriptor(&self) -> &TypeDescriptor;

    /// Invoke a method by name
    fn invoke(&self, method: &str, args: &[Value]) -> AopResult<Value>;

    /// The proxy type, when this object is an interception proxy
    fn proxy_type(&self) -> Option<&ProxyType> {
        None
    }

    /// Check if this object is an interception proxy
    fn is_proxy(&self) -> bool {
        self.proxy_type().is_some()
    }

    /// Default text form: type name and address
    fn describe(&self) -> String {
        format!(
            "{}@{:x}",
            self.descriptor().name(),
            self as *const Self as *const () as usize
        )
    }
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_name", &self.descriptor().name())
            .field("is_proxy", &self.is_proxy())
            .finish()
    }
}
