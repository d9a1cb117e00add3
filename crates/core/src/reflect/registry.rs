use crate::aop::scanner::InterceptionPolicy;
use crate::errors::{AopError, AopResult};
use crate::foundation::Component;
use crate::reflect::{MethodDescriptor, Reflect, TypeDescriptor};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Constructor registered for a type
pub type Constructor = fn() -> Arc<dyn Component>;

/// A registered type: its metadata, how to construct it and its interception policy
#[derive(Debug, Clone)]
pub struct ComponentClass {
    descriptor: &'static TypeDescriptor,
    constructor: Constructor,
    policy: InterceptionPolicy,
}

impl ComponentClass {
    /// Describe a type that can be default-constructed
    pub fn of<T>() -> Self
    where
        T: Reflect + Component + Default,
    {
        let descriptor = T::type_descriptor();
        Self {
            descriptor,
            constructor: || -> Arc<dyn Component> { Arc::new(T::default()) },
            policy: InterceptionPolicy::for_type(Some(descriptor)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Interception policy, computed once at registration
    pub fn policy(&self) -> InterceptionPolicy {
        self.policy
    }

    /// Construct a fresh, unproxied instance
    pub fn new_instance(&self) -> Arc<dyn Component> {
        (self.constructor)()
    }

    /// Look up a method by name
    pub fn find_method(&self, name: &str) -> AopResult<&'static MethodDescriptor> {
        self.descriptor
            .find_method(name)
            .ok_or_else(|| AopError::no_such_method(self.name(), name))
    }
}

/// Name-indexed registry of statically declared types
#[derive(Debug, Default)]
pub struct TypeRegistry {
    classes: BTreeMap<&'static str, ComponentClass>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under its descriptor name
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Reflect + Component + Default,
    {
        let class = ComponentClass::of::<T>();
        tracing::debug!(
            type_name = class.name(),
            policy = ?class.policy(),
            "Registered type"
        );
        self.classes.insert(class.name(), class);
        self
    }

    /// Look up a type by name
    pub fn for_name(&self, name: &str) -> AopResult<&ComponentClass> {
        self.classes
            .get(name)
            .ok_or_else(|| AopError::unknown_type(name))
    }

    /// Interception policy of a registered type
    pub fn policy(&self, name: &str) -> Option<InterceptionPolicy> {
        self.classes.get(name).map(ComponentClass::policy)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.classes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Marker;
    use serde_json::{json, Value};
    use std::sync::OnceLock;

    #[derive(Default)]
    struct Clock;

    impl Reflect for Clock {
        fn type_descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                TypeDescriptor::class("Clock")
                    .method(MethodDescriptor::new("now").marked(Marker::Logged))
            })
        }
    }

    impl Component for Clock {
        fn descriptor(&self) -> &TypeDescriptor {
            Self::type_descriptor()
        }

        fn invoke(&self, method: &str, _args: &[Value]) -> AopResult<Value> {
            match method {
                "now" => Ok(json!(42)),
                other => Err(AopError::no_such_method("Clock", other)),
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Clock>();

        let class = registry.for_name("Clock").unwrap();
        assert_eq!(class.policy(), InterceptionPolicy::Intercept);
        assert_eq!(registry.policy("Clock"), Some(InterceptionPolicy::Intercept));
        assert_eq!(registry.names(), vec!["Clock"]);

        let instance = class.new_instance();
        let method = class.find_method("now").unwrap();
        assert_eq!(instance.invoke(method.name(), &[]).unwrap(), json!(42));
        assert!(!instance.is_proxy());
    }

    #[test]
    fn test_unknown_names() {
        let mut registry = TypeRegistry::new();
        registry.register::<Clock>();

        assert!(matches!(
            registry.for_name("Calendar"),
            Err(AopError::UnknownType { .. })
        ));
        let class = registry.for_name("Clock").unwrap();
        assert!(class.find_method("tick").unwrap_err().is_no_such_method());
        assert_eq!(registry.policy("Calendar"), None);
    }
}
