use crate::aop::scanner::InterceptionPolicy;
use crate::aop::ProxyType;
use crate::errors::AopResult;
use crate::foundation::Component;
use crate::reflect::{ComponentClass, Reflect, TypeDescriptor};
use std::fmt;
use std::sync::Arc;

/// Factory function for creating candidate instances
pub type CandidateFactory = Box<dyn Fn() -> AopResult<Arc<dyn Component>> + Send + Sync>;

/// Named object definition known to the container before construction
pub struct Candidate {
    name: String,
    declared_type: TypeDescriptor,
    policy: InterceptionPolicy,
    factory: CandidateFactory,
}

impl Candidate {
    /// Create a candidate from a declared type and a factory
    pub fn new<F>(name: impl Into<String>, declared_type: TypeDescriptor, factory: F) -> Self
    where
        F: Fn() -> AopResult<Arc<dyn Component>> + Send + Sync + 'static,
    {
        let policy = InterceptionPolicy::for_type(Some(&declared_type));
        Self {
            name: name.into(),
            declared_type,
            policy,
            factory: Box::new(factory),
        }
    }

    /// Create a candidate for a default-constructible component type
    pub fn of<T>(name: impl Into<String>) -> Self
    where
        T: Reflect + Component + Default,
    {
        Self::new(name, T::type_descriptor().clone(), || -> AopResult<Arc<dyn Component>> {
            Ok(Arc::new(T::default()))
        })
    }

    /// Create a candidate from a registered type
    pub fn from_class(name: impl Into<String>, class: &ComponentClass) -> Self {
        let class = class.clone();
        Self::new(name, class.descriptor().clone(), move || Ok(class.new_instance()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.declared_type
    }

    /// Record an explicit interception policy instead of the derived one
    pub fn with_policy(mut self, policy: InterceptionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Interception policy derived from the declared type at registration
    pub fn policy(&self) -> InterceptionPolicy {
        self.policy
    }

    pub fn is_interceptable(&self) -> bool {
        self.policy.is_intercepted()
    }

    /// Construct a new raw instance
    pub fn create(&self) -> AopResult<Arc<dyn Component>> {
        (self.factory)()
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type.name())
            .field("policy", &self.policy)
            .finish()
    }
}

/// The type the rest of the system sees for a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// The declared type, unchanged
    Declared(TypeDescriptor),
    /// A proxy standing in for the declared type
    Proxied(ProxyType),
}

impl ResolvedType {
    pub fn name(&self) -> String {
        match self {
            ResolvedType::Declared(ty) => ty.name().to_string(),
            ResolvedType::Proxied(proxy) => proxy.name(),
        }
    }

    pub fn is_proxied(&self) -> bool {
        matches!(self, ResolvedType::Proxied(_))
    }

    /// Check whether the resolved type can stand in for the named type
    pub fn is_assignable_to(&self, name: &str) -> bool {
        match self {
            ResolvedType::Declared(ty) => ty.is_assignable_to(name),
            ResolvedType::Proxied(proxy) => proxy.is_assignable_to(name),
        }
    }
}
