use crate::container::{Candidate, Container, PreparationHook};
use crate::errors::AopResult;
use crate::foundation::Component;
use crate::reflect::Reflect;
use std::sync::Arc;

/// Builder for constructing containers with candidates and hooks
#[derive(Default)]
pub struct ContainerBuilder {
    candidates: Vec<Candidate>,
    hooks: Vec<Arc<dyn PreparationHook>>,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate
    pub fn add_candidate(mut self, candidate: Candidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Add a default-constructible component under a name
    pub fn add_component<T>(self, name: impl Into<String>) -> Self
    where
        T: Reflect + Component + Default,
    {
        self.add_candidate(Candidate::of::<T>(name))
    }

    /// Add a preparation hook
    pub fn add_hook<H>(mut self, hook: H) -> Self
    where
        H: PreparationHook + 'static,
    {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Build the container; duplicate candidate names are rejected
    pub fn build(self) -> AopResult<Container> {
        let mut container = Container::new();
        for hook in self.hooks {
            container.add_hook(hook);
        }
        for candidate in self.candidates {
            container.register(candidate)?;
        }
        Ok(container)
    }

    /// Build the container and prepare every candidate
    pub fn build_and_refresh(self) -> AopResult<Container> {
        let mut container = self.build()?;
        container.refresh()?;
        Ok(container)
    }
}
