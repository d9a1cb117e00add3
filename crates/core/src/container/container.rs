use crate::container::candidate::{Candidate, ResolvedType};
use crate::container::hook::PreparationHook;
use crate::errors::{AopError, AopResult};
use crate::foundation::{Component, LifecycleManager, LifecycleState};
use crate::reflect::Reflect;
use std::collections::HashMap;
use std::sync::Arc;

/// Container holding named candidates and the hooks that prepare them.
///
/// Each candidate is prepared at most once; the prepared object (possibly a
/// proxy) replaces the raw instance for every later lookup.
pub struct Container {
    candidates: Vec<Candidate>,
    index: HashMap<String, usize>,
    hooks: Vec<Arc<dyn PreparationHook>>,
    resolved: HashMap<String, ResolvedType>,
    instances: HashMap<String, Arc<dyn Component>>,
    lifecycle: LifecycleManager,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            index: HashMap::new(),
            hooks: Vec::new(),
            resolved: HashMap::new(),
            instances: HashMap::new(),
            lifecycle: LifecycleManager::new(),
        }
    }

    /// Register a candidate; names must be unique
    pub fn register(&mut self, candidate: Candidate) -> AopResult<()> {
        if self.index.contains_key(candidate.name()) {
            return Err(AopError::DuplicateCandidate {
                name: candidate.name().to_string(),
            });
        }

        tracing::debug!(
            candidate = candidate.name(),
            declared_type = candidate.declared_type().name(),
            policy = ?candidate.policy(),
            "Registered candidate"
        );
        self.index
            .insert(candidate.name().to_string(), self.candidates.len());
        self.candidates.push(candidate);
        Ok(())
    }

    /// Register a default-constructible component type under a name
    pub fn register_component<T>(&mut self, name: impl Into<String>) -> AopResult<()>
    where
        T: Reflect + Component + Default,
    {
        self.register(Candidate::of::<T>(name))
    }

    /// Add a preparation hook; hooks run in registration order
    pub fn add_hook(&mut self, hook: Arc<dyn PreparationHook>) {
        tracing::debug!(hook = hook.name(), "Added preparation hook");
        self.hooks.push(hook);
    }

    pub fn candidate(&self, name: &str) -> AopResult<&Candidate> {
        self.index
            .get(name)
            .map(|&idx| &self.candidates[idx])
            .ok_or_else(|| AopError::candidate_not_found(name))
    }

    /// Candidate names in registration order
    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates.iter().map(Candidate::name).collect()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Resolve the type of a candidate without constructing it
    pub fn resolve_type(&mut self, name: &str) -> AopResult<ResolvedType> {
        if let Some(resolved) = self.resolved.get(name) {
            return Ok(resolved.clone());
        }

        let candidate = self.candidate(name)?;
        let mut resolved = ResolvedType::Declared(candidate.declared_type().clone());
        for hook in &self.hooks {
            resolved = hook.determine_type(candidate, resolved)?;
        }

        self.resolved.insert(name.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// Construct and post-process a candidate, or return the prepared object
    pub fn prepare(&mut self, name: &str) -> AopResult<Arc<dyn Component>> {
        if let Some(instance) = self.instances.get(name) {
            return Ok(instance.clone());
        }

        let resolved = self.resolve_type(name)?;
        let candidate = self.candidate(name)?;
        let mut instance = candidate.create()?;
        for hook in &self.hooks {
            instance = hook.after_initialization(candidate, instance)?;
        }

        if let ResolvedType::Proxied(expected) = &resolved {
            match instance.proxy_type() {
                Some(actual) if actual == expected => {}
                actual => {
                    return Err(AopError::TypeMismatch {
                        name: name.to_string(),
                        expected: expected.name(),
                        actual: actual
                            .map(|proxy| proxy.name())
                            .unwrap_or_else(|| instance.descriptor().name().to_string()),
                    });
                }
            }
        }

        tracing::debug!(
            candidate = name,
            resolved_type = %resolved.name(),
            proxied = instance.is_proxy(),
            "Prepared candidate"
        );
        self.instances.insert(name.to_string(), instance.clone());
        Ok(instance)
    }

    /// Prepare every candidate in registration order
    pub fn refresh(&mut self) -> AopResult<()> {
        self.lifecycle.transition(LifecycleState::Refreshing);

        let names: Vec<String> = self.candidates.iter().map(|c| c.name().to_string()).collect();
        for name in &names {
            if let Err(err) = self.prepare(name) {
                tracing::error!(candidate = %name, error = %err, "Failed to prepare candidate");
                self.lifecycle.transition(LifecycleState::Failed);
                return Err(err);
            }
        }

        self.lifecycle.transition(LifecycleState::Running);
        tracing::info!(candidates = names.len(), "Container refreshed");
        Ok(())
    }

    /// Look up a prepared object
    pub fn get(&self, name: &str) -> AopResult<Arc<dyn Component>> {
        match self.instances.get(name) {
            Some(instance) => Ok(instance.clone()),
            None if self.index.contains_key(name) => Err(AopError::CandidateNotPrepared {
                name: name.to_string(),
            }),
            None => Err(AopError::candidate_not_found(name)),
        }
    }

    /// Check if a prepared candidate was replaced by a proxy
    pub fn is_proxied(&self, name: &str) -> bool {
        self.instances
            .get(name)
            .map(|instance| instance.is_proxy())
            .unwrap_or(false)
    }

    /// Drop every prepared object
    pub fn shutdown(&mut self) {
        let released = self.instances.len();
        self.instances.clear();
        self.lifecycle.transition(LifecycleState::Stopped);
        tracing::info!(released, "Container stopped");
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("candidates", &self.candidate_names())
            .field("hooks", &self.hooks.len())
            .field("prepared", &self.instances.len())
            .field("state", &self.lifecycle.state())
            .finish()
    }
}
