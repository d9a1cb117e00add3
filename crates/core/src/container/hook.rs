use crate::aop::builder::InterceptionProxyBuilder;
use crate::aop::scanner::InterceptionPolicy;
use crate::aop::sink::ConsoleSink;
use crate::container::candidate::{Candidate, ResolvedType};
use crate::errors::AopResult;
use crate::foundation::Component;
use std::sync::Arc;

/// Integration point invoked while the container prepares a candidate.
///
/// `determine_type` runs at type resolution time, before any instance exists.
/// `after_initialization` runs once the raw instance has been constructed and
/// may return a replacement for it.
pub trait PreparationHook: Send + Sync {
    /// Adjust the type other parts of the container will see for a candidate
    fn determine_type(
        &self,
        candidate: &Candidate,
        resolved: ResolvedType,
    ) -> AopResult<ResolvedType> {
        let _ = candidate;
        Ok(resolved)
    }

    /// Replace or decorate a freshly constructed instance
    fn after_initialization(
        &self,
        candidate: &Candidate,
        instance: Arc<dyn Component>,
    ) -> AopResult<Arc<dyn Component>> {
        let _ = candidate;
        Ok(instance)
    }

    /// Optional hook name for debugging
    fn name(&self) -> &'static str {
        "PreparationHook"
    }
}

/// Replaces candidates carrying the `Logged` marker with logging proxies.
///
/// Both call sites follow the policy the candidate recorded at registration
/// and use the same builder, so the type resolved up front is exactly the
/// type of the proxy built later.
#[derive(Debug, Clone)]
pub struct LoggedProxyHook {
    builder: InterceptionProxyBuilder,
}

impl LoggedProxyHook {
    pub fn new(sink: Arc<dyn ConsoleSink>) -> Self {
        Self {
            builder: InterceptionProxyBuilder::new(sink),
        }
    }

    pub fn builder(&self) -> &InterceptionProxyBuilder {
        &self.builder
    }
}

impl PreparationHook for LoggedProxyHook {
    fn determine_type(
        &self,
        candidate: &Candidate,
        resolved: ResolvedType,
    ) -> AopResult<ResolvedType> {
        match resolved {
            ResolvedType::Declared(ty) if candidate.is_interceptable() => {
                let proxy_type = self.builder.proxy_type(&ty)?;
                tracing::debug!(candidate = candidate.name(), proxy = %proxy_type.name(), "Resolved candidate to proxy type");
                Ok(ResolvedType::Proxied(proxy_type))
            }
            other => Ok(other),
        }
    }

    fn after_initialization(
        &self,
        candidate: &Candidate,
        instance: Arc<dyn Component>,
    ) -> AopResult<Arc<dyn Component>> {
        if instance.is_proxy() {
            return Ok(instance);
        }

        let ty = instance.descriptor().clone();
        // A factory may hand back a different type than the one declared.
        let policy = if &ty == candidate.declared_type() {
            candidate.policy()
        } else {
            InterceptionPolicy::for_type(Some(&ty))
        };
        if !policy.is_intercepted() {
            return Ok(instance);
        }

        let proxy = self.builder.build_proxy(Some(instance), &ty)?;
        tracing::debug!(candidate = candidate.name(), proxy = %proxy.proxy_type().name(), "Wrapped candidate in proxy");
        let proxied: Arc<dyn Component> = Arc::new(proxy);
        Ok(proxied)
    }

    fn name(&self) -> &'static str {
        "LoggedProxyHook"
    }
}
