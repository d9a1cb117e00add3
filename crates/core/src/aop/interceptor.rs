use crate::aop::invocation::Invocation;
use crate::aop::sink::ConsoleSink;
use crate::errors::AopResult;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Around-advice applied to every call that passes through a proxy
pub trait MethodInterceptor: Send + Sync {
    /// Handle the call; call `invocation.proceed()` to continue down the chain
    fn invoke(&self, invocation: &mut Invocation<'_>) -> AopResult<Value>;

    /// Optional interceptor name for debugging
    fn name(&self) -> &'static str {
        "MethodInterceptor"
    }
}

impl fmt::Debug for dyn MethodInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInterceptor")
            .field("name", &self.name())
            .finish()
    }
}

/// Interceptor backed by a closure
pub struct FnInterceptor<F> {
    handler: F,
}

impl<F> MethodInterceptor for FnInterceptor<F>
where
    F: Fn(&mut Invocation<'_>) -> AopResult<Value> + Send + Sync,
{
    fn invoke(&self, invocation: &mut Invocation<'_>) -> AopResult<Value> {
        (self.handler)(invocation)
    }

    fn name(&self) -> &'static str {
        "FnInterceptor"
    }
}

/// Turn a closure into an interceptor
pub fn advice<F>(handler: F) -> FnInterceptor<F>
where
    F: Fn(&mut Invocation<'_>) -> AopResult<Value> + Send + Sync,
{
    FnInterceptor { handler }
}

/// Writes `before <method>` and `after <method>` around the delegated call.
///
/// The result is returned unchanged. A failed call propagates its error and
/// skips the `after` line.
#[derive(Clone)]
pub struct LoggingInterceptor {
    sink: Arc<dyn ConsoleSink>,
}

impl LoggingInterceptor {
    pub fn new(sink: Arc<dyn ConsoleSink>) -> Self {
        Self { sink }
    }
}

impl fmt::Debug for LoggingInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingInterceptor").finish_non_exhaustive()
    }
}

impl MethodInterceptor for LoggingInterceptor {
    fn invoke(&self, invocation: &mut Invocation<'_>) -> AopResult<Value> {
        let method = invocation.method().to_string();

        self.sink.write_line(&format!("before {method}"));
        let result = invocation.proceed();
        match &result {
            Ok(_) => self.sink.write_line(&format!("after {method}")),
            Err(err) => tracing::debug!(method = %method, error = %err, "Intercepted call failed"),
        }

        result
    }

    fn name(&self) -> &'static str {
        "LoggingInterceptor"
    }
}
