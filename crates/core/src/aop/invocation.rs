use crate::aop::interceptor::MethodInterceptor;
use crate::errors::{AopError, AopResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Final step of an interceptor chain: the call on the target
pub type Joinpoint<'a> = dyn Fn(&[Value]) -> AopResult<Value> + 'a;

/// One proxied call travelling through the interceptor chain.
///
/// Each interceptor receives the invocation and decides whether to call
/// [`Invocation::proceed`]. Once the last interceptor proceeds, the joinpoint
/// runs and its result is recorded as the return value.
pub struct Invocation<'a> {
    method: &'a str,
    arguments: &'a [Value],
    interceptors: &'a [Arc<dyn MethodInterceptor>],
    joinpoint: &'a Joinpoint<'a>,
    index: usize,
    return_value: Option<Value>,
}

impl<'a> Invocation<'a> {
    pub fn new(
        method: &'a str,
        arguments: &'a [Value],
        interceptors: &'a [Arc<dyn MethodInterceptor>],
        joinpoint: &'a Joinpoint<'a>,
    ) -> Self {
        Self {
            method,
            arguments,
            interceptors,
            joinpoint,
            index: 0,
            return_value: None,
        }
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn arguments(&self) -> &[Value] {
        self.arguments
    }

    /// Deserialize the argument at `index`
    pub fn argument<T: DeserializeOwned>(&self, index: usize) -> AopResult<T> {
        argument(self.method, self.arguments, index)
    }

    /// Value returned by the joinpoint, once it has run successfully
    pub fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    /// Run the next interceptor, or the joinpoint when none are left
    pub fn proceed(&mut self) -> AopResult<Value> {
        let interceptors = self.interceptors;
        match interceptors.get(self.index) {
            Some(next) => {
                self.index += 1;
                next.invoke(self)
            }
            None => {
                let value = (self.joinpoint)(self.arguments)?;
                self.return_value = Some(value.clone());
                Ok(value)
            }
        }
    }
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("method", &self.method)
            .field("arguments", &self.arguments)
            .field("index", &self.index)
            .field("interceptors", &self.interceptors.len())
            .field("return_value", &self.return_value)
            .finish()
    }
}

/// Deserialize a positional argument of a reflective call
pub fn argument<T: DeserializeOwned>(method: &str, args: &[Value], index: usize) -> AopResult<T> {
    let value = args.get(index).ok_or_else(|| {
        AopError::invalid_arguments(
            method,
            format!("expected an argument at position {index}, got {}", args.len()),
        )
    })?;
    serde_json::from_value(value.clone())
        .map_err(|err| AopError::invalid_arguments(method, format!("argument {index}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aop::interceptor::advice;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_empty_chain_runs_joinpoint() {
        let args = vec![json!(2), json!(3)];
        let joinpoint = |args: &[Value]| -> AopResult<Value> {
            let a: i64 = argument("add", args, 0)?;
            let b: i64 = argument("add", args, 1)?;
            Ok(json!(a + b))
        };
        let mut invocation = Invocation::new("add", &args, &[], &joinpoint);

        assert_eq!(invocation.proceed().unwrap(), json!(5));
        assert_eq!(invocation.return_value(), Some(&json!(5)));
    }

    #[test]
    fn test_interceptors_run_in_order() {
        let trail = Arc::new(Mutex::new(Vec::new()));
        let outer_trail = trail.clone();
        let inner_trail = trail.clone();
        let interceptors: Vec<Arc<dyn MethodInterceptor>> = vec![
            Arc::new(advice(move |invocation| {
                outer_trail.lock().unwrap().push("outer");
                invocation.proceed()
            })),
            Arc::new(advice(move |invocation| {
                inner_trail.lock().unwrap().push("inner");
                invocation.proceed()
            })),
        ];
        let joinpoint_trail = trail.clone();
        let joinpoint = move |_: &[Value]| -> AopResult<Value> {
            joinpoint_trail.lock().unwrap().push("target");
            Ok(Value::Null)
        };

        let mut invocation = Invocation::new("run", &[], &interceptors, &joinpoint);
        invocation.proceed().unwrap();

        assert_eq!(*trail.lock().unwrap(), vec!["outer", "inner", "target"]);
    }

    #[test]
    fn test_short_circuit_skips_joinpoint() {
        let interceptors: Vec<Arc<dyn MethodInterceptor>> =
            vec![Arc::new(advice(|_| Ok(json!("hello"))))];
        let joinpoint = |_: &[Value]| -> AopResult<Value> { panic!("target must not run") };

        let mut invocation = Invocation::new("bar", &[], &interceptors, &joinpoint);
        assert_eq!(invocation.proceed().unwrap(), json!("hello"));
        assert!(invocation.return_value().is_none());
    }

    #[test]
    fn test_argument_errors() {
        let args = vec![json!("text")];
        let missing = argument::<String>("greet", &args, 1).unwrap_err();
        assert!(matches!(missing, AopError::InvalidArguments { .. }));

        let wrong_type = argument::<u32>("greet", &args, 0).unwrap_err();
        assert!(matches!(wrong_type, AopError::InvalidArguments { .. }));

        let ok: String = argument("greet", &args, 0).unwrap();
        assert_eq!(ok, "text");
    }
}
