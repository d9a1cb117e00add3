//! Components managed by the demo container.

use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use weave_core::{
    AopError, AopResult, Component, Marker, MethodDescriptor, Proxy, ProxyFactory, Reflect,
    TypeDescriptor,
};

/// Service whose every call is logged
#[derive(Debug, Default)]
pub struct LoggedTargetInstance;

impl LoggedTargetInstance {
    pub fn do_something(&self) -> String {
        "Hello World!".to_string()
    }
}

impl Reflect for LoggedTargetInstance {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::class("LoggedTargetInstance")
                .marked(Marker::Logged)
                .method(MethodDescriptor::new("do_something"))
        })
    }
}

impl Component for LoggedTargetInstance {
    fn descriptor(&self) -> &TypeDescriptor {
        Self::type_descriptor()
    }

    fn invoke(&self, method: &str, _args: &[Value]) -> AopResult<Value> {
        match method {
            "do_something" => Ok(json!(self.do_something())),
            other => Err(AopError::no_such_method(self.descriptor().name(), other)),
        }
    }
}

fn serializable() -> TypeDescriptor {
    TypeDescriptor::interface("Serializable")
}

/// Plain component; no marker, never proxied
#[derive(Debug, Default)]
pub struct Cart;

impl Reflect for Cart {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| TypeDescriptor::class("Cart").implements(serializable()))
    }
}

impl Component for Cart {
    fn descriptor(&self) -> &TypeDescriptor {
        Self::type_descriptor()
    }

    fn invoke(&self, method: &str, _args: &[Value]) -> AopResult<Value> {
        Err(AopError::no_such_method(self.descriptor().name(), method))
    }
}

/// Looked up and invoked by name at startup
#[derive(Debug, Default)]
pub struct MySuperAwesomeClass;

impl MySuperAwesomeClass {
    pub fn my_super_method(&self) -> String {
        "MySuperClass.mySuperMethod()".to_string()
    }
}

impl Reflect for MySuperAwesomeClass {
    fn type_descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            TypeDescriptor::class("MySuperAwesomeClass")
                .method(MethodDescriptor::new("my_super_method"))
        })
    }
}

impl Component for MySuperAwesomeClass {
    fn descriptor(&self) -> &TypeDescriptor {
        Self::type_descriptor()
    }

    fn invoke(&self, method: &str, _args: &[Value]) -> AopResult<Value> {
        match method {
            "my_super_method" => Ok(json!(self.my_super_method())),
            other => Err(AopError::no_such_method(self.descriptor().name(), other)),
        }
    }
}

/// Interface served only by proxies
pub trait Foo: Send + Sync {
    fn bar(&self) -> AopResult<()>;
}

impl Foo for Proxy<dyn Foo> {
    fn bar(&self) -> AopResult<()> {
        self.call_void("bar", Vec::new(), |target| target.bar())
    }
}

pub fn foo_interface() -> TypeDescriptor {
    TypeDescriptor::interface("Foo").method(MethodDescriptor::new("bar"))
}

/// Build a `Foo` with no target behind it; `factory` supplies the chain
pub fn foo_proxy(factory: ProxyFactory) -> AopResult<Arc<dyn Foo>> {
    let proxy: Proxy<dyn Foo> = factory.add_interface(foo_interface()).build(None)?;
    Ok(Arc::new(proxy))
}
