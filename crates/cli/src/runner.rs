use crate::components::{foo_proxy, Cart, Foo, LoggedTargetInstance, MySuperAwesomeClass};
use serde_json::{json, Value};
use std::sync::Arc;
use weave_core::{
    advice, AopResult, AppConfig, ConsoleSink, Container, ContainerBuilder, LoggedProxyHook,
    ProxyFactory, ResourceLoader, TypeRegistry,
};

/// Name of the bundled text resource printed at startup
pub const MESSAGE_RESOURCE: &str = "/message";

const BUNDLED_MESSAGE: &str = include_str!("../resources/message");

/// Everything the startup run needs, wired together
pub struct DemoApplication {
    container: Container,
    registry: TypeRegistry,
    resources: ResourceLoader,
    sink: Arc<dyn ConsoleSink>,
}

impl DemoApplication {
    /// Register components and hooks, then prepare every candidate
    pub fn bootstrap(config: &AppConfig, sink: Arc<dyn ConsoleSink>) -> AopResult<Self> {
        let container = ContainerBuilder::new()
            .add_hook(LoggedProxyHook::new(sink.clone()))
            .add_component::<Cart>("cart")
            .add_component::<LoggedTargetInstance>("loggedTargetInstance")
            .build_and_refresh()?;

        let mut registry = TypeRegistry::new();
        registry
            .register::<MySuperAwesomeClass>()
            .register::<LoggedTargetInstance>()
            .register::<Cart>();

        let mut resources = ResourceLoader::new().with_bundled(MESSAGE_RESOURCE, BUNDLED_MESSAGE);
        if let Some(dir) = &config.resource_dir {
            resources = resources.with_base_dir(dir);
        }

        tracing::info!(
            candidates = container.candidate_count(),
            types = registry.len(),
            "Demo application bootstrapped"
        );

        Ok(Self {
            container,
            registry,
            resources,
            sink,
        })
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Run every demonstration step in order; the first failure stops the run
    pub fn run(&self) -> AopResult<()> {
        self.call_logged_target()?;
        self.call_interface_proxy()?;
        self.print_resource()?;
        self.invoke_by_name()?;
        Ok(())
    }

    fn call_logged_target(&self) -> AopResult<Value> {
        let target = self.container.get("loggedTargetInstance")?;
        target.invoke("do_something", &[])
    }

    fn call_interface_proxy(&self) -> AopResult<()> {
        let sink = self.sink.clone();
        let foo = foo_proxy(ProxyFactory::new().add_advice(advice(move |invocation| {
            sink.write_line(&format!("invoking {}", invocation.method()));
            Ok(json!("hello"))
        })))?;
        foo.bar()
    }

    fn print_resource(&self) -> AopResult<()> {
        let content = self.resources.load(MESSAGE_RESOURCE)?;
        self.sink.write_line(&format!("content: {content}"));
        Ok(())
    }

    fn invoke_by_name(&self) -> AopResult<()> {
        let class = self.registry.for_name("MySuperAwesomeClass")?;
        let instance = class.new_instance();
        self.sink.write_line(&instance.describe());

        let method = class.find_method("my_super_method")?;
        let result = instance.invoke(method.name(), &[])?;
        self.sink.write_line(&display_value(&result));
        Ok(())
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_core::MemorySink;

    fn app() -> (Arc<MemorySink>, DemoApplication) {
        let sink = Arc::new(MemorySink::new());
        let app = DemoApplication::bootstrap(&AppConfig::testing(), sink.clone()).unwrap();
        (sink, app)
    }

    #[test]
    fn test_bootstrap_proxies_only_marked_candidates() {
        let (sink, app) = app();

        assert!(app.container().is_proxied("loggedTargetInstance"));
        assert!(!app.container().is_proxied("cart"));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_run_output() {
        let (sink, app) = app();

        app.run().unwrap();

        let lines = sink.lines();
        assert_eq!(
            &lines[..4],
            &[
                "before do_something".to_string(),
                "after do_something".to_string(),
                "invoking bar".to_string(),
                format!("content: {BUNDLED_MESSAGE}"),
            ]
        );
        assert!(lines[4].starts_with("MySuperAwesomeClass@"));
        assert_eq!(lines[5], "MySuperClass.mySuperMethod()");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_logged_target_returns_real_result() {
        let (_, app) = app();
        assert_eq!(app.call_logged_target().unwrap(), json!("Hello World!"));
    }

    #[test]
    fn test_resource_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("message"), "overridden").unwrap();

        let sink = Arc::new(MemorySink::new());
        let mut config = AppConfig::testing();
        config.resource_dir = Some(dir.path().to_path_buf());
        let app = DemoApplication::bootstrap(&config, sink.clone()).unwrap();
        app.print_resource().unwrap();

        assert_eq!(sink.lines(), vec!["content: overridden"]);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("text")), "text");
        assert_eq!(display_value(&json!(3)), "3");
    }
}
