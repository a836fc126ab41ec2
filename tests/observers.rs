use named_di::{
    Container, ContainerOptions, DiError, DiObserver, FieldSpec, LoggingObserver, ProviderKind, Resolver,
    TypeTemplate,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl DiObserver for Recorder {
    fn resolving(&self, name: &str) {
        self.push(format!("resolving {}", name));
    }

    fn resolved(&self, name: &str, kind: ProviderKind, _duration: Duration) {
        self.push(format!("resolved {} ({})", name, kind));
    }

    fn not_found(&self, name: &str) {
        self.push(format!("not found {}", name));
    }

    fn factory_failed(&self, name: &str) {
        self.push(format!("factory failed {}", name));
    }

    fn field_defaulted(&self, _owner: &'static str, field: &'static str, dependency: &str) {
        self.push(format!("defaulted {} from {}", field, dependency));
    }

    fn failed(&self, name: &str, error: &DiError) {
        self.push(format!("failed {}: {}", name, error));
    }
}

#[derive(Debug, Default, Clone)]
struct Person {
    first_name: String,
    last_name: String,
}

fn person_template() -> TypeTemplate<Person> {
    TypeTemplate::new()
        .field(FieldSpec::value("FirstName", |p: &mut Person, v| p.first_name = v))
        .field(FieldSpec::value("LastName", |p: &mut Person, v| p.last_name = v))
}

#[test]
fn test_zero_fill_is_observable() {
    let recorder = Arc::new(Recorder::default());
    let container = Container::new();
    container.add_observer(recorder.clone());
    container.register_value("FirstName", "Ada".to_string());
    container.register_template("person", person_template());

    let person = container.get_value::<Person>("person").unwrap().unwrap();
    assert_eq!(person.first_name, "Ada");
    assert!(person.last_name.is_empty());

    assert_eq!(
        recorder.events(),
        vec![
            "resolving person",
            "resolving FirstName",
            "resolved FirstName (value)",
            "not found LastName",
            "defaulted LastName from LastName",
            "resolved person (template)",
        ]
    );
}

#[test]
fn test_factory_failure_is_observable() {
    let recorder = Arc::new(Recorder::default());
    let container = Container::new();
    container.add_observer(recorder.clone());
    container.register_factory::<String, _>("connection", |_| None);

    assert!(container.get("connection").unwrap().is_none());
    assert_eq!(recorder.events(), vec!["resolving connection", "factory failed connection"]);
}

#[test]
fn test_fatal_errors_are_observed() {
    let recorder = Arc::new(Recorder::default());
    let container = Container::new();
    container.add_observer(recorder.clone());
    container.register_factory("loop", |ctx| ctx.get_value::<u8>("loop").ok()?);

    assert!(container.get("loop").is_err());
    let events = recorder.events();
    assert_eq!(events.last().unwrap(), "failed loop: Circular dependency: loop -> loop");
}

#[test]
fn test_logging_observer_emits_tracing_events() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let container = Container::with_options(ContainerOptions::default().with_logging(true));
        container.add_observer(Arc::new(LoggingObserver::with_prefix("bootstrap")));
        container.register_value("FirstName", "Ada".to_string());
        container.register_template("person", person_template());

        let person = container.get_value::<Person>("person").unwrap().unwrap();
        assert_eq!(person.first_name, "Ada");
    });
}

#[test]
fn test_logging_observer_prefix() {
    assert_eq!(LoggingObserver::new().prefix(), "named-di");
    assert_eq!(LoggingObserver::with_prefix("app").prefix(), "app");
}
