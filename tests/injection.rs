use named_di::{Container, DiError, FieldSpec, Injectable, Resolver, Shape, TypeTemplate};
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq)]
struct MyService {
    some_value: i32,
    other_value: String,
}

impl Injectable for MyService {
    fn template() -> TypeTemplate<Self> {
        TypeTemplate::new()
            .field(FieldSpec::value("SomeValue", |s: &mut MyService, v| s.some_value = v).inject("foo"))
            .field(FieldSpec::value("OtherValue", |s: &mut MyService, v| s.other_value = v).inject("bar"))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Child {
    some_value: i32,
}

impl Injectable for Child {
    fn template() -> TypeTemplate<Self> {
        TypeTemplate::new().field(FieldSpec::value("SomeValue", |c: &mut Child, v| c.some_value = v).inject("foo"))
    }
}

/// Holds the child by value
#[derive(Debug, Default, Clone)]
struct Parent {
    child: Child,
}

impl Injectable for Parent {
    fn template() -> TypeTemplate<Self> {
        TypeTemplate::new().field(FieldSpec::value("Child", |p: &mut Parent, v| p.child = v))
    }
}

/// Holds the child by reference
#[derive(Debug, Default, Clone)]
struct Parent2 {
    child: Option<Arc<Child>>,
}

impl Injectable for Parent2 {
    fn template() -> TypeTemplate<Self> {
        TypeTemplate::new().field(FieldSpec::reference("Child", |p: &mut Parent2, v| p.child = Some(v)))
    }
}

#[derive(Debug, Default, Clone)]
struct Parent3 {
    child: Child,
    some_value: String,
}

impl Injectable for Parent3 {
    fn template() -> TypeTemplate<Self> {
        TypeTemplate::new()
            .field(FieldSpec::value("Child", |p: &mut Parent3, v| p.child = v))
            .field(FieldSpec::value("SomeValue", |p: &mut Parent3, v| p.some_value = v).inject("bar"))
    }
}

fn bootstrap() -> Container {
    let container = Container::new();
    container
        .register_value("foo", 1i32)
        .register_value("bar", "baz".to_string())
        .register_type::<MyService>("myService")
        .register_type::<Child>("Child")
        .register_type::<Parent>("Parent")
        .register_type::<Parent2>("Parent2")
        .register_type::<Parent3>("Parent3");
    container
}

#[test]
fn test_template_fields_use_overrides() {
    let container = bootstrap();

    let service = container.get_shared::<MyService>("myService").unwrap().unwrap();
    assert_eq!(service.some_value, 1);
    assert_eq!(service.other_value, "baz");
}

#[test]
fn test_template_instances_are_reference_shaped() {
    let container = bootstrap();
    let instance = container.must_get("myService").unwrap();
    assert_eq!(instance.shape(), Shape::Reference);
    assert!(instance.is::<MyService>());
}

#[test]
fn test_nested_templates() {
    let container = bootstrap();

    let parent = container.get_value::<Parent>("Parent").unwrap().unwrap();
    assert_eq!(parent.child.some_value, 1);

    let parent2 = container.get_value::<Parent2>("Parent2").unwrap().unwrap();
    assert_eq!(parent2.child.unwrap().some_value, 1);

    let parent3 = container.get_value::<Parent3>("Parent3").unwrap().unwrap();
    assert_eq!(parent3.child.some_value, 1);
    assert_eq!(parent3.some_value, "baz");
}

#[test]
fn test_missing_fields_are_zero_filled() {
    #[derive(Debug, Default, Clone)]
    struct Person {
        first_name: String,
        last_name: String,
    }

    let container = Container::new();
    container.register_template(
        "person",
        TypeTemplate::new()
            .field(FieldSpec::value("FirstName", |p: &mut Person, v| p.first_name = v))
            .field(FieldSpec::value("LastName", |p: &mut Person, v| p.last_name = v)),
    );

    let person = container.get("person").unwrap();
    assert!(person.is_some());
    let person = person.unwrap();
    let person = person.downcast_ref::<Person>().unwrap();
    assert_eq!(person.first_name, "");
    assert_eq!(person.last_name, "");
}

#[test]
fn test_missing_reference_field_stays_none() {
    let container = Container::new();
    container.register_type::<Parent2>("Parent2");

    let parent = container.get_value::<Parent2>("Parent2").unwrap().unwrap();
    assert!(parent.child.is_none());
}

#[test]
fn test_override_ignores_field_name() {
    #[derive(Debug, Default, Clone)]
    struct Account {
        id: String,
    }

    let container = Container::new();
    container.register_value("accountId", "ABC123".to_string());
    container.register_value("id", "wrong".to_string());
    container.register_template(
        "account",
        TypeTemplate::new().field(FieldSpec::value("id", |a: &mut Account, v| a.id = v).inject("accountId")),
    );

    let account = container.get_value::<Account>("account").unwrap().unwrap();
    assert_eq!(account.id, "ABC123");
}

#[test]
fn test_template_resolutions_are_distinct() {
    let container = bootstrap();

    let a = container.must_get("myService").unwrap();
    let b = container.must_get("myService").unwrap();
    assert!(!a.ptr_eq(&b));
    assert_eq!(a.downcast_ref::<MyService>(), b.downcast_ref::<MyService>());
}

#[test]
fn test_reference_field_gets_private_copy_of_value() {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Settings {
        retries: u32,
    }

    #[derive(Default)]
    struct Client {
        settings: Option<Arc<Settings>>,
    }

    let container = Container::new();
    container.register_value("settings", Settings { retries: 3 });
    let template = TypeTemplate::new()
        .field(FieldSpec::reference("settings", |c: &mut Client, v| c.settings = Some(v)));

    let mut client = container.inject_with(&template).unwrap();
    let settings = client.settings.as_mut().unwrap();

    // The copy is owned by the field alone
    Arc::get_mut(settings).unwrap().retries = 10;
    assert_eq!(settings.retries, 10);

    let registered = container.get("settings").unwrap().unwrap();
    assert_eq!(registered.downcast_ref::<Settings>(), Some(&Settings { retries: 3 }));
}

#[test]
fn test_reference_field_aliases_shared_value() {
    #[derive(Debug, Clone)]
    struct Pool {
        name: String,
    }

    #[derive(Default)]
    struct Repo {
        pool: Option<Arc<Pool>>,
    }

    let pool = Arc::new(Pool { name: "main".into() });
    let container = Container::new();
    container.register_shared("pool", pool.clone());

    let template = TypeTemplate::new().field(FieldSpec::reference("pool", |r: &mut Repo, v| r.pool = Some(v)));
    let repo = container.inject_with(&template).unwrap();

    let injected = repo.pool.unwrap();
    assert!(Arc::ptr_eq(&pool, &injected));
    assert_eq!(injected.name, "main");
}

#[test]
fn test_value_field_dereferences_shared_value() {
    #[derive(Default)]
    struct Holder {
        greeting: String,
    }

    let container = Container::new();
    container.register_shared("greeting", Arc::new("hello".to_string()));

    let template = TypeTemplate::new().field(FieldSpec::value("greeting", |h: &mut Holder, v| h.greeting = v));
    let holder = container.inject_with(&template).unwrap();
    assert_eq!(holder.greeting, "hello");
}

#[test]
fn test_factory_backed_field() {
    #[derive(Default)]
    struct Handler {
        request_count: u64,
    }

    let container = Container::new();
    container.register_factory("request_count", |_| Some(99u64));

    let template =
        TypeTemplate::new().field(FieldSpec::value("request_count", |h: &mut Handler, v| h.request_count = v));
    assert_eq!(container.inject_with(&template).unwrap().request_count, 99);
}

#[test]
fn test_failed_factory_field_is_zero_filled() {
    #[derive(Default)]
    struct Handler {
        conn: Option<Arc<String>>,
        name: String,
    }

    let container = Container::new();
    container.register_factory::<String, _>("connection", |_| None);
    container.register_value("name", "handler".to_string());

    let template = TypeTemplate::new()
        .field(FieldSpec::reference("conn", |h: &mut Handler, v| h.conn = Some(v)).inject("connection"))
        .field(FieldSpec::value("name", |h: &mut Handler, v| h.name = v));

    let handler = container.inject_with(&template).unwrap();
    assert!(handler.conn.is_none());
    assert_eq!(handler.name, "handler");
}

#[test]
fn test_inject_unregistered_type() {
    let container = Container::new();
    container.register_value("foo", 5i32).register_value("bar", "qux".to_string());

    let service: MyService = container.inject().unwrap();
    assert_eq!(
        service,
        MyService {
            some_value: 5,
            other_value: "qux".to_string()
        }
    );
    assert!(!container.contains("MyService"));
}

#[test]
fn test_type_mismatch_is_fatal() {
    let container = Container::new();
    container.register_value("foo", "not a number".to_string());
    container.register_type::<Child>("Child");

    match container.get("Child") {
        Err(DiError::TypeMismatch { path, dependency, expected, found }) => {
            assert!(path.ends_with("Child.SomeValue"), "unexpected path {}", path);
            assert_eq!(dependency, "foo");
            assert_eq!(expected, "i32");
            assert_eq!(found, "alloc::string::String");
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_nested_type_mismatch_aborts_outer_construction() {
    let container = Container::new();
    container.register_value("foo", 1u64); // Child wants i32
    container.register_value("bar", "baz".to_string());
    container.register_type::<Child>("Child");
    container.register_type::<Parent3>("Parent3");

    let err = container.get("Parent3").unwrap_err();
    assert!(matches!(err, DiError::TypeMismatch { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_template_introspection() {
    let container = bootstrap();
    let descriptors = container.descriptors();

    let service = descriptors.iter().find(|d| d.name == "myService").unwrap();
    assert!(service.is_template());
    assert_eq!(service.dependencies().collect::<Vec<_>>(), ["foo", "bar"]);
    assert_eq!(service.fields[0].field, "SomeValue");
    assert_eq!(service.fields[0].shape, Shape::Value);

    let parent2 = descriptors.iter().find(|d| d.name == "Parent2").unwrap();
    assert_eq!(parent2.fields[0].shape, Shape::Reference);
}
