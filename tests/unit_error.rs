/// Unit tests for DiError and DiResult types

use named_di::{DiError, DiResult};
use std::error::Error;

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("pool".to_string());
    assert_eq!(format!("{}", error), "Dependency not found: pool");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch {
        path: "app::Child.SomeValue".to_string(),
        dependency: "foo".to_string(),
        expected: "i32",
        found: "alloc::string::String",
    };
    assert_eq!(
        error.to_string(),
        "Type mismatch at app::Child.SomeValue (from 'foo'): expected i32, found alloc::string::String"
    );
}

#[test]
fn test_error_display_circular() {
    let error = DiError::Circular(vec!["A".into(), "B".into(), "A".into()]);
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Circular dependency: A -> B -> A");
}

#[test]
fn test_error_display_depth_exceeded() {
    let error = DiError::DepthExceeded(100);
    assert_eq!(format!("{}", error), "Max depth 100 exceeded");
}

#[test]
fn test_fatal_classification() {
    assert!(!DiError::NotFound("x".into()).is_fatal());
    assert!(DiError::Circular(vec![]).is_fatal());
    assert!(DiError::DepthExceeded(1).is_fatal());
}

#[test]
fn test_error_trait_object() {
    let error: Box<dyn Error> = Box::new(DiError::NotFound("svc".into()));
    assert!(error.source().is_none());
    assert!(error.to_string().contains("svc"));
}

#[test]
fn test_result_alias_with_question_mark() {
    fn lookup(found: bool) -> DiResult<u8> {
        if found {
            Ok(1)
        } else {
            Err(DiError::NotFound("value".into()))
        }
    }

    fn chained() -> DiResult<u8> {
        let v = lookup(true)?;
        let w = lookup(false)?;
        Ok(v + w)
    }

    assert_eq!(chained(), Err(DiError::NotFound("value".into())));
}
