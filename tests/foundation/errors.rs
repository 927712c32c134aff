//! Error construction and display.

use delve_foundation::{EntityId, Error, ErrorContext, ErrorKind};

#[test]
fn invalid_config_names_the_field() {
    let err = Error::invalid_config("min_leaf", "must not exceed max_leaf");
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidConfig { field: "min_leaf", .. }
    ));
    assert!(err.to_string().contains("min_leaf"));
}

#[test]
fn unknown_content_names_table_and_id() {
    let err = Error::unknown_content("class", "bard");
    let text = err.to_string();
    assert!(text.contains("class"));
    assert!(text.contains("bard"));
}

#[test]
fn missing_entity_carries_the_id() {
    let err = Error::entity_not_found(EntityId::new(9));
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(id) if id.raw() == 9));
}

#[test]
fn context_is_attached() {
    let err = Error::new(ErrorKind::Internal("boom".into()))
        .with_context(ErrorContext::new().with_floor(3).with_source("generator"));
    assert!(err.to_string().contains("boom"));
}
