//! End-to-end tests over the assembled pipeline.

use proteus::prelude::*;
use proteus_convert::SnakeCaseConverter;
use proteus_security::{HashCalculator, TokenValidator, AUTH_TOKEN_HEADER};
use std::sync::Arc;

fn base_toml(extra: &str) -> ProteusConfig {
    ProteusConfig::from_toml(extra).expect("valid test config")
}

#[test]
fn default_assembly_accepts_everything_and_renders_json() {
    let proteus = Proteus::builder(ProteusConfig::default()).build().unwrap();

    assert!(proteus.authenticate(&ApiRequest::new("GET", "/")).is_ok());
    assert_eq!(proteus.context().process_name(), "null");

    let mut resource = Resource::new();
    resource.insert("id", Value::Int(1));
    let body = proteus
        .render(resource, content_type::JSON, &OutputFlags::default())
        .unwrap();
    assert_eq!(body, r#"{"id":1}"#);
}

#[test]
fn convention_is_applied_after_datetime_formatting() {
    let config = base_toml("convention = \"camelCase\"\ntime_format = \"%Y-%m-%d\"");
    let proteus = Proteus::builder(config).build().unwrap();

    let dt = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:30:00+02:00").unwrap();
    let mut resource = Resource::new();
    resource.insert("created_at", Value::DateTime(dt));

    let body = proteus
        .render(resource, content_type::JSON, &OutputFlags::default())
        .unwrap();
    assert_eq!(body, r#"{"createdAt":"2024-05-01"}"#);
}

#[test]
fn dense_sequences_normalize_to_lists() {
    let proteus = Proteus::builder(ProteusConfig::default()).build().unwrap();

    let mut items = Resource::new();
    items.insert("0", Value::from("a"));
    items.insert("1", Value::from("b"));
    let mut resource = Resource::new();
    resource.insert("tags", items);

    let body = proteus
        .render(resource, content_type::JSON, &OutputFlags::default())
        .unwrap();
    assert_eq!(body, r#"{"tags":["a","b"]}"#);
}

#[test]
fn pretty_and_jsonp_flags_shape_json_output() {
    let proteus = Proteus::builder(ProteusConfig::default()).build().unwrap();
    let mut resource = Resource::new();
    resource.insert("id", Value::Int(1));

    let pretty = proteus
        .render(
            resource.clone(),
            content_type::JSON,
            &OutputFlags { jsonp_callback: None, pretty: true },
        )
        .unwrap();
    assert!(pretty.contains('\n'));

    let wrapped = proteus
        .render(
            resource.clone(),
            content_type::JSON,
            &OutputFlags { jsonp_callback: Some("cb".to_string()), pretty: false },
        )
        .unwrap();
    assert_eq!(wrapped, r#"cb({"id":1});"#);

    // Flags are JSON-only; XML ignores them.
    let xml = proteus
        .render(
            resource,
            content_type::XML,
            &OutputFlags { jsonp_callback: Some("cb".to_string()), pretty: true },
        )
        .unwrap();
    assert!(xml.starts_with("<?xml"));
}

#[test]
fn filter_reads_configured_parameter_names() {
    let config = base_toml("jsonp_key = \"callback\"\npretty_print_key = \"pp\"");
    let proteus = Proteus::builder(config).build().unwrap();

    let mut request = ApiRequest::new("GET", "/users");
    request.data_mut().insert("callback", Value::from("handle"));
    request.data_mut().insert("pp", Value::from("1"));

    let flags = proteus.filter().flags(&request);
    assert_eq!(flags.jsonp_callback.as_deref(), Some("handle"));
    assert!(flags.pretty);
}

#[test]
fn private_key_assembles_timeout_then_hash_chain() {
    let config = base_toml("[security]\nprivate_key = \"s3cret\"");
    let proteus = Proteus::builder(config).build().unwrap();
    assert_eq!(proteus.context().process_name(), "secured");

    let now = chrono::Utc::now().timestamp();
    let mut request = ApiRequest::new("POST", "/payments");
    request.data_mut().insert("timestamp", Value::Int(now));
    request.data_mut().insert("amount", Value::Int(100));
    let signature = HashCalculator::new("s3cret").compute(request.data());
    let request = request.with_header(AUTH_TOKEN_HEADER, signature);

    assert!(proteus.authenticate(&request).is_ok());
    // An identical replay within the timeout window still passes.
    assert!(proteus.authenticate(&request).is_ok());
}

#[test]
fn expired_timestamp_short_circuits_before_hash_check() {
    let config = base_toml("[security]\nprivate_key = \"s3cret\"");
    let proteus = Proteus::builder(config).build().unwrap();

    // Stale timestamp and a signature that would otherwise verify.
    let mut request = ApiRequest::new("POST", "/payments");
    request.data_mut().insert("timestamp", Value::Int(1_000));
    let signature = HashCalculator::new("s3cret").compute(request.data());
    let request = request.with_header(AUTH_TOKEN_HEADER, signature);

    let err = proteus.authenticate(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Expired);
}

#[test]
fn tampered_request_is_denied_with_invalid_signature() {
    let config = base_toml("[security]\nprivate_key = \"s3cret\"");
    let proteus = Proteus::builder(config).build().unwrap();

    let now = chrono::Utc::now().timestamp();
    let mut request = ApiRequest::new("POST", "/payments");
    request.data_mut().insert("timestamp", Value::Int(now));
    request.data_mut().insert("amount", Value::Int(100));
    let signature = HashCalculator::new("s3cret").compute(request.data());
    let mut request = request.with_header(AUTH_TOKEN_HEADER, signature);
    request.data_mut().insert("amount", Value::Int(999_999));

    let err = proteus.authenticate(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSignature);
}

struct AcceptAll;

impl TokenValidator for AcceptAll {
    fn validate(&self, _token: &str) -> bool {
        true
    }
}

#[test]
fn require_oauth2_without_validator_fails_assembly() {
    let config = base_toml("[security]\nrequire_oauth2 = true");
    let err = Proteus::builder(config).build().unwrap_err();
    assert!(matches!(err, BuildError::MissingOAuth2Validator));
}

#[test]
fn require_oauth2_with_validator_builds() {
    let config = base_toml("[security]\nrequire_oauth2 = true");
    let proteus = Proteus::builder(config)
        .with_token_validator(Arc::new(AcceptAll))
        .build()
        .unwrap();

    let request = ApiRequest::new("GET", "/").with_header("Authorization", "Bearer t");
    assert!(proteus.authenticate(&request).is_ok());
}

#[test]
fn second_casing_converter_is_a_configuration_error() {
    let config = base_toml("convention = \"camelCase\"");
    let err = Proteus::builder(config)
        .with_converter(Arc::new(SnakeCaseConverter))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::ConflictingCasingConverters { .. }
    ));
}

#[test]
fn duplicate_mapper_key_is_a_configuration_error() {
    let err = Proteus::builder(ProteusConfig::default())
        .with_mapper("json", Arc::new(proteus_mapping::JsonMapper::pretty()))
        .build()
        .unwrap_err();
    assert!(matches!(err, BuildError::Mapping(_)));
}

#[test]
fn unknown_content_type_surfaces_unsupported_format() {
    let proteus = Proteus::builder(ProteusConfig::default()).build().unwrap();
    let err = proteus
        .render(Resource::new(), "yaml", &OutputFlags::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
}

#[test]
fn routes_generate_from_presenter_discovery_and_cache() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("UsersPresenter.rs"), "").unwrap();
    std::fs::write(dir.path().join("OrderItemsPresenter.rs"), "").unwrap();

    let config = base_toml(&format!(
        "[routes]\npresenters_root = {:?}\nprefix = \"api\"\nmodule = \"v1\"",
        dir.path().to_str().unwrap()
    ));
    let proteus = Proteus::builder(config).build().unwrap();

    let table = proteus.route_table().unwrap().expect("routes configured");
    let patterns: Vec<_> = table.routes().iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["api/v1/order_items", "api/v1/users"]);

    // Second call is served from cache and identical.
    let again = proteus.route_table().unwrap().unwrap();
    assert_eq!(again, table);
}

#[test]
fn route_generation_skipped_without_presenters_root() {
    let proteus = Proteus::builder(ProteusConfig::default()).build().unwrap();
    assert_eq!(proteus.route_table().unwrap(), None);
}

#[test]
fn diagnostics_respect_panel_flag() {
    let config = base_toml("[routes]\npanel = false");
    let proteus = Proteus::builder(config).build().unwrap();
    assert!(proteus.diagnostics().is_none());

    let proteus = Proteus::builder(ProteusConfig::default()).build().unwrap();
    proteus.authenticate(&ApiRequest::new("GET", "/")).unwrap();

    let snapshot = proteus.diagnostics().unwrap();
    assert_eq!(snapshot.active_process, "null");
    assert_eq!(snapshot.converters, vec!["object", "datetime"]);
    assert!(snapshot.content_types.contains(&"json".to_string()));
    let last = snapshot.last_auth.as_ref().unwrap();
    assert!(last.allowed);
    assert!(serde_json::to_string(&snapshot).is_ok());
}

#[test]
fn decode_round_trips_through_the_registry() {
    let proteus = Proteus::builder(ProteusConfig::default()).build().unwrap();
    let decoded = proteus
        .decode(content_type::QUERY, "user%5Bname%5D=ada&user%5Brole%5D=admin")
        .unwrap();
    let Some(Value::Resource(user)) = decoded.get("user") else {
        panic!("expected nested resource");
    };
    assert_eq!(user.get("name"), Some(&Value::from("ada")));
}
