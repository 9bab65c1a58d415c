use json_kv_store::options::{DEFAULT_MAX_PAYLOAD_BYTES, DEFAULT_TIMEOUT_SECS};
use json_kv_store::ClientOptions;
use std::time::Duration;

#[test]
fn defaults() {
    let opts = ClientOptions::default();
    assert_eq!(opts.base_url, None);
    assert_eq!(opts.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(opts.max_payload_bytes, 102_400);
    assert_eq!(DEFAULT_MAX_PAYLOAD_BYTES, 102_400);
}

#[test]
fn loads_from_toml() {
    let opts: ClientOptions = toml::from_str(
        r#"
        base_url = "https://kv.example.com/app"
        timeout_secs = 3
        "#,
    )
    .expect("valid options");
    assert_eq!(opts.base_url.as_deref(), Some("https://kv.example.com/app"));
    assert_eq!(opts.timeout_secs, 3);
    assert_eq!(opts.max_payload_bytes, DEFAULT_MAX_PAYLOAD_BYTES);
    assert_eq!(opts.resolve("/users/7"), "https://kv.example.com/app/users/7");
}

#[test]
fn empty_toml_is_default() {
    let opts: ClientOptions = toml::from_str("").expect("empty options");
    assert_eq!(opts, ClientOptions::default());
}

#[test]
fn toml_roundtrip() {
    let opts = ClientOptions::new()
        .with_base_url("http://localhost:8080")
        .with_timeout_secs(1);
    let text = toml::to_string(&opts).expect("serialize");
    let back: ClientOptions = toml::from_str(&text).expect("deserialize");
    assert_eq!(back, opts);
}
