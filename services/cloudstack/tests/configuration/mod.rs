use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use csgen_cloudstack::{
    params_from_toml_str, ApiDescriptor, Configuration, CLOUDSTACK_API_KEY, CLOUDSTACK_HOST,
    CLOUDSTACK_PORT, CLOUDSTACK_SECRET_KEY,
};
use csgen_core::{Context, ErrorKind, HttpSend, OsEnv, Result, StaticEnv};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use super::{base_params, build, params};

#[test]
fn test_build_with_required_params() -> Result<()> {
    let config = build(base_params())?;

    assert_eq!(config.host(), "10.0.0.1");
    assert_eq!(config.scheme(), "http");
    assert_eq!(config.port(), 8080);
    assert_eq!(config.compiled_address(), "http://10.0.0.1:8080/client");
    assert!(config.context().has_http_send());
    assert!(config.now() <= chrono::Utc::now());
    Ok(())
}

#[test_case("host", ErrorKind::HostMissing; "host")]
#[test_case("api_key", ErrorKind::ApiKeyMissing; "api key")]
#[test_case("secret_key", ErrorKind::SecretKeyMissing; "secret key")]
fn test_missing_required_param(name: &str, kind: ErrorKind) {
    let mut params = base_params();
    params.remove(name);

    let err = build(params).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert!(err.is_config_error());
}

#[test_case("host", ErrorKind::HostMissing; "host")]
#[test_case("api_key", ErrorKind::ApiKeyMissing; "api key")]
#[test_case("secret_key", ErrorKind::SecretKeyMissing; "secret key")]
fn test_empty_required_param(name: &str, kind: ErrorKind) {
    let mut params = base_params();
    params.insert(name.to_string(), json!(""));

    assert_eq!(build(params).unwrap_err().kind(), kind);
}

#[test]
fn test_missing_host_reported_first() {
    let err = build(params(json!({}))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HostMissing);
}

#[test]
fn test_endpoint_is_deprecated() {
    let mut params = base_params();
    params.insert("endpoint".to_string(), json!("http://10.0.0.1:8080/client"));
    let err = build(params).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterDeprecated);
    assert!(err.to_string().contains("`host`"));

    // Rejected before anything else is looked at.
    let err = build(super::params(json!({"endpoint": null, "bogus": 1}))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterDeprecated);
}

#[test]
fn test_unknown_param() {
    let mut params = base_params();
    params.insert("api_token".to_string(), json!("abc"));

    let err = build(params).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterUnknown);
    assert!(err.to_string().contains("setApiToken"));
}

#[test]
fn test_params_bound_in_given_order() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing");
    let missing = missing.to_string_lossy();

    let err = build(params(json!({
        "host": "10.0.0.1",
        "output_dir": missing,
        "bogus": 1,
    })))
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputDirInvalid);

    let err = build(params(json!({
        "host": "10.0.0.1",
        "bogus": 1,
        "output_dir": missing,
    })))
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterUnknown);
    Ok(())
}

#[test]
fn test_camel_and_snake_case_bind_the_same_setter() -> Result<()> {
    let snake = build(params(json!({
        "host": "10.0.0.1",
        "api_key": "key",
        "secret_key": "secret",
        "path_prefix": "/mgmt/",
        "console_path": "proxy/",
    })))?;
    let camel = build(params(json!({
        "host": "10.0.0.1",
        "apiKey": "key",
        "secretKey": "secret",
        "pathPrefix": "/mgmt/",
        "consolePath": "proxy/",
    })))?;

    assert_eq!(snake.api_key(), camel.api_key());
    assert_eq!(snake.secret_key(), camel.secret_key());
    assert_eq!(snake.path_prefix(), "mgmt");
    assert_eq!(camel.path_prefix(), "mgmt");
    assert_eq!(snake.console_path(), camel.console_path());
    Ok(())
}

#[test]
fn test_wrong_value_type() {
    let mut params = base_params();
    params.insert("port".to_string(), json!("eighty"));
    assert_eq!(build(params).unwrap_err().kind(), ErrorKind::ConfigInvalid);

    let mut params = base_params();
    params.insert("host".to_string(), json!({"name": "10.0.0.1"}));
    assert_eq!(build(params).unwrap_err().kind(), ErrorKind::ConfigInvalid);
}

#[test]
fn test_normalization_through_params() -> Result<()> {
    let mut params = base_params();
    params.insert("path_prefix".to_string(), json!(" /client/ "));
    params.insert("api_path".to_string(), json!("/api/"));
    params.insert("namespace".to_string(), json!("\\\\Foo\\\\\\Bar\\\\"));

    let config = build(params)?;
    assert_eq!(config.path_prefix(), "client");
    assert_eq!(config.api_path(), "api");
    assert_eq!(config.namespace(), "Foo\\Bar");
    Ok(())
}

#[test_case(8080, "http://10.0.0.1:8080/client"; "with port")]
#[test_case(0, "http://10.0.0.1/client"; "without port")]
fn test_compiled_address(port: u16, expected: &str) -> Result<()> {
    let mut params = base_params();
    params.insert("scheme".to_string(), json!("http"));
    params.insert("port".to_string(), json!(port));
    params.insert("path_prefix".to_string(), json!("client"));

    let config = build(params)?;
    assert_eq!(config.compiled_address(), expected);
    Ok(())
}

#[test]
fn test_compiled_address_is_memoized() -> Result<()> {
    let config = build(base_params())?;

    let first = config.compiled_address();
    let second = config.compiled_address();
    assert_eq!(first, second);
    assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
    Ok(())
}

#[test]
fn test_new_host_invalidates_address() -> Result<()> {
    let mut config = build(base_params())?;
    assert_eq!(config.compiled_address(), "http://10.0.0.1:8080/client");

    config.set_host("cloud.example.com");
    assert_eq!(
        config.compiled_address(),
        "http://cloud.example.com:8080/client"
    );
    assert_eq!(
        config.api_address(),
        "http://cloud.example.com:8080/client/api"
    );
    Ok(())
}

#[test]
fn test_output_dir() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut params = base_params();
    params.insert(
        "output_dir".to_string(),
        json!(dir.path().to_string_lossy()),
    );
    let config = build(params)?;
    assert_eq!(config.output_dir(), dir.path());

    // The writability probe leaves nothing behind.
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_output_dir_missing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("does-not-exist");

    let mut params = base_params();
    params.insert("output_dir".to_string(), json!(missing.to_string_lossy()));
    let err = build(params).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputDirInvalid);
    assert!(err.to_string().contains("does-not-exist"));
    Ok(())
}

#[test]
fn test_output_dir_is_file() -> anyhow::Result<()> {
    let file = tempfile::NamedTempFile::new()?;

    let mut config = build(base_params())?;
    let err = config.set_output_dir(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputDirInvalid);
    assert_eq!(config.output_dir(), std::path::Path::new("output"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_output_dir_not_writable() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555))?;

    // Permission bits don't bind root.
    if tempfile::tempfile_in(dir.path()).is_ok() {
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let mut config = build(base_params())?;
    let result = config.set_output_dir(dir.path()).map(|_| ());
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755))?;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutputDirInvalid);
    assert!(err.to_string().contains("not writable"));
    assert_eq!(config.output_dir(), std::path::Path::new("output"));
    Ok(())
}

struct Api {
    name: String,
}

impl ApiDescriptor for Api {
    fn name(&self) -> &str {
        &self.name
    }
}

#[test]
fn test_event_for_api() -> Result<()> {
    let config = build(base_params())?;

    let deploy = Api {
        name: "deployVirtualMachine".to_string(),
    };
    let list = Api {
        name: "listVirtualMachines".to_string(),
    };
    assert_eq!(config.event_for_api(&deploy), "VM.CREATE");
    assert_eq!(config.event_for_api(&list), "");
    assert_eq!(config.event_for_api("deleteUser"), "USER.DELETE");
    Ok(())
}

#[test]
fn test_from_static_env() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            (CLOUDSTACK_HOST.to_string(), "10.0.0.1".to_string()),
            (CLOUDSTACK_PORT.to_string(), "0".to_string()),
            (CLOUDSTACK_API_KEY.to_string(), "key".to_string()),
            (CLOUDSTACK_SECRET_KEY.to_string(), "secret".to_string()),
        ]),
    });

    let config = Configuration::from_env(ctx)?;
    assert_eq!(config.compiled_address(), "http://10.0.0.1/client");
    Ok(())
}

#[test]
fn test_from_os_env() {
    temp_env::with_vars(
        [
            (CLOUDSTACK_HOST, Some("10.0.0.2")),
            (CLOUDSTACK_API_KEY, Some("key")),
            (CLOUDSTACK_SECRET_KEY, None),
        ],
        || {
            let err = Configuration::from_env(Context::new().with_env(OsEnv)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::SecretKeyMissing);
        },
    );
}

#[test]
fn test_from_toml() -> Result<()> {
    let params = params_from_toml_str(
        r#"
scheme = "https"
host = "cloud.example.com"
port = 0
path_prefix = "/client/"
namespace = "MyENA\\CloudStackClient"
api_key = "key"
secret_key = "secret"
"#,
    )?;

    let config = build(params)?;
    assert_eq!(config.compiled_address(), "https://cloud.example.com/client");
    assert_eq!(config.namespace(), "MyENA\\CloudStackClient");
    Ok(())
}

#[derive(Debug, Clone, Default)]
struct CountingHttpSend {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl HttpSend for CountingHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(http::Response::new(Bytes::from(req.uri().to_string())))
    }
}

#[tokio::test]
async fn test_supplied_transport_is_kept() -> Result<()> {
    let transport = CountingHttpSend::default();
    let ctx = Context::new().with_http_send(transport.clone());
    let config = Configuration::new(ctx, base_params())?;

    let uri = format!(
        "{}?{}",
        config.api_address(),
        config.sign_query([("command", "listZones")])?
    );
    let req = http::Request::get(&uri).body(Bytes::new())?;
    let resp = config.context().http_send(req).await?;

    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    assert_eq!(resp.body().as_ref(), uri.as_bytes());
    Ok(())
}

#[test]
fn test_configuration_shared_across_threads() -> Result<()> {
    let config = Arc::new(build(base_params())?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || config.compiled_address().to_string())
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().expect("thread must not panic"),
            "http://10.0.0.1:8080/client"
        );
    }
    Ok(())
}
