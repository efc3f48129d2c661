#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the persisted trust configuration.

use std::sync::Arc;

use trust_resolver::{
    ConfigError, DEFAULT_TRUSTED_ACCOUNT, FileTrustSource, Service, StaticAccountResolver,
    TrustConfig, TrustResolverLocalClient,
};
use trust_resolver_sdk::{TrustResolverClient, TrustResolverError, TrustedAccountSource};

#[tokio::test]
async fn missing_file_loads_default_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let cfg = TrustConfig::load(Some(&path)).await.unwrap();

    assert_eq!(cfg.trusted_service_accounts, vec![DEFAULT_TRUSTED_ACCOUNT]);
}

#[tokio::test]
async fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wae.json");
    std::fs::write(&path, "{ \"trustedServiceAccounts\": [").unwrap();

    let err = TrustConfig::load(Some(&path)).await.unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[tokio::test]
async fn saved_configuration_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wae.json");

    let mut cfg = TrustConfig::default();
    cfg.add_account(r"CONTOSO\Portal Proxies");
    cfg.save(Some(&path)).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"trustedServiceAccounts\""));

    let loaded = TrustConfig::load(Some(&path)).await.unwrap();
    assert_eq!(loaded, cfg);
}

#[tokio::test]
async fn file_source_reports_malformed_file_as_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wae.json");
    std::fs::write(&path, "not json").unwrap();

    let source = FileTrustSource::new(Some(path));
    let err = source.trusted_account_names().await.unwrap_err();

    assert!(matches!(err, TrustResolverError::Configuration(_)));
}

#[tokio::test]
async fn machine_relative_account_resolves_through_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wae.json");
    std::fs::write(&path, r#"{ "trustedServiceAccounts": [".\\TrustedSvc", "bad-account"] }"#)
        .unwrap();

    let accounts =
        StaticAccountResolver::from_pairs([(r"WEB01\TrustedSvc", "S-1-5-21-10-20-30-500")]);
    let client = TrustResolverLocalClient::new(
        Arc::new(FileTrustSource::new(Some(path))),
        Arc::new(Service::new(Arc::new(accounts), Some("WEB01".to_owned()))),
    );

    let resolution = client.resolve().await.unwrap();

    assert_eq!(resolution.table().len(), 1);
    assert!(resolution.table().get("bad-account").is_none());
    assert!(resolution.trusted().contains("S-1-5-21-10-20-30-500"));
    assert!(!resolution.trusted().contains("S-1-5-21-10-20-30-999"));
}

#[tokio::test]
async fn file_source_tolerates_extra_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wae.json");
    std::fs::write(
        &path,
        r#"{ "trustedServiceAccounts": ["CONTOSO\\svc"], "comment": "managed by ops" }"#,
    )
    .unwrap();

    let names = FileTrustSource::new(Some(path))
        .trusted_account_names()
        .await
        .unwrap();

    assert_eq!(names, vec![r"CONTOSO\svc"]);
}
