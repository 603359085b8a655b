//! Integration tests for the content upload pipeline
//!
//! **Purpose**: exercise the full create → register → poll → transfer →
//! commit sequence against mocked Graph and storage endpoints
//!
//! **Coverage:**
//! - Happy path: every stage runs exactly once, polls repeat as scripted
//! - Replacement path: content stages against an existing app id
//! - Deadline: storage URI that never materializes surfaces a timeout
//! - Stage failure: a rejected registration aborts with the stage attached
//!
//! **Infrastructure:**
//! - WireMock server playing the token endpoint, Graph, and blob storage
//! - Stateful content-file mock scripted per poll

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use intune_client::{IntuneClient, UploadOptions};
use intune_domain::{
    ClientConfig, Credentials, FileEncryptionInfo, IntuneError, MobileApp, MobileAppContentFile,
    UploadStage,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const APP_ID: &str = "app-0001";
const VERSION_ID: &str = "1";
const FILE_ID: &str = "file-0001";

fn client_for(server: &MockServer) -> IntuneClient {
    IntuneClient::new(
        ClientConfig::new(
            "test-tenant",
            Credentials::ClientSecret {
                client_id: "app-registration".into(),
                client_secret: "secret".into(),
            },
        )
        .with_graph_base_url(server.uri())
        .with_login_base_url(server.uri()),
    )
}

fn encryption_info() -> FileEncryptionInfo {
    FileEncryptionInfo {
        encryption_key: "a2V5".into(),
        mac_key: "bWFj".into(),
        initialization_vector: "aXY=".into(),
        mac: "ZGlnZXN0".into(),
        profile_identifier: "ProfileVersion1".into(),
        file_digest: "c2hh".into(),
        file_digest_algorithm: "SHA256".into(),
    }
}

fn fast_options() -> UploadOptions {
    UploadOptions::default().with_poll_interval(Duration::from_millis(10))
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/test-tenant/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "graph-token"
        })))
        .mount(server)
        .await;
}

/// Script the content-file GET: two polls without a storage URI, one with
/// it, then a pending commit state, then success.
async fn mount_content_file_sequence(server: &MockServer, storage_uri: String) {
    let polls = Arc::new(AtomicUsize::new(0));
    Mock::given(method("GET"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions/{VERSION_ID}/files/{FILE_ID}"
        )))
        .respond_with(move |_req: &Request| -> ResponseTemplate {
            let call = polls.fetch_add(1, Ordering::SeqCst);
            let body = match call {
                0 | 1 => serde_json::json!({
                    "id": FILE_ID,
                    "azureStorageUri": null,
                    "uploadState": "azureStorageUriRequestPending"
                }),
                2 => serde_json::json!({
                    "id": FILE_ID,
                    "azureStorageUri": storage_uri,
                    "uploadState": "azureStorageUriRequestSuccess"
                }),
                3 => serde_json::json!({
                    "id": FILE_ID,
                    "azureStorageUri": storage_uri,
                    "uploadState": "commitFilePending"
                }),
                _ => serde_json::json!({
                    "id": FILE_ID,
                    "azureStorageUri": storage_uri,
                    "uploadState": "commitFileSuccess"
                }),
            };
            ResponseTemplate::new(200).set_body_json(body)
        })
        .expect(5)
        .mount(server)
        .await;
}

async fn mount_content_stages(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": VERSION_ID })),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions/{VERSION_ID}/files"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": FILE_ID })),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/uploads/package.intunewin.bin"))
        .and(query_param("comp", "block"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/uploads/package.intunewin.bin"))
        .and(query_param("comp", "blocklist"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions/{VERSION_ID}/files/{FILE_ID}/commit"
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("/deviceAppManagement/mobileApps/{APP_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_with_content_runs_every_stage_once() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path("/deviceAppManagement/mobileApps"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "@odata.type": "#microsoft.graph.win32LobApp",
            "id": APP_ID,
            "displayName": "7-Zip"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage_uri = format!("{}/uploads/package.intunewin.bin?sv=2020&sig=s", server.uri());
    mount_content_file_sequence(&server, storage_uri).await;
    mount_content_stages(&server).await;

    let client = client_for(&server);
    let payload = vec![0xABu8; 10_000];
    let file = MobileAppContentFile::new("package.intunewin", 10_000, 10_000);

    let progress_reports = Arc::new(Mutex::new(Vec::new()));
    let reports_clone = progress_reports.clone();
    let options = fast_options().with_progress(Box::new(move |total, transferred| {
        reports_clone.lock().unwrap().push((total, transferred));
    }));

    let created = client
        .mobile_apps()
        .create_with_content(
            &MobileApp::win32_lob("7-Zip"),
            &encryption_info(),
            &file,
            &payload,
            options,
        )
        .await
        .expect("upload should succeed");

    // The pipeline returns the application exactly as the create call
    // produced it.
    assert_eq!(created.id.as_deref(), Some(APP_ID));
    assert_eq!(created.display_name.as_deref(), Some("7-Zip"));

    // 10 000 bytes is above the small-payload threshold, so the default
    // 4 MiB block applies: one block, one progress report.
    let reports = progress_reports.lock().unwrap();
    assert_eq!(reports.as_slice(), &[(10_000, 10_000)]);

    // One token exchange covers the whole pipeline.
    let token_calls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().ends_with("/oauth2/v2.0/token"))
        .count();
    assert_eq!(token_calls, 1);
}

#[tokio::test]
async fn replace_content_skips_app_creation_and_reports_final_state() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    let storage_uri = format!("{}/uploads/package.intunewin.bin?sv=2020&sig=s", server.uri());
    mount_content_file_sequence(&server, storage_uri).await;
    mount_content_stages(&server).await;

    let client = client_for(&server);
    let payload = vec![0x11u8; 10_000];
    let file = MobileAppContentFile::new("package.intunewin", 10_000, 10_000);

    let state = client
        .mobile_apps()
        .replace_content(APP_ID, &encryption_info(), &file, &payload, fast_options())
        .await
        .expect("replacement should succeed");

    assert_eq!(state, "commitFileSuccess");

    // No app-creation POST happened.
    let create_calls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| {
            r.method.as_str() == "POST" && r.url.path() == "/deviceAppManagement/mobileApps"
        })
        .count();
    assert_eq!(create_calls, 0);
}

#[tokio::test]
async fn storage_uri_that_never_appears_times_out() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": VERSION_ID })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions/{VERSION_ID}/files"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": FILE_ID })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": FILE_ID,
            "azureStorageUri": null,
            "uploadState": "azureStorageUriRequestPending"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let file = MobileAppContentFile::new("package.intunewin", 10_000, 10_000);
    let options = fast_options().with_deadline(Duration::from_millis(50));

    let err = client
        .mobile_apps()
        .replace_content(APP_ID, &encryption_info(), &file, &[0u8; 16], options)
        .await
        .expect_err("should time out");

    match err {
        IntuneError::Timeout { stage, .. } => assert_eq!(stage, UploadStage::AwaitStorageUri),
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_file_registration_aborts_with_the_stage() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": VERSION_ID })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/deviceAppManagement/mobileApps/{APP_ID}/microsoft.graph.win32LobApp/contentVersions/{VERSION_ID}/files"
        )))
        .respond_with(ResponseTemplate::new(400).set_body_string("size mismatch"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let file = MobileAppContentFile::new("package.intunewin", 10_000, 10_000);

    let err = client
        .mobile_apps()
        .replace_content(APP_ID, &encryption_info(), &file, &[0u8; 16], fast_options())
        .await
        .expect_err("should abort");

    match err {
        IntuneError::UploadStage { stage, source } => {
            assert_eq!(stage, UploadStage::RegisterFile);
            assert!(matches!(*source, IntuneError::Api { status: 400, .. }));
        }
        other => panic!("expected UploadStage, got {other:?}"),
    }
}
