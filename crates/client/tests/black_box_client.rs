use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use ocm_authorizations::AccessReviewRequest;
use ocm_client::{Connection, DEFAULT_AGENT, Error};
use ocm_clustersmgmt::{CloudRegion, Cluster, ClusterNodes, MachinePool};
use ocm_servicelogs::{LogEntry, Severity};
use prometheus::Registry;
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        ocm_observability::tracing::init_for_tests();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn api() -> Self {
        Self::spawn(ocm_api::app::build_app(ocm_api::memory::servers())).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn jwt(typ: &str, expires_in: i64) -> String {
    let claims = json!({ "typ": typ, "exp": Utc::now().timestamp() + expires_in });
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test")).unwrap()
}

/// Token endpoint that records the forms it receives.
#[derive(Clone, Default)]
struct Sso {
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    reply: Option<(StatusCode, Value)>,
}

impl Sso {
    fn answering(status: StatusCode, body: Value) -> Self {
        Self {
            reply: Some((status, body)),
            ..Self::default()
        }
    }

    fn forms(&self) -> Vec<HashMap<String, String>> {
        self.forms.lock().unwrap().clone()
    }

    async fn spawn(&self) -> TestServer {
        let app = Router::new().route("/token", post(token)).with_state(self.clone());
        TestServer::spawn(app).await
    }
}

async fn token(
    State(sso): State<Sso>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    sso.forms.lock().unwrap().push(form);
    match sso.reply {
        Some((status, body)) => (status, Json(body)),
        None => (
            StatusCode::OK,
            Json(json!({
                "access_token": jwt("Bearer", 300),
                "refresh_token": jwt("Refresh", 36000),
                "token_type": "bearer",
            })),
        ),
    }
}

#[tokio::test]
async fn valid_access_token_is_used_without_asking_for_another() {
    let api = TestServer::api().await;
    let sso = Sso::default();
    let sso_server = sso.spawn().await;

    let connection = Connection::builder()
        .url(api.url(""))
        .token_url(sso_server.url("/token"))
        .tokens([jwt("Bearer", 3600)])
        .build()
        .unwrap();
    let flavours = connection.clusters_mgmt().flavours().list().send().await.unwrap();

    assert_eq!(flavours.status(), 200);
    assert!(!flavours.items().is_empty());
    assert!(sso.forms().is_empty());
}

#[tokio::test]
async fn expired_access_token_is_refreshed_once() {
    let api = TestServer::api().await;
    let sso = Sso::default();
    let sso_server = sso.spawn().await;
    let refresh = jwt("Refresh", 3600);

    let connection = Connection::builder()
        .url(api.url(""))
        .token_url(sso_server.url("/token"))
        .tokens([jwt("Bearer", -60), refresh.clone()])
        .build()
        .unwrap();
    let versions = connection.clusters_mgmt().versions();
    versions.list().send().await.unwrap();
    versions.list().send().await.unwrap();

    let forms = sso.forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["grant_type"], "refresh_token");
    assert_eq!(forms[0]["client_id"], "cloud-services");
    assert_eq!(forms[0]["refresh_token"], refresh);
}

#[tokio::test]
async fn offline_token_without_expiry_is_used_to_refresh() {
    let api = TestServer::api().await;
    let sso = Sso::default();
    let sso_server = sso.spawn().await;
    let claims = json!({ "typ": "Offline", "exp": 0 });
    let offline =
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test"))
            .unwrap();

    let connection = Connection::builder()
        .url(api.url(""))
        .token_url(sso_server.url("/token"))
        .tokens([offline.clone()])
        .build()
        .unwrap();
    connection.clusters_mgmt().flavours().list().send().await.unwrap();

    let forms = sso.forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["grant_type"], "refresh_token");
    assert_eq!(forms[0]["refresh_token"], offline);
}

#[tokio::test]
async fn client_credentials_grant_sends_scopes() {
    let sso = Sso::default();
    let sso_server = sso.spawn().await;

    let connection = Connection::builder()
        .token_url(sso_server.url("/token"))
        .client("my-client", "my-secret")
        .scopes(["openid", "api.ocm"])
        .build()
        .unwrap();
    let (access, refresh) = connection.tokens().await.unwrap();

    assert!(!access.is_empty());
    assert!(refresh.is_some());
    let forms = sso.forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["grant_type"], "client_credentials");
    assert_eq!(forms[0]["client_id"], "my-client");
    assert_eq!(forms[0]["client_secret"], "my-secret");
    assert_eq!(forms[0]["scope"], "openid api.ocm");
}

#[tokio::test]
async fn password_grant_uses_default_client() {
    let sso = Sso::default();
    let sso_server = sso.spawn().await;

    let connection = Connection::builder()
        .token_url(sso_server.url("/token"))
        .user("myuser", "mypassword")
        .build()
        .unwrap();
    connection.tokens().await.unwrap();

    let forms = sso.forms();
    assert_eq!(forms[0]["grant_type"], "password");
    assert_eq!(forms[0]["client_id"], "cloud-services");
    assert_eq!(forms[0]["username"], "myuser");
    assert_eq!(forms[0]["password"], "mypassword");
    assert_eq!(forms[0]["scope"], "openid");
}

#[tokio::test]
async fn sso_errors_are_reported() {
    let sso = Sso::answering(
        StatusCode::UNAUTHORIZED,
        json!({ "error": "invalid_client", "error_description": "Invalid client credentials" }),
    );
    let sso_server = sso.spawn().await;

    let connection = Connection::builder()
        .token_url(sso_server.url("/token"))
        .client("my-client", "wrong")
        .build()
        .unwrap();
    let err = connection.tokens().await.unwrap_err();

    assert!(matches!(err, Error::Token(_)));
    assert!(err.to_string().contains("invalid_client: Invalid client credentials"));
}

#[tokio::test]
async fn non_bearer_tokens_are_rejected() {
    let sso = Sso::answering(
        StatusCode::OK,
        json!({ "access_token": jwt("Bearer", 300), "token_type": "mac" }),
    );
    let sso_server = sso.spawn().await;

    let connection = Connection::builder()
        .token_url(sso_server.url("/token"))
        .client("my-client", "my-secret")
        .build()
        .unwrap();
    let err = connection.tokens().await.unwrap_err();
    assert!(err.to_string().contains("expected 'bearer' token type but got 'mac'"));
}

#[tokio::test]
async fn requests_carry_agent_token_and_accept_headers() {
    let seen: Arc<Mutex<Option<HeaderMap>>> = Arc::default();
    let recorder = Arc::clone(&seen);
    let app = Router::new().route(
        "/api/clusters_mgmt/v1/clusters",
        get(move |headers: HeaderMap| {
            let recorder = Arc::clone(&recorder);
            async move {
                *recorder.lock().unwrap() = Some(headers);
                Json(json!({ "kind": "ClusterList", "page": 1, "size": 0, "total": 0, "items": [] }))
            }
        }),
    );
    let api = TestServer::spawn(app).await;
    let token = jwt("Bearer", 3600);

    let connection = Connection::builder()
        .url(api.url(""))
        .tokens([token.clone()])
        .build()
        .unwrap();
    let clusters = connection.clusters_mgmt().clusters().list().send().await.unwrap();
    assert!(clusters.items().is_empty());

    let headers = seen.lock().unwrap().clone().unwrap();
    assert_eq!(headers["user-agent"], DEFAULT_AGENT);
    assert_eq!(headers["authorization"], format!("Bearer {token}").as_str());
    assert_eq!(headers["accept"], "application/json");
    assert!(headers.get("content-type").is_none());
}

#[tokio::test]
async fn non_json_responses_are_rejected() {
    let app = Router::new().route(
        "/api/clusters_mgmt/v1/clusters",
        get(|| async { ([(CONTENT_TYPE, "text/html")], "<html>Down for maintenance</html>") }),
    );
    let api = TestServer::spawn(app).await;

    let connection = Connection::builder()
        .url(api.url(""))
        .tokens([jwt("Bearer", 3600)])
        .build()
        .unwrap();
    let err = connection.clusters_mgmt().clusters().list().send().await.unwrap_err();

    match err {
        Error::ContentType {
            status,
            content_type,
            summary,
        } => {
            assert_eq!(status, 200);
            assert_eq!(content_type, "text/html");
            assert!(summary.contains("Down for maintenance"));
        }
        other => panic!("expected content type error, got {other:?}"),
    }
}

async fn connect(api: &TestServer) -> Connection {
    Connection::builder()
        .url(api.url(""))
        .tokens([jwt("Bearer", 3600)])
        .build()
        .unwrap()
}

#[tokio::test]
async fn cluster_lifecycle() {
    let api = TestServer::api().await;
    let connection = connect(&api).await;
    let clusters = connection.clusters_mgmt().clusters();

    let added = clusters
        .add()
        .body(
            Cluster::builder()
                .name("mycluster")
                .nodes(ClusterNodes::builder().compute(4).build())
                .region(CloudRegion::builder().id("us-east-1").build())
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(added.status(), 201);
    let id = added.body().id().unwrap().to_string();

    let cluster = clusters.cluster(&id);
    let fetched = cluster.get().send().await.unwrap().into_body();
    assert_eq!(fetched.name(), Some("mycluster"));
    assert_eq!(fetched.nodes().and_then(ClusterNodes::compute), Some(4));

    let updated = cluster
        .update()
        .body(Cluster::builder().display_name("My Cluster").build())
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
    assert_eq!(updated.body().display_name(), Some("My Cluster"));
    assert_eq!(updated.body().name(), Some("mycluster"));

    cluster
        .machine_pools()
        .add()
        .body(MachinePool::builder().id("workers").instance_type("m5.xlarge").replicas(3).build())
        .send()
        .await
        .unwrap();
    let pools = cluster.machine_pools().list().size(10).send().await.unwrap();
    assert_eq!(pools.total(), 1);
    assert_eq!(pools.items()[0].replicas(), Some(3));

    let deleted = cluster.delete().send().await.unwrap();
    assert_eq!(deleted.status(), 204);

    let err = cluster.get().send().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn lists_are_paged() {
    let api = TestServer::api().await;
    let connection = connect(&api).await;

    let page = connection
        .clusters_mgmt()
        .versions()
        .list()
        .page(2)
        .size(1)
        .send()
        .await
        .unwrap();
    assert_eq!(page.page(), 2);
    assert_eq!(page.size(), 1);
    assert_eq!(page.total(), 2);
    assert_eq!(page.items().len(), 1);
}

#[tokio::test]
async fn api_errors_carry_the_envelope() {
    let api = TestServer::api().await;
    let connection = connect(&api).await;

    let err = connection
        .clusters_mgmt()
        .clusters()
        .cluster("missing")
        .get()
        .send()
        .await
        .unwrap_err();
    let envelope = err.api_error().expect("API error");
    assert_eq!(err.status(), Some(404));
    assert_eq!(envelope.id(), Some("404"));
    assert_eq!(
        envelope.reason(),
        Some("Can't find resource for path '/api/clusters_mgmt/v1/clusters/missing'")
    );

    let filtered = connection
        .clusters_mgmt()
        .machine_types()
        .list()
        .search("name like 'm5%'")
        .send()
        .await;
    assert!(filtered.is_ok());

    let err = connection
        .clusters_mgmt()
        .clusters()
        .add()
        .body(Cluster::builder().display_name("nameless").build())
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn accounts_and_quota() {
    let api = TestServer::api().await;
    let connection = connect(&api).await;
    let accounts = connection.accounts_mgmt();

    let current = accounts.current_account().get().send().await.unwrap().into_body();
    assert_eq!(current.username(), Some(ocm_api::memory::CURRENT_ACCOUNT_ID));

    let summary = accounts
        .organizations()
        .organization("ocm-org")
        .quota_summary()
        .list()
        .send()
        .await
        .unwrap();
    assert_eq!(summary.items().len(), 1);
    assert_eq!(summary.items()[0].allowed(), Some(5));
}

#[tokio::test]
async fn unserved_groups_are_not_found() {
    let api = TestServer::api().await;
    let connection = connect(&api).await;

    let err = connection
        .authorizations()
        .access_review()
        .post()
        .body(AccessReviewRequest::builder().account_username("ocm-user").action("get").build())
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn requests_and_token_requests_are_measured() {
    let api = TestServer::api().await;
    let sso = Sso::default();
    let sso_server = sso.spawn().await;
    let registry = Registry::new();

    let connection = Connection::builder()
        .url(api.url(""))
        .token_url(sso_server.url("/token"))
        .client("my-client", "my-secret")
        .metrics("api_outbound")
        .metrics_registry(registry.clone())
        .build()
        .unwrap();
    let err = connection.clusters_mgmt().clusters().cluster("123").get().send().await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let families = registry.gather();
    let find = |name: &str| {
        families
            .iter()
            .find(|family| family.get_name() == name)
            .unwrap_or_else(|| panic!("metric {name} is missing"))
    };
    let labels = |name: &str| -> HashMap<String, String> {
        find(name).get_metric()[0]
            .get_label()
            .iter()
            .map(|pair| (pair.get_name().to_string(), pair.get_value().to_string()))
            .collect()
    };

    let calls = labels("api_outbound_request_count");
    assert_eq!(calls["path"], "/api/clusters_mgmt/v1/clusters/-");
    assert_eq!(calls["apiservice"], "ocm-clusters-service");
    assert_eq!(calls["method"], "GET");
    assert_eq!(calls["code"], "404");
    let tokens = labels("api_outbound_token_request_count");
    assert_eq!(tokens["code"], "200");
    assert_eq!(
        find("api_outbound_token_request_duration").get_metric()[0]
            .get_histogram()
            .get_sample_count(),
        1
    );
}

#[tokio::test]
async fn closed_connections_send_nothing() {
    let api = TestServer::api().await;
    let connection = connect(&api).await;
    let versions = connection.clusters_mgmt().versions();
    versions.list().send().await.unwrap();

    connection.close().unwrap();
    let err = versions.list().send().await.unwrap_err();
    assert!(matches!(err, Error::Closed));
    assert_eq!(err.to_string(), "connection is closed");
    assert!(connection.close().is_err());
}

#[tokio::test]
async fn service_log_lifecycle() {
    let api = TestServer::api().await;
    let connection = connect(&api).await;
    let logs = connection.service_logs().cluster_logs();

    let added = logs
        .add()
        .body(
            LogEntry::builder()
                .id("upgrade/4.16")
                .cluster_uuid("c2f1")
                .service_name("upgrades")
                .severity(Severity::Warning)
                .summary("Cluster upgrade scheduled")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(added.status(), 201);
    assert!(added.body().timestamp().is_some());

    let entry = logs.log_entry("upgrade/4.16");
    let fetched = entry.get().send().await.unwrap().into_body();
    assert_eq!(fetched.summary(), Some("Cluster upgrade scheduled"));
    assert_eq!(fetched.severity(), Some(&Severity::Warning));

    let listed = logs.list().send().await.unwrap();
    assert_eq!(listed.total(), 1);

    assert_eq!(entry.delete().send().await.unwrap().status(), 204);
    assert_eq!(entry.get().send().await.unwrap_err().status(), Some(404));
}
