use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::delete;
use purge_kit_core::{DomainConfig, Domains};
use purge_kit_purger::cloudflare::HttpTransport;
use purge_kit_purger::{CloudflarePurger, Error, Purger};
use std::sync::{Arc, Mutex};

/// What the stand-in API saw for one purge call
#[derive(Debug, Clone)]
struct Hit {
    zone_id: String,
    email: Option<String>,
    key: Option<String>,
    content_type: Option<String>,
    body: serde_json::Value,
}

#[derive(Clone, Default)]
struct FakeApi {
    hits: Arc<Mutex<Vec<Hit>>>,
    /// Zone that answers 400 with a Cloudflare error envelope
    broken_zone: Option<String>,
}

async fn purge_cache(
    State(api): State<FakeApi>,
    Path(zone_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let hit = Hit {
        zone_id: zone_id.clone(),
        email: header("x-auth-email"),
        key: header("x-auth-key"),
        content_type: header("content-type"),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    };
    api.hits.lock().unwrap().push(hit);

    if api.broken_zone.as_deref() == Some(zone_id.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"errors":[{"code":1049,"message":"Invalid zone identifier"}],"messages":[],"result":null}"#
                .to_string(),
        );
    }

    (
        StatusCode::OK,
        format!(
            r#"{{"success":true,"errors":[],"messages":[],"result":{{"id":"{}"}}}}"#,
            zone_id
        ),
    )
}

/// Serve the fake API on an ephemeral port and return its v4 root
async fn serve(api: FakeApi) -> String {
    let app = Router::new()
        .route("/client/v4/zones/{zone_id}/purge_cache", delete(purge_cache))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/client/v4", addr)
}

/// Real reqwest transport, bypassing any proxy set in the environment
fn http_purger(api_base: impl Into<String>) -> CloudflarePurger {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    CloudflarePurger::with_transport(domains(), HttpTransport::with_client(client)).api_base(api_base)
}

fn domains() -> Domains {
    let mut domains = Domains::new();
    domains.insert(
        "blog".to_string(),
        DomainConfig::new(
            "blog.example.com",
            "blog-key",
            "blog@example.com",
            "zone-blog",
            "https://blog.example.com/",
        ),
    );
    domains.insert(
        "shop".to_string(),
        DomainConfig::new(
            "shop.example.com",
            "shop-key",
            "shop@example.com",
            "zone-shop",
            "https://shop.example.com",
        ),
    );
    domains
}

#[tokio::test]
async fn test_purge_over_http() {
    let api = FakeApi::default();
    let base = serve(api.clone()).await;
    let purger = http_purger(base);

    let purged = purger.purge_file("/css/site.css").await.unwrap();
    assert_eq!(purged.len(), 2);

    let hits = api.hits.lock().unwrap().clone();
    assert_eq!(hits.len(), 2);

    assert_eq!(hits[0].zone_id, "zone-blog");
    assert_eq!(hits[0].email.as_deref(), Some("blog@example.com"));
    assert_eq!(hits[0].key.as_deref(), Some("blog-key"));
    assert_eq!(hits[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        hits[0].body,
        serde_json::json!({"files": ["https://blog.example.com/css/site.css"]})
    );

    assert_eq!(hits[1].zone_id, "zone-shop");
    assert_eq!(
        hits[1].body,
        serde_json::json!({"files": ["https://shop.example.com/css/site.css"]})
    );
}

#[tokio::test]
async fn test_rejected_zone_stops_purge() {
    let api = FakeApi {
        broken_zone: Some("zone-blog".to_string()),
        ..FakeApi::default()
    };
    let base = serve(api.clone()).await;
    let purger = http_purger(base);

    let err = purger.purge_file("index.html").await.unwrap_err();
    assert_eq!(err.domain(), "blog");
    assert_eq!(err.status(), Some(400));
    assert!(err.body().unwrap().contains("Invalid zone identifier"));

    // shop sorts after blog and is never attempted
    assert_eq!(api.hits.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let purger = http_purger("http://127.0.0.1:1/client/v4");

    let err = purger.purge_file("index.html").await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
    assert_eq!(err.domain(), "blog");
    assert_eq!(err.status(), None);
    assert_eq!(err.body(), None);
}
