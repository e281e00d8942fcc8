//! HTTP page source against a live products API on an ephemeral port

mod common;

use axum::http::header;
use axum::routing::get;
use axum::Router;
use common::{assert_complete, catalog, spread_prices};
use range_scraper::{FetchError, HttpPageSource, PageSource, RangeScheduler, SchedulerConfig};
use shared::Catalog;
use std::time::Duration;

/// Serve `app` on 127.0.0.1 and return its base URL
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn serve_catalog(catalog: Catalog) -> String {
    serve(api::router(api::AppState::new(catalog))).await
}

fn source(base_url: &str) -> HttpPageSource {
    HttpPageSource::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_page_reports_total_and_items() {
    let base_url = serve_catalog(catalog([1, 2, 2, 3, 9], 2)).await;

    let page = source(&base_url).fetch_page(2, 3).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert!(page.is_truncated());
    assert!(page.items.iter().all(|p| (2..=3).contains(&p.price)));
}

#[tokio::test]
async fn test_full_scan_over_http() {
    let limit = 10_000;
    let catalog = catalog(spread_prices(3000, limit), 100);
    let base_url = serve_catalog(catalog.clone()).await;

    let outcome = RangeScheduler::new(source(&base_url), SchedulerConfig::new(1000, limit))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(outcome.stats.splits > 0);
    assert_complete(&catalog, &outcome.items, limit);
}

#[tokio::test]
async fn test_client_error_status() {
    let base_url = serve_catalog(catalog([1], 10)).await;

    let err = source(&base_url).fetch_page(10, 5).await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("minPrice cannot be greater than maxPrice"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_content_type_mismatch() {
    let app = Router::new().route("/products", get(|| async { "not json" }));
    let base_url = serve(app).await;

    let err = source(&base_url).fetch_page(0, 10).await.unwrap_err();

    match err {
        FetchError::ContentType { found } => {
            assert!(found.unwrap().starts_with("text/plain"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let app = Router::new().route(
        "/products",
        get(|| async { ([(header::CONTENT_TYPE, "application/json")], "{\"total\": ") }),
    );
    let base_url = serve(app).await;

    let err = source(&base_url).fetch_page(0, 10).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_inconsistent_count() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            (
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"total": 5, "count": 5, "products": []}"#,
            )
        }),
    );
    let base_url = serve(app).await;

    let err = source(&base_url).fetch_page(0, 10).await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::InconsistentCount {
            count: 5,
            returned: 0
        }
    ));
}

#[tokio::test]
async fn test_request_timeout() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let base_url = serve(app).await;
    let source = HttpPageSource::new(base_url, Duration::from_millis(200)).unwrap();

    let err = source.fetch_page(0, 10).await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = source(&format!("http://{}", addr))
        .fetch_page(0, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}
