use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use recsys_core::{Backend, EngineConfig};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn write_tiny_catalog(dir: &std::path::Path) -> String {
    let path = dir.join("catalog.csv");
    fs::write(
        &path,
        "show_id,type,title,date_added,release_year,rating,listed_in,description\n\
         s1,Movie,A,\"September 25, 2021\",2020,PG-13,Sci-Fi,space adventure\n\
         s2,Movie,B,\"September 24, 2021\",2019,TV-MA,\"Sci-Fi, Action\",space war saga\n\
         s3,TV Show,C,\"September 23, 2021\",2021,TV-14,Food,cooking show\n",
    )
    .unwrap();
    path.to_string_lossy().to_string()
}

async fn call(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn recommend_returns_ranked_results() {
    let dir = tempdir().unwrap();
    let catalog = write_tiny_catalog(dir.path());
    for backend in [Backend::Dense, Backend::Inverted] {
        let config = EngineConfig { backend, ..EngineConfig::default() };
        let app = server::build_app(&catalog, &config).unwrap();

        let (status, body) = call(app, "/recommend?title=A&n=2").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["seed"], "A");
        let arr = json["results"].as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["title"], "B");
        assert_eq!(arr[0]["row"].as_u64().unwrap(), 1);
        assert_eq!(arr[1]["title"], "C");
        assert!(arr[0]["score"].as_f64().unwrap() > arr[1]["score"].as_f64().unwrap());
    }
}

#[tokio::test]
async fn unknown_title_is_404() {
    let dir = tempdir().unwrap();
    let app = server::build_app(&write_tiny_catalog(dir.path()), &EngineConfig::default()).unwrap();

    let (status, body) = call(app, "/recommend?title=Nonexistent%20Title").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("Nonexistent Title"));
}

#[tokio::test]
async fn default_count_is_capped_by_catalog() {
    let dir = tempdir().unwrap();
    let app = server::build_app(&write_tiny_catalog(dir.path()), &EngineConfig::default()).unwrap();

    let (status, body) = call(app, "/recommend?title=C").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn item_lookup() {
    let dir = tempdir().unwrap();
    let app = server::build_app(&write_tiny_catalog(dir.path()), &EngineConfig::default()).unwrap();

    let (status, body) = call(app.clone(), "/item/2").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["row"], 2);
    assert_eq!(json["title"], "C");
    assert_eq!(json["type"], "TV Show");

    let (status, _) = call(app, "/item/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health() {
    let app = server::router(server::AppState::from_items(Vec::new(), &EngineConfig::default()));
    let (status, body) = call(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}
