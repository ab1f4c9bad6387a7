use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use common::observability::{NoopRecorder, PrometheusRecorder};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::enrichment::HttpUserLookup;
use service::orders::{OrderRepository, OrderService};
use service::users::UserRepository;
use tokio::net::TcpListener;

use server::routes::{build_cors, build_order_router, build_user_router, OrderState, UserState};

async fn spawn(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

async fn start_user_service() -> anyhow::Result<String> {
    let state = UserState { users: Arc::new(UserRepository::with_fixtures()), metrics: Arc::new(NoopRecorder) };
    spawn(build_user_router(state, build_cors())).await
}

async fn start_order_service(user_service_url: &str) -> anyhow::Result<String> {
    let lookup = HttpUserLookup::new(user_service_url, Duration::from_secs(5))?;
    let orders = OrderService::new(Arc::new(OrderRepository::with_fixtures()), Arc::new(lookup));
    let state = OrderState { orders, metrics: Arc::new(PrometheusRecorder::new()?) };
    spawn(build_order_router(state, build_cors())).await
}

/// Address that refuses connections.
async fn unreachable_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

async fn create_order(c: &reqwest::Client, base: &str, user_id: i64) -> anyhow::Result<Value> {
    let res = c
        .post(format!("{}/orders", base))
        .json(&json!({"user_id": user_id, "product": "Headphones", "quantity": 1, "price": 59.9}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn e2e_order_enriched_from_live_user_service() -> anyhow::Result<()> {
    let users = start_user_service().await?;
    let orders = start_order_service(&users).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/orders/2", orders)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["product"], "Mouse");
    assert_eq!(body["user_name"], "Jane Smith");
    assert_eq!(body["user_email"], "jane@example.com");

    // a user registered through the user service is visible to enrichment
    let res = c
        .post(format!("{}/users", users))
        .json(&json!({"name": "Grace Hopper", "email": "grace@example.com"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let user = res.json::<Value>().await?;
    assert_eq!(user["id"], 3);

    let order = create_order(&c, &orders, 3).await?;
    let body = c.get(format!("{}/orders/{}", orders, order["id"])).send().await?.json::<Value>().await?;
    assert_eq!(body["user_name"], "Grace Hopper");
    Ok(())
}

#[tokio::test]
async fn e2e_unreachable_user_service_yields_placeholder() -> anyhow::Result<()> {
    let orders = start_order_service(&unreachable_url().await?).await?;
    let c = reqwest::Client::new();

    let order = create_order(&c, &orders, 7).await?;
    let res = c.get(format!("{}/orders/{}", orders, order["id"])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["user_id"], 7);
    assert_eq!(body["user_name"], "User 7");
    assert_eq!(body["user_email"], "user7@example.com");
    Ok(())
}

#[tokio::test]
async fn e2e_user_service_error_yields_bare_order() -> anyhow::Result<()> {
    let failing = Router::new().route("/users/:id", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let users = spawn(failing).await?;
    let orders = start_order_service(&users).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/orders/1", orders)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], 1);
    assert_eq!(body["product"], "Laptop");
    assert!(body.get("user_name").is_none());
    assert!(body.get("user_email").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_user_yields_bare_order() -> anyhow::Result<()> {
    let users = start_user_service().await?;
    let orders = start_order_service(&users).await?;
    let c = reqwest::Client::new();

    let order = create_order(&c, &orders, 42).await?;
    let body = c.get(format!("{}/orders/{}", orders, order["id"])).send().await?.json::<Value>().await?;
    assert_eq!(body["user_id"], 42);
    assert!(body.get("user_name").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_status_lifecycle_and_filtering() -> anyhow::Result<()> {
    let orders = start_order_service(&unreachable_url().await?).await?;
    let c = reqwest::Client::new();

    let order = create_order(&c, &orders, 5).await?;
    let id = order["id"].as_i64().expect("id");
    assert_eq!(id, 3);

    for status in ["processing", "shipped", "delivered", "cancelled", "pending"] {
        let res = c
            .put(format!("{}/orders/{}/status", orders, id))
            .json(&json!({"status": status}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        let listed = c.get(format!("{}/orders?user_id=5", orders)).send().await?.json::<Value>().await?;
        assert_eq!(listed[0]["status"], status);
    }

    let res = c
        .put(format!("{}/orders/{}/status", orders, id))
        .json(&json!({"status": "PENDING"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let listed = c.get(format!("{}/orders?user_id=5", orders)).send().await?.json::<Value>().await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    let all = c.get(format!("{}/orders", orders)).send().await?.json::<Value>().await?;
    assert_eq!(all.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_over_http() -> anyhow::Result<()> {
    let orders = start_order_service(&unreachable_url().await?).await?;
    let c = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..20 {
        let c = c.clone();
        let base = orders.clone();
        handles.push(tokio::spawn(async move { create_order(&c, &base, i + 1).await }));
    }
    let mut ids = Vec::new();
    for h in handles {
        ids.push(h.await??["id"].as_i64().expect("id"));
    }
    ids.sort_unstable();
    assert_eq!(ids, (3..=22).collect::<Vec<i64>>());
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposed() -> anyhow::Result<()> {
    let orders = start_order_service(&unreachable_url().await?).await?;
    let c = reqwest::Client::new();
    create_order(&c, &orders, 1).await?;

    let res = c.get(format!("{}/metrics", orders)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("orders_total{status=\"pending\"} 1"));
    Ok(())
}
