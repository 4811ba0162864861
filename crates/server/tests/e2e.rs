mod support;

use std::net::SocketAddr;

use reqwest::{header, StatusCode as HttpStatusCode};
use serde_json::json;
use tokio::net::TcpListener;

use support::test_app;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let (app, _) = test_app().await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "OK");
    Ok(())
}

#[tokio::test]
async fn e2e_account_lifecycle_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    // Create
    let res = c.post(format!("{}/accounts", app.base_url))
        .json(&json!({"name": "Alice", "email": "alice@example.com"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let location = res.headers().get(header::LOCATION).expect("location header").to_str()?.to_string();
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_i64().expect("id");
    // Absolute URL built from the Host header
    assert_eq!(location, format!("{}/accounts/{}", app.base_url, id));

    // Read through the Location URL
    let res = c.get(&location).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, created);

    // Update
    let res = c.put(&location).json(&json!({"name": "Alice Smith"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["name"], "Alice Smith");

    // Delete twice
    for _ in 0..2 {
        let res = c.delete(&location).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    }

    let res = c.get(&location).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_form_post_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let res = c.post(format!("{}/accounts", app.base_url))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("name=Alice")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNSUPPORTED_MEDIA_TYPE);

    let list = c.get(format!("{}/accounts", app.base_url)).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(list, json!([]));
    Ok(())
}
