use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = server::startup::build_app();
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn gaspar() -> Value {
    json!({
        "id": "001",
        "imageUrl": "https://x",
        "year": "2020/2020",
        "name": "Gaspar",
        "licence": "ABC-1234",
        "place": { "lat": 0.0, "long": 0.0 }
    })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_car_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/car", app.base_url);

    let res = c.post(&url).json(&gaspar()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["name"], "Gaspar");
    assert_eq!(body["place"]["lat"].as_f64(), Some(0.0));

    let res = c.post(&url).json(&gaspar()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "ID já existe" }));

    let res = c.get(format!("{url}/001")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], "001");
    assert_eq!(body["value"]["licence"], "ABC-1234");

    let mut renamed = gaspar();
    renamed["name"] = json!("Belchior");
    let res = c.patch(format!("{url}/001")).json(&renamed).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(&url).send().await?;
    let list = res.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Belchior");

    let res = c.delete(format!("{url}/001")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Carro deletado com sucesso" }));

    let res = c.get(format!("{url}/001")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_keep_ids_unique() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/car", app.base_url);

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let c = c.clone();
        let url = url.clone();
        tasks.push(tokio::spawn(async move {
            c.post(&url).json(&gaspar()).send().await.map(|r| r.status())
        }));
    }
    let mut created = 0;
    for t in tasks {
        if t.await?? == HttpStatusCode::CREATED { created += 1; }
    }
    assert_eq!(created, 1);

    let list = c.get(&url).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 1);
    Ok(())
}
