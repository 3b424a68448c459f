use axum::body::Body;
use axum::http::{Request, StatusCode};
use bondle::api::{self, AppState};
use bondle::config::{CatalogBackend, Config, DEFAULT_CURSOR_SECRET};
use bondle::domain::{Address, Decimal, Token, TokenId, TokenStatus};
use bondle::{init_db, InMemoryCatalog, Repository, SqliteCatalog};
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

const SEED_CSV: &str = "\
id,address,creator_address,name,symbol,status,market_cap,volume_24h,holders,is_nsfw
1,0xKUMA,6LuRcreator,KUMA,KUMA,ACTIVE,7080000,10000,12450,false
2,0xFUMBLE,,FUMBLE,FUM,FINALIZED,2350000,500,,false
3,0xSPICY,,Spicy,SPC,ACTIVE,9000000,90000,10,true
";

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn config(backend: CatalogBackend, database_path: Option<String>, seed: Option<String>) -> Config {
    Config {
        port: 0,
        bind_addr: "127.0.0.1".parse().unwrap(),
        catalog_backend: backend,
        database_path,
        catalog_seed_file: seed,
        cursor_secret: DEFAULT_CURSOR_SECRET.to_string(),
    }
}

fn write_seed(dir: &TempDir) -> String {
    let path = dir.path().join("tokens.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SEED_CSV.as_bytes()).unwrap();
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn test_health_and_ready() {
    let catalog = InMemoryCatalog::new().with_token(Token::new(
        TokenId::new("1".to_string()),
        Address::new("0xabc".to_string()),
        "Demo",
        "DEMO",
        TokenStatus::Active,
    ));
    let app = api::create_router(AppState::new(Arc::new(catalog), "secret"));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokens"], 1);
}

#[tokio::test]
async fn test_sqlite_backend_serves_seeded_catalog() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("catalog.db").to_string_lossy().to_string();
    let cfg = config(CatalogBackend::Sqlite, Some(db_path.clone()), Some(write_seed(&temp)));

    let app = api::create_router(AppState::from_config(&cfg).await.unwrap());

    let (_, body) = get(&app, "/ready").await;
    assert_eq!(body["tokens"], 3);

    let (status, body) = get(&app, "/token/search?category=marketcap").await;
    assert_eq!(status, StatusCode::OK);
    let symbols: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["KUMA", "FUM"]);

    let (_, body) = get(&app, "/leaderboard/top?includeNsfw=true&limit=1").await;
    assert_eq!(body[0]["symbol"], "SPC");

    // Restarting against the same file must not duplicate the seeded rows.
    let restarted = api::create_router(AppState::from_config(&cfg).await.unwrap());
    let (_, body) = get(&restarted, "/ready").await;
    assert_eq!(body["tokens"], 3);
}

#[tokio::test]
async fn test_memory_backend_from_config() {
    let temp = TempDir::new().unwrap();
    let cfg = config(CatalogBackend::Memory, None, Some(write_seed(&temp)));
    let app = api::create_router(AppState::from_config(&cfg).await.unwrap());

    let (_, body) = get(&app, "/token/search?category=finalized").await;
    assert_eq!(body["items"][0]["name"], "FUMBLE");
}

#[tokio::test]
async fn test_malformed_seed_fails_startup() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.csv");
    std::fs::write(&path, "id,address,name,symbol,status\n1,0xA,A,A,MIGRATED\n").unwrap();
    let cfg = config(
        CatalogBackend::Memory,
        None,
        Some(path.to_string_lossy().to_string()),
    );

    let err = AppState::from_config(&cfg).await.err().unwrap();
    assert!(matches!(err, bondle::AppError::Config(_)));
}

#[tokio::test]
async fn test_token_info_lookup() {
    let pool = init_db(":memory:").await.unwrap();
    let repo = Arc::new(Repository::new(pool));
    let mut token = Token::new(
        TokenId::new("42".to_string()),
        Address::new("0xAbCdEf".to_string()),
        "Forty Two",
        "FT",
        TokenStatus::PreActive,
    );
    token.market_cap = Some(Decimal::from(4200));
    repo.upsert_token(&token).await.unwrap();
    let app = api::create_router(AppState::new(Arc::new(SqliteCatalog::new(repo)), "secret"));

    let (status, body) = get(&app, "/token/info?address=0xabcdef").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "42");
    assert_eq!(body["address"], "0xAbCdEf");
    assert_eq!(body["status"], "PRE_ACTIVE");
    assert_eq!(body["marketCap"], 4200.0);

    let (status, _) = get(&app, "/token/info?address=0xmissing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/token/info").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "address is required");
}
