use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, auth::ServerState};
use service::{seed, storage::depo::DepoStore};

struct TestApp {
    base_url: String,
    base_dir: PathBuf,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let base_dir = std::env::temp_dir().join(format!("depo_e2e_{}", Uuid::new_v4()));

    let mut cfg = configs::AppConfig::default();
    cfg.store.data_dir = base_dir.join("data").to_string_lossy().into_owned();
    cfg.uploads.dir = base_dir.join("uploads").to_string_lossy().into_owned();
    cfg.auth.jwt_secret = "test-secret".into();
    tokio::fs::create_dir_all(&cfg.uploads.dir).await?;

    let store = DepoStore::open(cfg.store.data_dir.clone()).await?;
    seed::setup_database(&store).await?;
    let state = ServerState::new(store, cfg);

    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    Ok(TestApp { base_url, base_dir })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("reqwest client")
}

/// Company + manager account + login through the real HTTP surface. The
/// client's cookie jar holds the session afterwards; the bearer token is
/// also returned for header-based calls.
async fn yonetici_girisi(app: &TestApp, c: &reqwest::Client) -> anyhow::Result<String> {
    let res = c
        .post(app.url("/api/firma"))
        .json(&json!({
            "firma_ad": "Depo A.Ş.",
            "firma_vergi_no": "1234567890",
            "firma_telefon": "05551234567"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let firma = res.json::<Value>().await?;

    let res = c
        .post(app.url("/api/personel"))
        .json(&json!({
            "personel_ad": "Ayşe",
            "personel_soyad": "Demir",
            "personel_eposta_adresi": "ayse@depo.com",
            "personel_sifre": "Gizli1234",
            "firma_firma_id": firma["firma_id"],
            "rol": "yonetici"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c
        .post(app.url("/api/personel/giris"))
        .json(&json!({ "eposta": "ayse@depo.com", "sifre": "Gizli1234" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.headers().get("set-cookie").is_some());
    let body = res.json::<Value>().await?;
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn e2e_health_ve_status() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/api/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "OK");

    let res = c.get(app.url("/api/status")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "API is running");
    assert_eq!(body["store"], "connected");

    let res = c.get(app.url("/metrics")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.contains("depo_api_requests_total"));

    let _ = tokio::fs::remove_dir_all(&app.base_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_korumali_uclar_tokensiz_reddedilir() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(app.url("/api/personel")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], "Yetkilendirme hatası: Token sağlanmadı");

    // public endpoints stay open
    let res = c.get(app.url("/api/tedarikci")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let _ = tokio::fs::remove_dir_all(&app.base_dir).await;
    Ok(())
}

/// The whole warehouse round trip over real HTTP: supplier, order, delivery,
/// product, stock exit below the critical level, the resulting notification
/// and the three reports.
#[tokio::test]
async fn e2e_tam_depo_akisi() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let _token = yonetici_girisi(&app, &c).await?;

    // supplier (cookie session carries the auth)
    let res = c
        .post(app.url("/api/tedarikci"))
        .json(&json!({
            "tedarikci_ad": "Mersin Lojistik",
            "tedarikci_telefon_no": "05551112233"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let tedarikci = res.json::<Value>().await?;

    // who ordered it
    let res = c.get(app.url("/api/personel")).send().await?;
    let personeller = res.json::<Value>().await?;
    let personel_id = personeller["data"][0]["personel_id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = c
        .post(app.url("/api/siparis"))
        .json(&json!({
            "urun_kodu": "URN-1",
            "urun_adi": "Palet",
            "urun_miktari": 40.0,
            "tedarikci_tedarikci_id": tedarikci["tedarikci_id"],
            "personel_personel_id": personel_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let siparis = res.json::<Value>().await?;
    let siparis_id = siparis["siparis_id"].as_str().unwrap().to_string();

    let res = c
        .put(app.url(&format!("/api/siparis/{siparis_id}/durum")))
        .json(&json!({ "durum": "onaylandı" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // delivery writes the entry movement and flips the status
    let res = c
        .post(app.url(&format!("/api/siparis/{siparis_id}/urun-girisi")))
        .json(&json!({ "stok_miktari": 40.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(app.url(&format!("/api/siparis/{siparis_id}"))).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["durum"], "teslim edildi");

    // register the product so the status report can name it
    let res = c
        .post(app.url("/api/stok/urunler"))
        .json(&json!({ "urun_kodu": "URN-1", "urun_adi": "Palet" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    // exit leaving 5 of 40, under the default critical level of 10
    let res = c
        .post(app.url("/api/stok/cikis"))
        .json(&json!({ "urun_kodu": "URN-1", "cikis_miktari": 35.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    // overdrawing the remaining 5 is refused
    let res = c
        .post(app.url("/api/stok/cikis"))
        .json(&json!({ "urun_kodu": "URN-1", "cikis_miktari": 6.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Yeterli stok yok. Mevcut stok: 5");

    let res = c.get(app.url("/api/stok/durum")).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"][0]["urun_kodu"], "URN-1");
    assert_eq!(body["data"][0]["stok_miktari"], 5.0);

    // the manager in the yonetici role got the low-stock warning
    let res = c.get(app.url("/api/notifications?unread=true")).send().await?;
    let body = res.json::<Value>().await?;
    let bildirimler = body["data"].as_array().unwrap();
    assert_eq!(bildirimler.len(), 1);
    assert_eq!(bildirimler[0]["type"], "warning");
    let bildirim_id = bildirimler[0]["notification_id"].as_str().unwrap().to_string();

    let res = c
        .put(app.url(&format!("/api/notifications/{bildirim_id}/read")))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(app.url("/api/notifications?unread=true")).send().await?;
    let body = res.json::<Value>().await?;
    assert!(body["data"].as_array().unwrap().is_empty());

    // reports over the same documents
    let res = c.get(app.url("/api/reports/stock-status")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let satir = &body["data"]["products"][0];
    assert_eq!(satir["total_in"], 40.0);
    assert_eq!(satir["total_out"], 35.0);
    assert_eq!(satir["current_stock"], 5.0);

    let res = c.get(app.url("/api/reports/order-status")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["total_orders"], 1);
    assert_eq!(body["data"]["by_status"]["teslim edildi"]["count"], 1);

    let res = c.get(app.url("/api/reports/supplier-performance")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let tedarikciler = body["data"]["suppliers"].as_array().unwrap();
    assert_eq!(tedarikciler.len(), 1);
    assert_eq!(tedarikciler[0]["completed_orders"], 1);

    let _ = tokio::fs::remove_dir_all(&app.base_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_gorsel_yukleme_ve_sunum() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    yonetici_girisi(&app, &c).await?;

    let res = c
        .post(app.url("/api/stok/urunler"))
        .json(&json!({ "urun_kodu": "URN-9", "urun_adi": "Forklift" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let urun = res.json::<Value>().await?;
    let urun_id = urun["urun_id"].as_str().unwrap().to_string();

    let icerik = vec![0x89u8, 0x50, 0x4e, 0x47];
    let part = reqwest::multipart::Part::bytes(icerik.clone()).file_name("forklift.png");
    let form = reqwest::multipart::Form::new().part("image", part);
    let res = c
        .post(app.url(&format!("/api/stok/urunler/{urun_id}/gorsel")))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let resim_url = body["resim_url"].as_str().unwrap().to_string();
    assert!(resim_url.starts_with("/uploads/urun-"));
    assert!(resim_url.ends_with(".png"));

    // the saved file is served back under /uploads
    let res = c.get(app.url(&resim_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.bytes().await?.to_vec(), icerik);

    // missing field is a 400, unknown product a 404
    let form = reqwest::multipart::Form::new().text("dosya", "yanlis-alan");
    let res = c
        .post(app.url(&format!("/api/stok/urunler/{urun_id}/gorsel")))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let part = reqwest::multipart::Part::bytes(icerik).file_name("forklift.png");
    let form = reqwest::multipart::Form::new().part("image", part);
    let res = c
        .post(app.url("/api/stok/urunler/yok/gorsel"))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let _ = tokio::fs::remove_dir_all(&app.base_dir).await;
    Ok(())
}
