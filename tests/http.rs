use chrono::Local;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use wastage_log::client::ApiClient;
use wastage_log::client::Backend;
use wastage_log::models::{ItemCreate, ItemUpdate, LogCreate, Reason};

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "wastage_log_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix} {nanos}")
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/vendors")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_wastage_log"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_fresh_store_is_seeded() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = ApiClient::new(server.base_url.clone());

    let vendors = api.vendors().await.unwrap();
    assert!(!vendors.is_empty());

    let items = api.items(true).await.unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|i| !i.vendor_name.is_empty()));
    assert!(items.iter().all(|i| i.is_active));
}

#[tokio::test]
async fn http_log_round_trip_updates_today_and_totals() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = ApiClient::new(server.base_url.clone());
    let today = Local::now().date_naive();

    let items = api.items(true).await.unwrap();
    let item = &items[0];

    let before = api.daily_totals(today).await.unwrap();
    let before_qty = before
        .iter()
        .find(|r| r.item_id == item.id)
        .map(|r| r.total_quantity)
        .unwrap_or(0);

    let log = api
        .create_log(&LogCreate {
            item_id: item.id,
            quantity: 2,
            reason: Reason::Damaged,
            notes: Some("dropped tray".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(log.item_id, item.id);
    assert_eq!(log.quantity, 2);

    let logs = api.today_logs().await.unwrap();
    let entry = logs.iter().find(|l| l.id == log.id).expect("log listed");
    assert_eq!(entry.item_name, item.name);
    assert_eq!(entry.reason, Reason::Damaged);
    // Newest first.
    assert_eq!(logs[0].id, log.id);

    let after = api.daily_totals(today).await.unwrap();
    let after_qty = after
        .iter()
        .find(|r| r.item_id == item.id)
        .map(|r| r.total_quantity)
        .unwrap_or(0);
    assert_eq!(after_qty, before_qty + 2);

    api.delete_log(log.id).await.unwrap();
    let restored = api.daily_totals(today).await.unwrap();
    let restored_qty = restored
        .iter()
        .find(|r| r.item_id == item.id)
        .map(|r| r.total_quantity)
        .unwrap_or(0);
    assert_eq!(restored_qty, before_qty);
}

#[tokio::test]
async fn http_rejects_bad_logs() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = ApiClient::new(server.base_url.clone());

    let items = api.items(true).await.unwrap();
    let err = api
        .create_log(&LogCreate {
            item_id: items[0].id,
            quantity: 0,
            reason: Reason::Spoiled,
            notes: None,
        })
        .await
        .unwrap_err();
    match err {
        wastage_log::errors::ClientError::Backend { status, .. } => assert_eq!(status, 400),
        other => panic!("unexpected error: {other}"),
    }

    let err = api
        .create_log(&LogCreate {
            item_id: 999_999,
            quantity: 1,
            reason: Reason::Spoiled,
            notes: None,
        })
        .await
        .unwrap_err();
    match err {
        wastage_log::errors::ClientError::Backend { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn http_vendor_and_item_management() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = ApiClient::new(server.base_url.clone());

    let vendor_name = unique_name("Test Roastery");
    let vendor = api.create_vendor(&vendor_name).await.unwrap();
    assert_eq!(vendor.name, vendor_name);

    let err = api.create_vendor(&vendor_name).await.unwrap_err();
    match err {
        wastage_log::errors::ClientError::Backend { status, .. } => assert_eq!(status, 400),
        other => panic!("unexpected error: {other}"),
    }

    let item_name = unique_name("Oat Scone");
    let item = api
        .create_item(&ItemCreate {
            vendor_id: vendor.id,
            name: item_name.clone(),
        })
        .await
        .unwrap();
    assert_eq!(item.vendor_name, vendor_name);
    assert!(item.is_active);

    let updated = api
        .update_item(
            item.id,
            &ItemUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_active);

    let active = api.items(true).await.unwrap();
    assert!(active.iter().all(|i| i.id != item.id));
    let all = api.items(false).await.unwrap();
    assert!(all.iter().any(|i| i.id == item.id));
}

#[tokio::test]
async fn http_summary_report_and_csv() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = ApiClient::new(server.base_url.clone());
    let today = Local::now().date_naive();

    let items = api.items(true).await.unwrap();
    let item = &items[0];
    api.create_log(&LogCreate {
        item_id: item.id,
        quantity: 3,
        reason: Reason::Spoiled,
        notes: None,
    })
    .await
    .unwrap();
    api.create_log(&LogCreate {
        item_id: item.id,
        quantity: 1,
        reason: Reason::StaffComp,
        notes: None,
    })
    .await
    .unwrap();

    let report = api.summary_report(today, today).await.unwrap();
    let total: u32 = report.by_item.iter().map(|r| r.total_quantity).sum();
    assert!(total >= 4);
    // Groupings are sorted by quantity, largest first.
    for pair in report.by_item.windows(2) {
        assert!(pair[0].total_quantity >= pair[1].total_quantity);
    }
    for pair in report.by_reason.windows(2) {
        assert!(pair[0].total_quantity >= pair[1].total_quantity);
    }
    assert!(report.by_dow.iter().all(|r| r.dow <= 6));

    // Inverted range is a client error.
    let err = api
        .summary_report(today, today.pred_opt().unwrap())
        .await
        .unwrap_err();
    match err {
        wastage_log::errors::ClientError::Backend { status, .. } => assert_eq!(status, 400),
        other => panic!("unexpected error: {other}"),
    }

    let client = Client::new();
    let resp = client
        .get(api.csv_export_url(today, today))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));
    let body = resp.text().await.unwrap();
    assert!(body.starts_with("Date/Time,Item,Vendor,Quantity,Reason,Notes"));
    assert!(body.contains(&item.name));
}

#[tokio::test]
async fn http_weekly_report_covers_seven_days() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = ApiClient::new(server.base_url.clone());
    let today = Local::now().date_naive();

    let items = api.items(true).await.unwrap();
    let item = &items[0];
    api.create_log(&LogCreate {
        item_id: item.id,
        quantity: 1,
        reason: Reason::DisplayPull,
        notes: None,
    })
    .await
    .unwrap();

    let week_start = today - chrono::Duration::days(6);
    let rows = api.weekly_report(week_start).await.unwrap();
    assert!(rows
        .iter()
        .any(|r| r.item_id == item.id && r.log_date == today));
    for row in &rows {
        assert!(row.log_date >= week_start);
        assert!(row.log_date <= today);
        assert!(row.total_quantity > 0);
    }
}
