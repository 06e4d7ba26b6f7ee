use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex as StdMutex;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct OverallStats {
    total_scans: u64,
    total_ratings: u64,
    total_feedback: u64,
    avg_dwell_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    name: String,
    scan_count: u64,
    rating_count: u64,
    avg_rating: String,
    avg_dwell: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    labels: Vec<String>,
    scan_counts: Vec<u64>,
    avg_ratings: Vec<f64>,
    avg_dwell: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    overall: OverallStats,
    table: Vec<TableRow>,
    charts: ChartData,
}

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

#[cfg(unix)]
mod cleanup {
    use std::sync::Mutex;
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
        PIDS.lock().unwrap().push(pid as i32);
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter() {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

static PORT_GUARD: StdMutex<()> = StdMutex::new(());

fn pick_free_port() -> u16 {
    let _guard = PORT_GUARD.lock().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn write_fixture(contents: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "gallery_dashboard_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    std::fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
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

async fn spawn_server(fixture: &str) -> TestServer {
    let port = pick_free_port();
    let fixture_path = write_fixture(fixture);
    let child = Command::new(env!("CARGO_BIN_EXE_gallery_dashboard"))
        .env("PORT", port.to_string())
        .env("EVENTS_FIXTURE_PATH", fixture_path)
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

const SCENARIO_FIXTURE: &str = r#"{
    "scans": [
        { "paintingName": "A" },
        { "paintingName": "A" },
        { "paintingName": "B" }
    ],
    "ratings": [
        { "paintingName": "A", "rating": 4 },
        { "paintingName": "A", "rating": 2 }
    ],
    "dwell": [],
    "feedback": [ { "message": "lovely" } ]
}"#;

#[tokio::test]
async fn http_dashboard_aggregates_scan_rating_and_dwell_events() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(SCENARIO_FIXTURE).await;
    let client = Client::new();

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(dashboard.overall.total_scans, 3);
    assert_eq!(dashboard.overall.total_ratings, 2);
    assert_eq!(dashboard.overall.total_feedback, 1);
    assert_eq!(dashboard.overall.avg_dwell_seconds, 0.0);

    assert_eq!(dashboard.table.len(), 2);
    let a = &dashboard.table[0];
    assert_eq!(a.name, "A");
    assert_eq!(a.scan_count, 2);
    assert_eq!(a.rating_count, 2);
    assert_eq!(a.avg_rating, "3.0");
    assert_eq!(a.avg_dwell, "N/A");

    let b = &dashboard.table[1];
    assert_eq!(b.name, "B");
    assert_eq!(b.scan_count, 1);
    assert_eq!(b.rating_count, 0);
    assert_eq!(b.avg_rating, "No ratings");
    assert_eq!(b.avg_dwell, "N/A");

    assert_eq!(dashboard.charts.labels, vec!["A", "B"]);
    assert_eq!(dashboard.charts.scan_counts, vec![2, 1]);
    assert_eq!(dashboard.charts.avg_ratings, vec![3.0, 0.0]);
    assert_eq!(dashboard.charts.avg_dwell, vec![0.0, 0.0]);
}

#[tokio::test]
async fn http_empty_store_yields_empty_dashboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server("{}").await;
    let client = Client::new();

    let dashboard: DashboardResponse = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(dashboard.overall.total_scans, 0);
    assert_eq!(dashboard.overall.avg_dwell_seconds, 0.0);
    assert!(dashboard.table.is_empty());
    assert!(dashboard.charts.labels.is_empty());
}

#[tokio::test]
async fn http_index_serves_dashboard_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server("{}").await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains("Gallery Analytics"));
    assert!(body.contains("/api/dashboard"));
}
