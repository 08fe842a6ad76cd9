//! Fixtures shared by the unit tests: PRSA-shaped CSV builders and a local HTTP
//! server standing in for the remote data host.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::task::JoinHandle;

pub(crate) const PRSA_HEADER: &str =
    "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";

/// One CSV row; pollutant cells default to `NA`.
#[derive(Clone)]
pub(crate) struct FixtureRow {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    pm25: String,
    pm10: String,
    co: String,
    no2: String,
    o3: String,
}

impl FixtureRow {
    pub(crate) fn new(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            pm25: "NA".to_string(),
            pm10: "NA".to_string(),
            co: "NA".to_string(),
            no2: "NA".to_string(),
            o3: "NA".to_string(),
        }
    }

    pub(crate) fn pm25(mut self, value: &str) -> Self {
        self.pm25 = value.to_string();
        self
    }

    pub(crate) fn pm10(mut self, value: &str) -> Self {
        self.pm10 = value.to_string();
        self
    }

    pub(crate) fn co(mut self, value: &str) -> Self {
        self.co = value.to_string();
        self
    }

    pub(crate) fn no2(mut self, value: &str) -> Self {
        self.no2 = value.to_string();
        self
    }

    pub(crate) fn o3(mut self, value: &str) -> Self {
        self.o3 = value.to_string();
        self
    }
}

pub(crate) fn csv_fixture(rows: &[FixtureRow]) -> String {
    let mut csv = String::from(PRSA_HEADER);
    csv.push('\n');
    for (no, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},4.0,{},{},{},-0.7,1023.0,-18.8,0.0,NNW,4.4,Test\n",
            no + 1,
            row.year,
            row.month,
            row.day,
            row.hour,
            row.pm25,
            row.pm10,
            row.no2,
            row.co,
            row.o3,
        ));
    }
    csv
}

struct Fixtures {
    files: HashMap<String, String>,
    hits: AtomicUsize,
}

/// A running fixture server; aborted on drop.
pub(crate) struct TestServer {
    pub(crate) base_url: String,
    fixtures: Arc<Fixtures>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Number of requests served so far, including failed ones.
    pub(crate) fn hits(&self) -> usize {
        self.fixtures.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serves `files` under `<base_url>/<name>`. Unknown names answer 404 and
/// names containing `Slow` stall for five seconds first.
pub(crate) async fn serve(files: Vec<(&str, String)>) -> TestServer {
    let files: HashMap<String, String> = files
        .into_iter()
        .map(|(name, body)| (name.to_string(), body))
        .collect();
    let fixtures = Arc::new(Fixtures {
        files,
        hits: AtomicUsize::new(0),
    });
    let router = Router::new()
        .route("/data/:name", get(serve_file))
        .with_state(Arc::clone(&fixtures));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().expect("fixture server address");
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    TestServer {
        base_url: format!("http://{}/data", addr),
        fixtures,
        handle,
    }
}

async fn serve_file(
    State(fixtures): State<Arc<Fixtures>>,
    Path(name): Path<String>,
) -> Result<String, StatusCode> {
    fixtures.hits.fetch_add(1, Ordering::SeqCst);
    if name.contains("Slow") {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
    fixtures.files.get(&name).cloned().ok_or(StatusCode::NOT_FOUND)
}

/// Process-wide logger that keeps every record so tests can assert on log lines.
struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL_LOGGER: Once = Once::new();

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// Installs the capturing logger. Safe to call from every test.
pub(crate) fn capture_logs() {
    INSTALL_LOGGER.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Whether a record at `level` starting with `prefix` has been logged.
/// Records from concurrently running tests are shared, so match on unique text.
pub(crate) fn logged(level: Level, prefix: &str) -> bool {
    LOGGER
        .records
        .lock()
        .map(|records| {
            records
                .iter()
                .any(|(l, message)| *l == level && message.starts_with(prefix))
        })
        .unwrap_or(false)
}
