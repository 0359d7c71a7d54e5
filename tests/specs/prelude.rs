//! Shared harness: a fluent wrapper around the `reap` binary and a mock
//! control plane served from a background runtime.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::{SystemTime, UNIX_EPOCH};

use assert_cmd::Command;
use serde_json::json;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use similar_asserts::assert_eq;

pub const TOKEN: &str = "session-token-1";
pub const USER: &str = "admin@acme";
pub const PASSWORD: &str = "hunter2";

const MS_PER_DAY: u64 = 86_400_000;
const REAP_VARS: [&str; 10] = [
    "REAP_URL",
    "REAP_USER",
    "REAP_PASSWORD",
    "REAP_EXPORT_DIR",
    "REAP_DAYS",
    "REAP_LABEL",
    "REAP_DRY_RUN",
    "REAP_TIMEOUT_SECS",
    "REAP_CONFIG",
    "REAP_LOG",
];

// ── CLI runner ──────────────────────────────────────────────────────────

pub struct CliBuilder {
    cmd: Command,
}

/// The `reap` binary with a clean environment: no `REAP_*` variables, no
/// colour, and no user config file.
pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("reap").expect("reap binary is built");
    for var in REAP_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1").env("XDG_CONFIG_HOME", "/nonexistent/reap-specs");
    CliBuilder { cmd }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Point at `hub` with valid credentials.
    pub fn against(self, hub: &Hub) -> Self {
        self.env("REAP_URL", hub.url()).env("REAP_USER", USER).env("REAP_PASSWORD", PASSWORD)
    }

    /// Answer the confirmation prompt.
    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    fn run(mut self) -> RunAssert {
        let output = self.cmd.output().expect("reap runs");
        RunAssert { output }
    }

    pub fn passes(self) -> RunAssert {
        self.code(0)
    }

    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }

    pub fn code(self, expected: i32) -> RunAssert {
        let run = self.run();
        assert_eq!(
            run.output.status.code(),
            Some(expected),
            "stdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout missing {expected:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(unexpected), "stdout has {unexpected:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr missing {expected:?}:\n{stderr}");
        self
    }
}

// ── Scratch export directory ────────────────────────────────────────────

pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self { dir: TempDir::new().expect("temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Export base directory passed with `--export-dir`
    pub fn export_dir(&self) -> PathBuf {
        self.dir.path().join("export")
    }

    pub fn export_arg(&self) -> String {
        self.export_dir().display().to_string()
    }

    /// Run directories created under the export base, sorted
    pub fn run_dirs(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(self.export_dir()) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> =
            entries.filter_map(Result::ok).map(|e| e.path()).filter(|p| p.is_dir()).collect();
        dirs.sort();
        dirs
    }

    /// File names inside the only run directory, sorted
    pub fn archived_files(&self) -> Vec<String> {
        let dirs = self.run_dirs();
        assert_eq!(dirs.len(), 1, "expected exactly one run directory: {dirs:?}");
        let mut files: Vec<String> = std::fs::read_dir(&dirs[0])
            .expect("run dir readable")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        files
    }

    pub fn read_archive(&self, file: &str) -> String {
        let dirs = self.run_dirs();
        std::fs::read_to_string(dirs[0].join(file)).expect("archive readable")
    }
}

// ── Mock control plane ──────────────────────────────────────────────────

/// A job as the mock control plane lists it
#[derive(Clone)]
pub struct JobFixture {
    pub id: String,
    pub name: String,
    pub status: &'static str,
    pub finished_days_ago: Option<u64>,
    /// Newest history entry has started but has no finish time
    pub running: bool,
    pub labels: Vec<String>,
}

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

/// Inactive job whose last run finished `days_ago` days back
pub fn idle(id: &str, name: &str, days_ago: u64) -> JobFixture {
    JobFixture {
        id: id.to_string(),
        name: name.to_string(),
        status: "INACTIVE",
        finished_days_ago: Some(days_ago),
        running: false,
        labels: Vec::new(),
    }
}

impl JobFixture {
    pub fn status(mut self, status: &'static str) -> Self {
        self.status = status;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.labels.push(label.to_string());
        self
    }

    pub fn never_run(mut self) -> Self {
        self.finished_days_ago = None;
        self
    }

    /// Add a newer run that started but never reported a finish time.
    pub fn still_running(mut self) -> Self {
        self.running = true;
        self
    }

    /// Bytes the mock returns when this job is exported
    pub fn payload(&self) -> String {
        format!("PK-archive-of-{}", self.id)
    }

    fn listing(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.name,
            "currentJobStatus": { "status": self.status },
            "labels": self.labels,
        })
    }

    fn history(&self) -> serde_json::Value {
        let mut runs = Vec::new();
        if self.running {
            runs.push(json!({ "startTime": now_ms(), "finishTime": null }));
        }
        if let Some(days) = self.finished_days_ago {
            runs.push(json!({ "finishTime": now_ms() - days * MS_PER_DAY }));
        }
        json!(runs)
    }
}

/// Listing page size the client asks for
pub const PAGE: usize = 50;

/// Split into listing pages. A trailing empty page is served whenever the
/// last page is full, so the client always sees a short page at the end.
fn pages(jobs: &[JobFixture]) -> Vec<&[JobFixture]> {
    let mut pages: Vec<&[JobFixture]> = jobs.chunks(PAGE).collect();
    if jobs.len() % PAGE == 0 {
        pages.push(&[]);
    }
    pages
}

pub struct Hub {
    // Dropped before the runtime that started it
    server: MockServer,
    rt: Runtime,
}

impl Hub {
    /// A control plane that accepts the fixture credentials. Nothing else is
    /// served until [`Hub::with_jobs`].
    pub fn start() -> Self {
        let hub = Self::bare();
        hub.mount(
            Mock::given(method("POST"))
                .and(path("/security/public-rest/v1/authentication/login"))
                .and(body_json(json!({ "userName": USER, "password": PASSWORD })))
                .respond_with(ResponseTemplate::new(200).insert_header("X-SS-User-Auth-Token", TOKEN)),
        );
        hub
    }

    /// A control plane that refuses every login.
    pub fn rejecting_login() -> Self {
        let hub = Self::bare();
        hub.mount(
            Mock::given(method("POST"))
                .and(path("/security/public-rest/v1/authentication/login"))
                .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials")),
        );
        hub
    }

    fn bare() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Serve `jobs` from the listing, their histories, and their exports.
    /// The listing is paged like the real API: `PAGE` entries per offset.
    pub fn with_jobs(self, jobs: &[JobFixture]) -> Self {
        for (page, chunk) in pages(jobs).into_iter().enumerate() {
            let listing: Vec<serde_json::Value> = chunk.iter().map(JobFixture::listing).collect();
            self.mount(
                Mock::given(method("GET"))
                    .and(path("/jobrunner/rest/v1/jobs"))
                    .and(query_param("offset", (page * PAGE).to_string()))
                    .and(query_param("len", PAGE.to_string()))
                    .and(header("X-SS-User-Auth-Token", TOKEN))
                    .respond_with(ResponseTemplate::new(200).set_body_json(listing)),
            );
        }
        self.serve(jobs)
    }

    /// Like [`Hub::with_jobs`], but the listing ignores `offset` and returns
    /// every job on every request.
    pub fn with_unpaged_jobs(self, jobs: &[JobFixture]) -> Self {
        let listing: Vec<serde_json::Value> = jobs.iter().map(JobFixture::listing).collect();
        self.mount(
            Mock::given(method("GET"))
                .and(path("/jobrunner/rest/v1/jobs"))
                .respond_with(ResponseTemplate::new(200).set_body_json(listing)),
        );
        self.serve(jobs)
    }

    fn serve(self, jobs: &[JobFixture]) -> Self {
        for job in jobs {
            self.mount(
                Mock::given(method("GET"))
                    .and(path(format!("/jobrunner/rest/v1/job/{}/history", job.id)))
                    .respond_with(ResponseTemplate::new(200).set_body_json(job.history())),
            );
            self.mount(
                Mock::given(method("POST"))
                    .and(path("/jobrunner/rest/v1/jobs/exportJobs"))
                    .and(body_json(json!([job.id])))
                    .respond_with(ResponseTemplate::new(200).set_body_bytes(job.payload())),
            );
            self.mount(
                Mock::given(method("DELETE"))
                    .and(path(format!("/jobrunner/rest/v1/job/{}", job.id)))
                    .respond_with(ResponseTemplate::new(200)),
            );
        }
        self
    }

    /// Make the export of `id` answer HTTP 500.
    pub fn export_fails(self, id: &str) -> Self {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/jobrunner/rest/v1/jobs/exportJobs"))
                .and(body_json(json!([id])))
                .respond_with(ResponseTemplate::new(500).set_body_string("export exploded"))
                .with_priority(1),
        );
        self
    }

    /// Make deleting `id` answer HTTP 500.
    pub fn delete_fails(self, id: &str) -> Self {
        self.mount(
            Mock::given(method("DELETE"))
                .and(path(format!("/jobrunner/rest/v1/job/{id}")))
                .respond_with(ResponseTemplate::new(500).set_body_string("job is locked"))
                .with_priority(1),
        );
        self
    }

    fn received(&self) -> Vec<wiremock::Request> {
        self.rt.block_on(self.server.received_requests()).unwrap_or_default()
    }

    /// Total requests the hub has seen
    pub fn request_count(&self) -> usize {
        self.received().len()
    }

    /// Job ids of DELETE requests, in arrival order
    pub fn deleted_ids(&self) -> Vec<String> {
        self.received()
            .into_iter()
            .filter(|r| r.method.as_str() == "DELETE")
            .filter_map(|r| r.url.path().rsplit('/').next().map(str::to_string))
            .collect()
    }

    /// Number of listing requests
    pub fn list_count(&self) -> usize {
        self.received().iter().filter(|r| r.url.path() == "/jobrunner/rest/v1/jobs").count()
    }

    /// Number of export requests
    pub fn export_count(&self) -> usize {
        self.received().iter().filter(|r| r.url.path().ends_with("/exportJobs")).count()
    }
}
