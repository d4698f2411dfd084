#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Runs the `tdo` binary against a mock Todoist server with an isolated
/// preferences file.
pub struct CliTestHarness {
    temp_dir: TempDir,
    config_path: PathBuf,
    pub server: MockServer,
}

impl CliTestHarness {
    /// Starts the mock server. No preferences file exists until
    /// [`write_config`](Self::write_config) is called.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("todoist-cli.json");
        let server = MockServer::start().await;

        Self {
            temp_dir,
            config_path,
            server,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(&self.config_path, contents).expect("Failed to write config");
    }

    /// A command pointed at the mock server, with a token in the environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_without_token();
        cmd.env("TODOIST_API_TOKEN", TEST_TOKEN);
        cmd
    }

    pub fn command_without_token(&self) -> Command {
        let mut cmd = Command::cargo_bin("tdo").expect("Failed to find tdo binary");
        cmd.env_remove("TODOIST_API_TOKEN")
            .env_remove("RUST_LOG")
            .env_remove("TDO_TOKEN_PATH")
            .env_remove("TDO_DEFAULT_PROJECT")
            .env_remove("TDO_DEFAULT_PRIORITY")
            .env("TDO_API_URL", self.server.uri())
            .arg("--config")
            .arg(&self.config_path)
            .arg("--no-color");
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Every request the server has seen, in arrival order.
    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("request recording is enabled")
    }

    /// JSON bodies of every POST to `/tasks`, in arrival order.
    pub async fn created_bodies(&self) -> Vec<Value> {
        self.requests()
            .await
            .iter()
            .filter(|r| r.method.as_str() == "POST" && r.url.path() == "/tasks")
            .map(|r| serde_json::from_slice(&r.body).expect("task body is JSON"))
            .collect()
    }

    /// Answers `POST /tasks` by echoing the content back with sequential ids.
    pub async fn mount_task_creation(&self) {
        let counter = std::sync::atomic::AtomicUsize::new(100);
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .respond_with(move |req: &Request| {
                let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);
                let id = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                ResponseTemplate::new(200).set_body_json(fixtures::task(
                    &id.to_string(),
                    body["content"].as_str().unwrap_or_default(),
                    body["parent_id"].as_str(),
                ))
            })
            .mount(&self.server)
            .await;
    }

    pub async fn mount_projects(&self, projects: Value) {
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(projects))
            .mount(&self.server)
            .await;
    }
}

pub mod fixtures {
    use super::*;

    pub fn task(id: &str, content: &str, parent_id: Option<&str>) -> Value {
        json!({
            "id": id,
            "content": content,
            "description": "",
            "project_id": "p1",
            "parent_id": parent_id,
            "priority": 1,
            "due": null,
            "labels": [],
            "is_completed": false,
            "url": format!("https://todoist.com/showTask?id={id}"),
        })
    }

    pub fn projects() -> Value {
        json!([
            {"id": "p1", "name": "Inbox", "order": 0, "is_inbox_project": true, "is_favorite": false},
            {"id": "p2", "name": "Errands", "order": 1, "is_inbox_project": false, "is_favorite": true},
        ])
    }
}
