#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const TEST_SECRET: &str = "jwt_secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_todo-api-rust"));
        cmd.env("TODO_API_PORT", port.to_string())
            .env("JWT_SECRET", TEST_SECRET)
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Outcome of one RPC
pub struct RpcResponse {
    pub status: StatusCode,
    /// Rotated credential from the `jwt` header
    pub jwt: Option<String>,
    pub body: Value,
}

impl RpcResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// POST `body` to `/service.Todo/<operation>`. `authorization` of `None`
/// omits the header entirely.
pub async fn rpc(server: &TestServer, operation: &str, authorization: Option<&str>, body: Value) -> Result<RpcResponse> {
    let client = reqwest::Client::new();
    let mut req = client
        .post(format!("{}/service.Todo/{}", server.base_url, operation))
        .json(&body);
    if let Some(token) = authorization {
        req = req.header("authorization", token);
    }

    let res = req.send().await?;
    let status = res.status();
    let jwt = res
        .headers()
        .get("jwt")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = res.json::<Value>().await.unwrap_or(Value::Null);

    Ok(RpcResponse { status, jwt, body })
}

/// Sign up a fresh user and return (user id, credential)
pub async fn signup(server: &TestServer, first_name: &str, password: &str) -> Result<(String, String)> {
    let res = rpc(
        server,
        "Signup",
        Some(""),
        json!({
            "first_name": first_name,
            "last_name": "Tester",
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "password": password,
        }),
    )
    .await?;
    anyhow::ensure!(res.status.is_success(), "signup failed: {} {}", res.status, res.body);

    let user_id = res.data()["user_id"].as_str().context("missing user_id")?.to_string();
    let jwt = res.jwt.context("missing rotated jwt")?;
    Ok((user_id, jwt))
}
