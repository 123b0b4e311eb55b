use std::{
    io,
    path::PathBuf,
    process::Stdio,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use fast_mcp::{Builder, FastMcpError, Transport};
use rmcp::{
    model::{ClientInfo, Content, JsonObject, PromptMessage, PromptMessageContent},
    serve_client,
    service::RunningService,
    RoleClient,
};
use serde_json::Value;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader, ReadBuf},
    process::{Child, ChildStdin, ChildStdout, Command},
    sync::mpsc,
    task::JoinHandle,
    time::timeout,
};
use tracing_subscriber::fmt::MakeWriter;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_fast-mcp-example");

pub type Client = RunningService<RoleClient, ClientInfo>;
pub type ServerTask = JoinHandle<Result<(), FastMcpError>>;

/// Run `builder` on an in-memory transport and connect a client to it.
pub async fn connect(builder: Builder) -> Result<(Client, ServerTask)> {
    let (transport, client_stream) = Transport::in_memory();
    let server = tokio::spawn(
        builder
            .transport(transport)
            .shutdown_signals([])
            .run(),
    );
    let client = serve_client(ClientInfo::default(), client_stream)
        .await
        .context("client handshake failed")?;
    Ok((client, server))
}

pub fn arguments(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

pub fn texts(content: &[Content]) -> Vec<String> {
    content
        .iter()
        .filter_map(|item| item.as_text().map(|text| text.text.clone()))
        .collect()
}

pub fn message_text(message: &PromptMessage) -> &str {
    match &message.content {
        PromptMessageContent::Text { text } => text,
        other => panic!("expected text prompt content, got {other:?}"),
    }
}

pub async fn spawn_example(
    envs: &[(&str, String)],
    args: &[&str],
) -> Result<(Child, ChildIoBridge, StderrLines)> {
    let mut command = Command::new(BINARY_PATH);
    command
        .env_remove("FAST_MCP_CONFIG")
        .env("RUST_LOG", "info")
        .envs(envs.iter().map(|(key, value)| (*key, value.as_str())))
        .args(args)
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().context("failed to spawn example server")?;
    let stdout = child.stdout.take().expect("child stdout");
    let stdin = child.stdin.take().expect("child stdin");
    let stderr = child.stderr.take().expect("child stderr");
    let bridge = ChildIoBridge::new(stdout, stdin);
    Ok((child, bridge, StderrLines::forward(stderr)))
}

/// Lines written to a child's stderr, received as they arrive.
pub struct StderrLines {
    receiver: mpsc::UnboundedReceiver<String>,
    seen: Vec<String>,
}

impl StderrLines {
    fn forward(stderr: impl AsyncRead + Unpin + Send + 'static) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if sender.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            receiver,
            seen: Vec::new(),
        }
    }

    /// Wait until a line containing `needle` has been written.
    pub async fn wait_for(&mut self, needle: &str) -> Result<()> {
        if self.seen.iter().any(|line| line.contains(needle)) {
            return Ok(());
        }
        timeout(Duration::from_secs(10), async {
            while let Some(line) = self.receiver.recv().await {
                let found = line.contains(needle);
                self.seen.push(line);
                if found {
                    return Ok(());
                }
            }
            anyhow::bail!("stderr closed before `{needle}` was logged: {:?}", self.seen)
        })
        .await
        .context("timed out waiting for stderr line")?
    }

    /// Everything written until stderr closed.
    pub async fn finish(mut self) -> Result<Vec<String>> {
        timeout(Duration::from_secs(5), async {
            while let Some(line) = self.receiver.recv().await {
                self.seen.push(line);
            }
        })
        .await
        .context("stderr did not close")?;
        Ok(self.seen)
    }
}

/// In-memory log sink for a `tracing_subscriber::fmt` subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

/// Joins a child's stdout and stdin into one duplex stream for `serve_client`.
pub struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl ChildIoBridge {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self { stdout, stdin }
    }
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        data: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        std::pin::Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}
