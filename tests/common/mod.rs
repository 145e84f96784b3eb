//! Shared utilities for harness integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use gql_testctx::identity::{TokenBuilder, TokenError};
use gql_testctx::transport::{
    GraphqlTransport, OperationRequest, OperationScope, TransportError, TransportFactory,
    TransportResult,
};

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct Captured {
    pub head: String,
    pub body: String,
}

impl Captured {
    /// Bearer token from the Authorization header.
    pub fn bearer(&self) -> Option<String> {
        self.head.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("authorization") {
                value.trim().strip_prefix("Bearer ").map(str::to_string)
            } else {
                None
            }
        })
    }
}

/// Start a programmable GraphQL backend on an ephemeral port.
///
/// `f` gets the zero-based call index and returns (status, JSON body).
pub async fn start_graphql_backend<F>(f: F) -> (SocketAddr, Arc<Mutex<Vec<Captured>>>)
where
    F: Fn(usize) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = captured.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let index = {
                            let mut seen = seen.lock().unwrap();
                            seen.push(request);
                            seen.len() - 1
                        };

                        let (status, body) = f(index);
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

/// Start a backend that accepts connections but never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

async fn read_request(socket: &mut TcpStream) -> Option<Captured> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[head_end..]).to_string();
    Some(Captured { head, body })
}

/// Transport factory that answers from a shared script, one entry per call.
#[derive(Clone, Default)]
pub struct ScriptedFactory {
    script: Arc<Mutex<VecDeque<TransportResult<Value>>>>,
    calls: Arc<AtomicUsize>,
    clients: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFactory {
    pub fn new(script: Vec<TransportResult<Value>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            ..Self::default()
        }
    }

    pub fn push(&self, answer: TransportResult<Value>) {
        self.script.lock().unwrap().push_back(answer);
    }

    /// Transport calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Documents received, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Clients handed out so far.
    pub fn clients(&self) -> usize {
        self.clients.load(Ordering::SeqCst)
    }
}

struct ScriptedClient(ScriptedFactory);

#[async_trait]
impl GraphqlTransport for ScriptedClient {
    async fn run(&self, _: &OperationScope, request: &OperationRequest) -> TransportResult<Value> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        self.0.queries.lock().unwrap().push(request.query().to_string());
        self.0
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Decode("script exhausted".into())))
    }
}

impl TransportFactory for ScriptedFactory {
    fn new_client(&self, _token: &str) -> Arc<dyn GraphqlTransport> {
        self.clients.fetch_add(1, Ordering::SeqCst);
        Arc::new(ScriptedClient(self.clone()))
    }
}

/// Token builder wrapper counting builds.
pub struct CountingTokens<B> {
    inner: B,
    builds: Arc<AtomicUsize>,
}

impl<B: TokenBuilder> CountingTokens<B> {
    pub fn new(inner: B) -> (Self, Arc<AtomicUsize>) {
        let builds = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                builds: builds.clone(),
            },
            builds,
        )
    }
}

impl<B: TokenBuilder> TokenBuilder for CountingTokens<B> {
    fn build(&self, tenant: &str, scopes: &[String]) -> Result<String, TokenError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.inner.build(tenant, scopes)
    }
}

/// Tracing layer recording retry warnings as `(component, attempt)`.
#[derive(Clone, Default)]
pub struct RetryEvents(Arc<Mutex<Vec<(String, u64)>>>);

impl RetryEvents {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<(String, u64)> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct RetryFields {
    component: String,
    attempt: u64,
}

impl Visit for RetryFields {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "attempt" {
            self.attempt = value;
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "component" {
            self.component = value.to_string();
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S: Subscriber> Layer<S> for RetryEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() == Level::WARN && meta.target().ends_with("resilience::retries") {
            let mut fields = RetryFields::default();
            event.record(&mut fields);
            self.0.lock().unwrap().push((fields.component, fields.attempt));
        }
    }
}
