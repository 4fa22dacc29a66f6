//! Minimal HTTP/1.1 responder for driving real scans in tests.
//!
//! Answers every GET with a body whose size depends on the `otp` query
//! parameter: codes in `hits` get an oversized body, everything else a short
//! one. Each connection serves one request and is closed.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const LARGE_BODY: usize = 2_500;
pub const SMALL_BODY: usize = 120;

pub struct Responder {
    pub addr: SocketAddr,
    served: Arc<AtomicUsize>,
}

impl Responder {
    /// Starts serving on an ephemeral loopback port.
    pub async fn start(hits: &[&str], status: u16) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let hits: Arc<HashSet<String>> = Arc::new(hits.iter().map(|h| h.to_string()).collect());
        let served = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&served);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let hits = Arc::clone(&hits);
                let counter = Arc::clone(&counter);
                tokio::spawn(async move {
                    if serve(stream, &hits, status).await.is_ok() {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        Ok(Self { addr, served })
    }

    pub fn template(&self) -> String {
        format!("http://{}/check?id={{target}}&otp={{candidate}}", self.addr)
    }

    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

async fn serve(mut stream: TcpStream, hits: &HashSet<String>, status: u16) -> anyhow::Result<()> {
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            anyhow::bail!("client closed before finishing the request");
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request = String::from_utf8_lossy(&buf);
    let path: &str = request.split_whitespace().nth(1).unwrap_or("/");
    let otp: Option<&str> = path
        .split_once('?')
        .map(|(_, query)| query)
        .into_iter()
        .flat_map(|query| query.split('&'))
        .find_map(|pair| pair.strip_prefix("otp="));

    let len = match otp {
        Some(code) if hits.contains(code) => LARGE_BODY,
        _ => SMALL_BODY,
    };
    let body = "x".repeat(len);
    let response = format!(
        "HTTP/1.1 {status} Whatever\r\n\
         Content-Type: text/plain\r\n\
         Content-Length: {len}\r\n\
         Connection: close\r\n\r\n{body}"
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}
