//! Minimal canned-response HTTP server for exercising the real client.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Sample `.spec` report with the newest observation on the third line.
pub const SAMPLE_SPEC: &str = "\
#YY  MM DD hh mm WVHT SwH SwP WWH WWP SwD WWD STEEPNESS  APD
#yr  mo dy hr mn    m   m sec   m sec  -  degT     -      sec
2025 01 06 12 00  1.2 1.0  7.0 0.5 4.0 ESE  100    STEEP  5.1
2025 01 06 11 00  1.3 1.1  7.7 0.5 4.0 ESE  100    STEEP  5.2
";

/// Running server plus the request lines it has received.
pub struct CannedServer {
    /// `http://host:port`, for documents outside the realtime directory
    pub origin: String,
    pub base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl CannedServer {
    /// Serve `body` with `status` to the next `connections` clients.
    pub async fn start(connections: usize, status: &'static str, body: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut request_lines = Vec::with_capacity(connections);
            for _ in 0..connections {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }

                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                socket.write_all(head.as_bytes()).await.unwrap();
                socket.write_all(&body).await.unwrap();
                let _ = socket.shutdown().await;

                let first_line = String::from_utf8_lossy(&request)
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                request_lines.push(first_line);
            }
            request_lines
        });

        let origin = format!("http://{}", addr);
        CannedServer {
            base_url: format!("{}/data/realtime2", origin),
            origin,
            handle,
        }
    }

    pub async fn ok(connections: usize, body: &str) -> Self {
        Self::start(connections, "200 OK", body.as_bytes().to_vec()).await
    }

    /// Wait for every expected connection and return the request lines.
    pub async fn requests(self) -> Vec<String> {
        self.handle.await.unwrap()
    }
}

/// Base URL of a port nothing is listening on.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/data/realtime2", addr)
}
