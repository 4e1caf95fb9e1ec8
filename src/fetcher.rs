use std::io::Read;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

/// Largest response body the fetcher will accept.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

const READ_CHUNK_BYTES: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("unable to request data from {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server responded with code {0}")]
    Status(u16),

    #[error("failed reading response body")]
    Body(#[source] std::io::Error),

    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Byte accumulator that refuses to grow past `limit`.
struct BodyBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl BodyBuffer {
    fn new(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    fn append(&mut self, chunk: &[u8]) -> Result<(), FetchError> {
        if self.data.len() + chunk.len() > self.limit {
            return Err(FetchError::BodyTooLarge { limit: self.limit });
        }
        self.data.extend_from_slice(chunk);
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Perform one blocking GET and return the response body.
///
/// Succeeds only on HTTP 200 with a body no larger than [`MAX_BODY_BYTES`].
/// One attempt, no retries; the client lives only for the duration of the
/// call.
pub fn fetch(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(FetchError::Client)?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    debug!(code = status.as_u16(), "response received");
    if status != StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    let mut body = BodyBuffer::new(MAX_BODY_BYTES);
    let mut chunk = [0u8; READ_CHUNK_BYTES];
    loop {
        let read = response.read(&mut chunk).map_err(FetchError::Body)?;
        if read == 0 {
            break;
        }
        body.append(&chunk[..read])?;
    }
    debug!(bytes = body.len(), "body accumulated");

    Ok(body.into_bytes())
}

#[cfg(test)]
pub(crate) mod test_http {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve a single canned HTTP response on a random local port and
    /// return the base URL to aim a request at.
    pub(crate) fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            // A single read is enough to drain a small GET request head.
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request).unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{body}",
                len = body.len(),
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }
}
