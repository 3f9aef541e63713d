// src/core/net.rs
//
// Tiny blocking HTTP client.
// - http://  : HTTP/1.0 over TcpStream, server closes the connection (no chunking).
// - https:// : delegated to a `curl` subprocess; no TLS stack in-process.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::process::{Command, Stdio};
use std::time::Duration;

use thiserror::Error;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("connection to {host} failed: {source}")]
    Connect { host: String, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("curl not available: {0}")]
    CurlMissing(io::Error),
    #[error("curl failed: {0}")]
    Curl(String),
    #[error("malformed HTTP response: {0}")]
    Malformed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self { Method::Get => "GET", Method::Post => "POST" }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Http,
    Https,
}

#[derive(Debug, Clone)]
struct ParsedUrl {
    scheme: Scheme,
    host: String,
    port: u16,
    path: String,
}

impl ParsedUrl {
    fn parse(url: &str) -> Result<Self, HttpError> {
        let (scheme, rest) = if let Some(rest) = url.strip_prefix("https://") {
            (Scheme::Https, rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            (Scheme::Http, rest)
        } else {
            return Err(HttpError::InvalidUrl(format!("unsupported scheme: {url}")));
        };

        let (host_port, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        let default_port = match scheme { Scheme::Http => 80, Scheme::Https => 443 };
        let (host, port) = match host_port.rsplit_once(':') {
            Some((h, p)) => {
                let port = p
                    .parse::<u16>()
                    .map_err(|e| HttpError::InvalidUrl(format!("invalid port in {url}: {e}")))?;
                (h, port)
            }
            None => (host_port, default_port),
        };

        if host.is_empty() {
            return Err(HttpError::InvalidUrl(format!("empty host: {url}")));
        }

        Ok(Self { scheme, host: s!(host), port, path: s!(path) })
    }

    fn authority(&self) -> String {
        match (self.scheme, self.port) {
            (Scheme::Http, 80) | (Scheme::Https, 443) => self.host.clone(),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}

/// GET `url` with extra request headers.
pub fn get(url: &str, headers: &[(&str, &str)]) -> Result<Response, HttpError> {
    send(Method::Get, url, headers, None)
}

/// POST an `application/x-www-form-urlencoded` body.
pub fn post_form(url: &str, form: &[(&str, &str)]) -> Result<Response, HttpError> {
    let body = form
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    send(
        Method::Post,
        url,
        &[("Content-Type", "application/x-www-form-urlencoded")],
        Some(&body),
    )
}

pub fn send(
    method: Method,
    url: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> Result<Response, HttpError> {
    let parsed = ParsedUrl::parse(url)?;
    logd!("HTTP: {} {}://{}{}", method.as_str(),
        if parsed.scheme == Scheme::Https { "https" } else { "http" },
        parsed.authority(), parsed.path);

    match parsed.scheme {
        Scheme::Http => send_plain(method, &parsed, headers, body),
        Scheme::Https => send_via_curl(method, url, headers, body),
    }
}

fn send_plain(
    method: Method,
    url: &ParsedUrl,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> Result<Response, HttpError> {
    let mut stream = TcpStream::connect((url.host.as_str(), url.port))
        .map_err(|source| HttpError::Connect { host: url.authority(), source })?;
    let timeout = Some(Duration::from_secs(HTTP_TIMEOUT_SECS));
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    let mut req = format!(
        "{} {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nConnection: close\r\n",
        method.as_str(),
        url.path,
        url.authority(),
        USER_AGENT
    );
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if let Some(b) = body {
        req.push_str(&format!("Content-Length: {}\r\n", b.len()));
    }
    req.push_str("\r\n");
    if let Some(b) = body {
        req.push_str(b);
    }

    stream.write_all(req.as_bytes())?;
    stream.flush()?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf)?;
    parse_response(&String::from_utf8_lossy(&buf))
}

fn send_via_curl(
    method: Method,
    url: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> Result<Response, HttpError> {
    let timeout = HTTP_TIMEOUT_SECS.to_string();
    let mut cmd = Command::new("curl");
    cmd.args(["-sS", "-i", "--max-time", &timeout, "-X", method.as_str(), "-A", USER_AGENT]);
    for (k, v) in headers {
        cmd.arg("-H").arg(format!("{k}: {v}"));
    }
    if body.is_some() {
        cmd.args(["--data-binary", "@-"]);
    }
    cmd.arg(url)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(HttpError::CurlMissing)?;
    if let Some(mut stdin) = child.stdin.take() {
        if let Some(b) = body {
            stdin.write_all(b.as_bytes())?;
        }
        // dropping stdin closes it so curl sees EOF
    }
    let output = child.wait_with_output()?;

    if !output.status.success() && output.stdout.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HttpError::Curl(s!(stderr.trim())));
    }
    parse_response(&String::from_utf8_lossy(&output.stdout))
}

/// Split a raw response into status + body. Skips interim `1xx` blocks.
pub(crate) fn parse_response(raw: &str) -> Result<Response, HttpError> {
    let mut rest = raw;
    loop {
        let (head, body) = rest
            .split_once("\r\n\r\n")
            .ok_or_else(|| HttpError::Malformed(s!("missing header terminator")))?;
        let status_line = head.lines().next().unwrap_or("");
        let status = status_line
            .split_whitespace()
            .nth(1)
            .and_then(|c| c.parse::<u16>().ok())
            .ok_or_else(|| HttpError::Malformed(format!("bad status line: {status_line}")))?;

        if (100..200).contains(&status) {
            rest = body;
            continue;
        }
        return Ok(Response { status, body: s!(body) });
    }
}

/// RFC 3986 unreserved characters pass; everything else is %-escaped.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_and_body() {
        let r = parse_response("HTTP/1.0 200 OK\r\nContent-Type: x\r\n\r\nhello").unwrap();
        assert_eq!(r.status, 200);
        assert_eq!(r.body, "hello");
    }

    #[test]
    fn skips_continue_block() {
        let raw = "HTTP/1.1 100 Continue\r\n\r\nHTTP/2 404 \r\nx: y\r\n\r\n{}";
        let r = parse_response(raw).unwrap();
        assert_eq!(r.status, 404);
        assert_eq!(r.body, "{}");
    }

    #[test]
    fn encodes_reserved() {
        assert_eq!(percent_encode("a b/c:d"), "a%20b%2Fc%3Ad");
        assert_eq!(percent_encode("Lauf-daten_1.~"), "Lauf-daten_1.~");
    }

    #[test]
    fn url_ports() {
        let u = ParsedUrl::parse("http://127.0.0.1:8080/token").unwrap();
        assert_eq!((u.host.as_str(), u.port, u.path.as_str()), ("127.0.0.1", 8080, "/token"));
        let u = ParsedUrl::parse("https://sheets.googleapis.com").unwrap();
        assert_eq!((u.port, u.path.as_str()), (443, "/"));
        assert!(ParsedUrl::parse("ftp://x").is_err());
    }
}
