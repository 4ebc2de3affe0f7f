//! Minimal HTTP/1.1 server impersonating both reputation providers for
//! integration tests.
//!
//! Serves the threat-list lookup POST, the deep-scan submit POST, and the
//! deep-scan result GET from one listener. Responses are configured per
//! instance; request counters let tests assert how often the network was
//! actually hit.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct ApiServerOptions {
    /// Threat types returned by the lookup endpoint; empty = no matches.
    pub threat_matches: Vec<String>,
    /// Status code for the lookup endpoint (200 = normal).
    pub lookup_status: u32,
    /// If true, the lookup endpoint answers 200 with a non-JSON body.
    pub lookup_garbage: bool,
    /// Overall verdict served by the result endpoint.
    pub scan_malicious: bool,
    pub scan_categories: Vec<String>,
    pub scan_score: f64,
    /// If true, the result payload carries no verdicts section.
    pub scan_without_verdict: bool,
}

impl Default for ApiServerOptions {
    fn default() -> Self {
        Self {
            threat_matches: Vec::new(),
            lookup_status: 200,
            lookup_garbage: false,
            scan_malicious: false,
            scan_categories: Vec::new(),
            scan_score: 0.0,
            scan_without_verdict: false,
        }
    }
}

/// How often each endpoint was hit.
#[derive(Debug, Default)]
pub struct ApiServerStats {
    pub lookups: AtomicUsize,
    pub submits: AtomicUsize,
    pub results: AtomicUsize,
}

/// Starts the server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345") and the request counters. The server
/// runs until the process exits.
pub fn start(opts: ApiServerOptions) -> (String, Arc<ApiServerStats>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let stats = Arc::new(ApiServerStats::default());
    let thread_stats = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = opts.clone();
            let stats = Arc::clone(&thread_stats);
            thread::spawn(move || handle(stream, &opts, &stats));
        }
    });
    (format!("http://127.0.0.1:{}", port), stats)
}

fn handle(mut stream: TcpStream, opts: &ApiServerOptions, stats: &ApiServerStats) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 16384];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);

    if path.contains("threatMatches") {
        stats.lookups.fetch_add(1, Ordering::SeqCst);
        if opts.lookup_status != 200 {
            respond(&mut stream, opts.lookup_status, "");
            return;
        }
        if opts.lookup_garbage {
            respond(&mut stream, 200, "<html>quota exceeded</html>");
            return;
        }
        respond(&mut stream, 200, &lookup_body(&opts.threat_matches));
        return;
    }

    if method.eq_ignore_ascii_case("POST") && path.ends_with("/scan/") {
        stats.submits.fetch_add(1, Ordering::SeqCst);
        respond(&mut stream, 200, r#"{"uuid":"test-scan-0001"}"#);
        return;
    }

    if method.eq_ignore_ascii_case("GET") && path.contains("/result/") {
        stats.results.fetch_add(1, Ordering::SeqCst);
        respond(&mut stream, 200, &result_body(opts));
        return;
    }

    respond(&mut stream, 404, "");
}

fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");
    (method, path)
}

fn lookup_body(matches: &[String]) -> String {
    if matches.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = matches
        .iter()
        .map(|t| format!(r#"{{"threatType":"{}","threat":{{"url":"http://x/"}}}}"#, t))
        .collect();
    format!(r#"{{"matches":[{}]}}"#, entries.join(","))
}

fn result_body(opts: &ApiServerOptions) -> String {
    if opts.scan_without_verdict {
        return r#"{"task":{"state":"pending"}}"#.to_string();
    }
    let categories: Vec<String> = opts
        .scan_categories
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect();
    format!(
        r#"{{"verdicts":{{"overall":{{"malicious":{},"categories":[{}],"score":{}}}}}}}"#,
        opts.scan_malicious,
        categories.join(","),
        opts.scan_score
    )
}

fn respond(stream: &mut TcpStream, status: u32, body: &str) {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
