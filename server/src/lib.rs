//! `eventify-server` — HTTP front end for the Eventify site.
//!
//! A small synchronous server on top of `tiny_http`: a fixed pool of
//! worker threads pulls requests off one listener, converts each to the
//! router's plain request type, and writes the routed response back.
//! All application behavior lives in [`router`]; this crate's own code
//! is only the wire edge.

use std::sync::Arc;
use std::thread;

pub mod http;
pub mod pages;
pub mod router;

pub use router::{App, SESSION_COOKIE};

use crate::http::{HttpRequest, HttpResponse, Method};

/// Serve requests until the process exits.
///
/// Spawns `workers` threads sharing the listener and joins them; this
/// call does not return in normal operation.
pub fn serve(server: Arc<tiny_http::Server>, app: Arc<App>, workers: usize) {
    let mut handles = Vec::new();
    for _ in 0..workers.max(1) {
        let server = Arc::clone(&server);
        let app = Arc::clone(&app);
        handles.push(thread::spawn(move || worker(&server, &app)));
    }
    for handle in handles {
        let _ = handle.join();
    }
}

fn worker(server: &tiny_http::Server, app: &App) {
    loop {
        match server.recv() {
            Ok(request) => handle_connection(app, request),
            Err(e) => tracing::warn!("accept failed: {e}"),
        }
    }
}

fn handle_connection(app: &App, mut request: tiny_http::Request) {
    let req = read_request(&mut request);
    let resp = router::handle(app, &req);
    if let Err(e) = request.respond(to_wire(resp)) {
        tracing::warn!("failed to send response: {e}");
    }
}

/// Convert a wire request into the router's representation.
fn read_request(request: &mut tiny_http::Request) -> HttpRequest {
    let method = match request.method() {
        tiny_http::Method::Get => Method::Get,
        tiny_http::Method::Post => Method::Post,
        _ => Method::Other,
    };

    let path = request
        .url()
        .split('?')
        .next()
        .unwrap_or("/")
        .to_string();

    let cookies = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Cookie"))
        .map(|h| http::parse_cookie_header(h.value.as_str()))
        .unwrap_or_default();

    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        tracing::warn!("failed to read request body: {e}");
        body.clear();
    }

    HttpRequest {
        method,
        path,
        body,
        cookies,
    }
}

fn to_wire(resp: HttpResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut out = tiny_http::Response::from_string(resp.body).with_status_code(resp.status);
    if let Some(h) = header("Content-Type", resp.content_type) {
        out = out.with_header(h);
    }
    if let Some(h) = resp.location.as_deref().and_then(|l| header("Location", l)) {
        out = out.with_header(h);
    }
    if let Some(h) = resp
        .set_cookie
        .as_deref()
        .and_then(|c| header("Set-Cookie", c))
    {
        out = out.with_header(h);
    }
    out
}

// Header construction only fails on non-ASCII names/values, which we
// never produce; a failure just drops the header.
fn header(name: &str, value: &str) -> Option<tiny_http::Header> {
    tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}
