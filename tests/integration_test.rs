//! Tests de integración end-to-end del servidor
//! tests/integration_test.rs
//!
//! Cada test arranca un servidor real en el puerto 0 (efímero) con un
//! webroot temporal propio, y habla HTTP por un TcpStream normal. Los
//! bodies llegan comprimidos con gzip y se decodifican con flate2.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use static_server::config::Config;
use static_server::http::request::QueryParams;
use static_server::router::RouteTarget;
use static_server::server::Server;

static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Crea un webroot temporal único para el test
fn temp_webroot(tag: &str) -> PathBuf {
    let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "static_server_it_{}_{}_{}",
        std::process::id(),
        tag,
        n
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn calculate_next(query: &QueryParams) -> Result<Vec<u8>, String> {
    let num: i64 = query
        .get("num")
        .ok_or("Missing parameter: num")?
        .parse()
        .map_err(|_| "Parameter num must be an integer")?;
    Ok((num + 1).to_string().into_bytes())
}

/// Arranca un servidor sobre el webroot dado y retorna su dirección real
fn start_server(webroot: &Path) -> SocketAddr {
    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.serve_dir = webroot.display().to_string();
    config.read_timeout_ms = 300;

    let mut server = Server::new(config);
    server.add_route("/calculate-next", RouteTarget::Handler(calculate_next));

    server.bind().expect("bind");
    let addr = server.local_addr().expect("local_addr");

    thread::spawn(move || {
        let _ = server.run();
    });

    addr
}

/// Envía un request y lee hasta que el servidor cierre la conexión
fn send_request(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

/// Separa una respuesta cruda en (bloque de headers, body)
fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let pos = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response without header terminator");
    let headers = String::from_utf8_lossy(&raw[..pos]).to_string();
    let body = raw[pos + 4..].to_vec();
    (headers, body)
}

/// Lee exactamente una respuesta del stream (headers + Content-Length bytes)
///
/// Necesario en conexiones keep-alive, donde read_to_end bloquearía hasta
/// el timeout del servidor.
fn read_one_response(stream: &mut TcpStream) -> (String, Vec<u8>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).expect("read headers");
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length: usize = headers
        .split("\r\n")
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .expect("missing Content-Length")
        .parse()
        .expect("invalid Content-Length");

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).expect("read body");
        assert!(n > 0, "connection closed before body was complete");
        body.extend_from_slice(&chunk[..n]);
    }

    (headers, body)
}

fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).unwrap();
    out
}

#[test]
fn test_serves_index_html_for_root() {
    let webroot = temp_webroot("index");
    fs::write(webroot.join("index.html"), b"<html></html>").unwrap();
    let addr = start_server(&webroot);

    let raw = send_request(addr, b"GET / HTTP/1.1\r\n\r\n");
    let (headers, body) = split_response(&raw);

    assert!(headers.starts_with("HTTP/1.1 200 OK\r\n"), "{}", headers);
    assert!(headers.contains("Content-Type: text/html; charset=utf-8"));
    assert!(headers.contains("Content-Encoding: gzip"));
    assert_eq!(gunzip(&body), b"<html></html>");
}

#[test]
fn test_serves_literal_path_under_webroot() {
    let webroot = temp_webroot("literal");
    fs::create_dir_all(webroot.join("css")).unwrap();
    fs::write(webroot.join("css/site.css"), b"body { margin: 0 }").unwrap();
    let addr = start_server(&webroot);

    let raw = send_request(addr, b"GET /css/site.css HTTP/1.1\r\n\r\n");
    let (headers, body) = split_response(&raw);

    assert!(headers.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(headers.contains("Content-Type: text/css; charset=utf-8"));
    assert_eq!(gunzip(&body), b"body { margin: 0 }");
}

#[test]
fn test_missing_file_is_404_and_closes() {
    let webroot = temp_webroot("missing");
    let addr = start_server(&webroot);

    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream
        .write_all(b"GET /missing.txt HTTP/1.1\r\n\r\n")
        .unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).unwrap();
    let (headers, body) = split_response(&raw);

    assert!(headers.starts_with("HTTP/1.1 404 Not Found\r\n"), "{}", headers);
    assert!(headers.contains("Connection: Closed"));
    assert_eq!(gunzip(&body), b"Not Found");

    // El servidor cerró después del write: el siguiente read da EOF
    let mut extra = [0u8; 16];
    assert_eq!(stream.read(&mut extra).unwrap(), 0);
}

#[test]
fn test_dynamic_route_computes_body() {
    let webroot = temp_webroot("dynamic");
    let addr = start_server(&webroot);

    let raw = send_request(addr, b"GET /calculate-next?num=4 HTTP/1.1\r\n\r\n");
    let (headers, body) = split_response(&raw);

    assert!(headers.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(headers.contains("Content-Type: text/plain; charset=utf-8"));
    assert_eq!(gunzip(&body), b"5");
}

#[test]
fn test_dynamic_route_error_is_500() {
    let webroot = temp_webroot("dynamic_err");
    let addr = start_server(&webroot);

    let raw = send_request(addr, b"GET /calculate-next?num=abc HTTP/1.1\r\n\r\n");
    let (headers, body) = split_response(&raw);

    assert!(
        headers.starts_with("HTTP/1.1 500 Internal Server Error\r\n"),
        "{}",
        headers
    );
    assert!(headers.contains("Connection: keep-alive"));
    assert_eq!(gunzip(&body), b"Parameter num must be an integer");
}

#[test]
fn test_malformed_request_closes_without_response() {
    let webroot = temp_webroot("malformed");
    let addr = start_server(&webroot);

    let raw = send_request(addr, b"FOO\r\n\r\n");

    assert!(raw.is_empty(), "expected no bytes, got {:?}", raw);
}

#[test]
fn test_non_get_method_closes_without_response() {
    let webroot = temp_webroot("post");
    fs::write(webroot.join("index.html"), b"<html></html>").unwrap();
    let addr = start_server(&webroot);

    let raw = send_request(addr, b"POST / HTTP/1.1\r\n\r\n");

    assert!(raw.is_empty());
}

#[test]
fn test_keep_alive_serves_multiple_requests() {
    let webroot = temp_webroot("keepalive");
    fs::write(webroot.join("index.html"), b"<html></html>").unwrap();
    fs::write(webroot.join("other.html"), b"<p>other</p>").unwrap();
    let addr = start_server(&webroot);

    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    stream.write_all(b"GET / HTTP/1.1\r\n\r\n").unwrap();
    let (headers1, body1) = read_one_response(&mut stream);
    assert!(headers1.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(headers1.contains("Connection: keep-alive"));
    assert_eq!(gunzip(&body1), b"<html></html>");

    // La misma conexión sigue viva para el segundo request
    stream.write_all(b"GET /other.html HTTP/1.1\r\n\r\n").unwrap();
    let (headers2, body2) = read_one_response(&mut stream);
    assert!(headers2.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(gunzip(&body2), b"<p>other</p>");
}

#[test]
fn test_concurrent_connections_are_served() {
    let webroot = temp_webroot("concurrent");
    fs::write(webroot.join("index.html"), b"<html></html>").unwrap();
    let addr = start_server(&webroot);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(move || {
                let raw = send_request(addr, b"GET / HTTP/1.1\r\n\r\n");
                let (headers, body) = split_response(&raw);
                assert!(headers.starts_with("HTTP/1.1 200 OK\r\n"));
                assert_eq!(gunzip(&body), b"<html></html>");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_response_headers_have_wire_order() {
    let webroot = temp_webroot("order");
    fs::write(webroot.join("index.html"), b"<html></html>").unwrap();
    let addr = start_server(&webroot);

    let raw = send_request(addr, b"GET / HTTP/1.1\r\n\r\n");
    let (headers, _) = split_response(&raw);
    let lines: Vec<&str> = headers.split("\r\n").collect();

    assert_eq!(lines[0], "HTTP/1.1 200 OK");
    assert!(lines[1].starts_with("Date: ") && lines[1].ends_with(" GMT"));
    assert!(lines[2].starts_with("Server: "));
    assert_eq!(lines[3], "Content-Encoding: gzip");
    assert!(lines[4].starts_with("Content-Length: "));
    assert_eq!(lines[5], "Content-Type: text/html; charset=utf-8");
    assert_eq!(lines[6], "Connection: keep-alive");
}
