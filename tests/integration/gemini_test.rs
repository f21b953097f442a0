// Gemini client against a loopback HTTP server
//
// Each test serves exactly one canned response and captures the raw
// request so the wire format can be checked.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use tifomaster::config::GeneratorConfig;
use tifomaster::generator::{GeminiGenerator, GenerationError, ImageGenerator, SourceImage};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::test_harness::png;

/// Serve one response, return the endpoint and a handle yielding the raw request.
async fn serve_once(status: u16, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn generator(endpoint: &str) -> GeminiGenerator {
    let config = GeneratorConfig {
        endpoint: endpoint.to_string(),
        api_key: "test-key".to_string(),
        ..GeneratorConfig::default()
    };
    GeminiGenerator::new(&config).unwrap()
}

fn image_response(bytes: &[u8]) -> String {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Voici votre tifo" },
                    { "inlineData": { "mimeType": "image/png", "data": BASE64.encode(bytes) } }
                ]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

fn request_body(raw: &str) -> Value {
    let body = raw.split("\r\n\r\n").nth(1).unwrap();
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_returns_inline_image_and_sends_expected_request() {
    let generated = png(32, 18);
    let (endpoint, server) = serve_once(200, image_response(&generated)).await;

    let source = SourceImage::from_bytes(png(8, 8));
    let result = generator(&endpoint).generate(&source, "Sénégal").await.unwrap();
    assert_eq!(result, generated);

    let raw = server.await.unwrap();
    let request_line = raw.lines().next().unwrap();
    assert_eq!(
        request_line,
        "POST /v1beta/models/gemini-2.5-flash-image:generateContent HTTP/1.1"
    );
    assert!(raw.to_lowercase().contains("x-goog-api-key: test-key"));

    let body = request_body(&raw);
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(
        BASE64.decode(parts[0]["inlineData"]["data"].as_str().unwrap()).unwrap(),
        source.bytes()
    );
    assert!(parts[1]["text"].as_str().unwrap().contains("identity of Sénégal"));
    assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
}

#[tokio::test]
async fn test_text_only_response_is_empty_result() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": "Je ne peux pas" }] } }]
    })
    .to_string();
    let (endpoint, _server) = serve_once(200, body).await;

    let err = generator(&endpoint)
        .generate(&SourceImage::from_bytes(png(4, 4)), "France")
        .await
        .unwrap_err();
    assert_eq!(err, GenerationError::EmptyResult);
}

#[tokio::test]
async fn test_status_mapping() {
    let cases = [
        (401, "UNAUTHENTICATED"),
        (403, "PERMISSION_DENIED"),
        (429, "RESOURCE_EXHAUSTED"),
        (500, "INTERNAL"),
    ];

    for (status, name) in cases {
        let body = json!({ "error": { "code": status, "message": "nope", "status": name } }).to_string();
        let (endpoint, _server) = serve_once(status, body).await;

        let err = generator(&endpoint)
            .generate(&SourceImage::from_bytes(png(4, 4)), "France")
            .await
            .unwrap_err();

        let expected_message = format!("{}: nope", name);
        match (status, err) {
            (401 | 403, GenerationError::Auth(msg)) => assert_eq!(msg, expected_message),
            (429, GenerationError::Quota(msg)) => assert_eq!(msg, expected_message),
            (500, GenerationError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, expected_message);
            }
            (status, other) => panic!("status {} mapped to {:?}", status, other),
        }
    }
}

#[tokio::test]
async fn test_malformed_json_is_invalid_response() {
    let (endpoint, _server) = serve_once(200, "{not json".to_string()).await;

    let err = generator(&endpoint)
        .generate(&SourceImage::from_bytes(png(4, 4)), "France")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = generator(&format!("http://{}", addr))
        .generate(&SourceImage::from_bytes(png(4, 4)), "France")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}
