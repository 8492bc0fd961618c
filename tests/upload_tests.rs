//! Upload endpoint tests with hand-built multipart bodies

use aichat_gateway::config::Settings;
use aichat_gateway::handlers::{build_router, AppState};
use axum::http::StatusCode;
use axum_test::TestServer;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

const BOUNDARY: &str = "gateway-test-boundary";

fn server(dir: &TempDir) -> TestServer {
    let vars: HashMap<String, String> = HashMap::from([(
        "KEY_STORE_PATH".to_string(),
        dir.path().join(".env").display().to_string(),
    )]);
    let settings = Settings::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = AppState::from_settings(settings).unwrap();
    TestServer::new(build_router(Arc::new(state))).unwrap()
}

/// Multipart body with a single part
fn multipart_body(field: &str, file_name: Option<&str>, content: &[u8]) -> Vec<u8> {
    let disposition = match file_name {
        Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
        None => format!("form-data; name=\"{}\"", field),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// PDF with one line of Courier text per page
fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

async fn upload(server: &TestServer, body: Vec<u8>) -> (StatusCode, Value) {
    let response = server
        .post("/upload")
        .content_type(&format!("multipart/form-data; boundary={}", BOUNDARY))
        .bytes(body.into())
        .await;
    (response.status_code(), response.json())
}

#[tokio::test]
async fn test_txt_upload_returns_content() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let text = "Quarterly notes\nrevenue: up 🦀\n";

    let (status, body) = upload(&server, multipart_body("file", Some("notes.txt"), text.as_bytes())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"text": text}));
}

#[tokio::test]
async fn test_extension_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);

    let (status, body) = upload(&server, multipart_body("file", Some("README.TXT"), b"hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "hello");
}

#[tokio::test]
async fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);

    let (status, body) = upload(&server, multipart_body("file", Some("letter.docx"), b"PK\x03\x04")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "unsupported_file_type");
    assert!(body["error"]["message"].as_str().unwrap().contains(".docx"));
}

#[tokio::test]
async fn test_missing_file_field() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);

    let (status, body) = upload(&server, multipart_body("comment", None, b"no file here")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "no_file_provided");
}

#[tokio::test]
async fn test_empty_file_name() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);

    let (status, body) = upload(&server, multipart_body("file", Some(""), b"")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "no_file_provided");
}

#[tokio::test]
async fn test_pdf_upload_returns_pages_in_order() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let pdf = pdf_with_pages(&["PageOneText", "PageTwoText", "PageThreeText"]);

    let (status, body) = upload(&server, multipart_body("file", Some("report.PDF"), &pdf)).await;

    assert_eq!(status, StatusCode::OK);
    let text = body["text"].as_str().unwrap();
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    assert_eq!(lines, vec!["PageOneText", "PageTwoText", "PageThreeText"]);
}

#[tokio::test]
async fn test_malformed_pdf() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);

    let (status, body) = upload(&server, multipart_body("file", Some("scan.pdf"), b"%PDF-1.4 truncated")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["type"], "extraction_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("Error processing PDF"));
}
