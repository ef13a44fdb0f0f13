//! End-to-end integration tests

use axum::http::{Method, StatusCode};

use super::fixtures::{body_bytes, body_json, header, TestLibrary};
use crate::catalog::DEFAULT_DESCRIPTION;
use crate::http::handlers::VIDEO_NOT_FOUND_MSG;

#[tokio::test]
async fn test_intro_example() {
    let lib = TestLibrary::new();
    let data = lib.add_video("intro.mp4", 1000);
    lib.add_text("intro.txt", "Welcome video");
    lib.refresh();

    let json = body_json(lib.get("/videos").await).await;
    let videos = json["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["title"], "Intro");
    assert_eq!(videos[0]["description"], "Welcome video");
    assert_eq!(videos[0]["fileName"], "intro.mp4");
    assert_eq!(videos[0]["ext"], "mp4");

    let id = videos[0]["id"].as_str().unwrap();
    let response = lib
        .request(Method::GET, &format!("/w?v={}", id), Some("bytes=0-99"))
        .await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(header(&response, "content-length"), Some("100"));
    assert_eq!(header(&response, "content-range"), Some("bytes 0-99/1000"));
    assert_eq!(header(&response, "accept-ranges"), Some("bytes"));
    assert_eq!(header(&response, "content-type"), Some("video/mp4"));
    assert_eq!(body_bytes(response).await, data[..100].to_vec());
}

#[tokio::test]
async fn test_full_file_without_range() {
    let lib = TestLibrary::new();
    let data = lib.add_video("clip.mp4", 4096);
    lib.refresh();
    let id = lib.entry("clip.mp4").id;

    let response = lib.get(&format!("/w?v={}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-length"), Some("4096"));
    assert!(header(&response, "content-range").is_none());
    assert_eq!(body_bytes(response).await, data);
}

#[tokio::test]
async fn test_range_windows() {
    let lib = TestLibrary::new();
    let data = lib.add_video("clip.mp4", 1000);
    lib.refresh();
    let uri = format!("/w?v={}", lib.entry("clip.mp4").id);

    for (start, end) in [(0usize, 0usize), (1, 998), (500, 999), (999, 999)] {
        let range = format!("bytes={}-{}", start, end);
        let response = lib.request(Method::GET, &uri, Some(&range)).await;
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        let expected_range = format!("bytes {}-{}/1000", start, end);
        assert_eq!(header(&response, "content-range"), Some(expected_range.as_str()));
        let body = body_bytes(response).await;
        assert_eq!(body.len(), end - start + 1);
        assert_eq!(body, data[start..=end].to_vec());
    }
}

#[tokio::test]
async fn test_open_ended_range() {
    let lib = TestLibrary::new();
    let data = lib.add_video("clip.mp4", 1000);
    lib.refresh();
    let uri = format!("/w?v={}", lib.entry("clip.mp4").id);

    let response = lib.request(Method::GET, &uri, Some("bytes=900-")).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(header(&response, "content-range"), Some("bytes 900-999/1000"));
    assert_eq!(body_bytes(response).await, data[900..].to_vec());
}

#[tokio::test]
async fn test_malformed_range_serves_whole_file() {
    let lib = TestLibrary::new();
    lib.add_video("clip.mp4", 300);
    lib.refresh();
    let uri = format!("/w?v={}", lib.entry("clip.mp4").id);

    let response = lib.request(Method::GET, &uri, Some("bytes=abc")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.len(), 300);
}

#[tokio::test]
async fn test_range_past_end() {
    let lib = TestLibrary::new();
    lib.add_video("clip.mp4", 100);
    lib.refresh();
    let uri = format!("/w?v={}", lib.entry("clip.mp4").id);

    let response = lib.request(Method::GET, &uri, Some("bytes=100-")).await;
    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(header(&response, "content-range"), Some("bytes */100"));
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_head_has_no_body() {
    let lib = TestLibrary::new();
    lib.add_video("clip.mp4", 1000);
    lib.refresh();
    let uri = format!("/w?v={}", lib.entry("clip.mp4").id);

    for range in [None, Some("bytes=0-99")] {
        let response = lib.request(Method::HEAD, &uri, range).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header(&response, "content-length"), Some("1000"));
        assert_eq!(header(&response, "accept-ranges"), Some("bytes"));
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_unknown_id() {
    let lib = TestLibrary::new();
    lib.refresh();

    for uri in ["/w?v=nope", "/w"] {
        let response = lib.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["msg"], VIDEO_NOT_FOUND_MSG);
    }
}

#[tokio::test]
async fn test_deleted_file_is_server_error() {
    let lib = TestLibrary::new();
    lib.add_video("clip.mp4", 10);
    lib.refresh();
    let id = lib.entry("clip.mp4").id;
    std::fs::remove_file(lib.path().join("clip.mp4")).unwrap();

    let response = lib.get(&format!("/w?v={}", id)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_search() {
    let lib = TestLibrary::new();
    lib.add_video("intro.mp4", 10);
    lib.add_video("holiday.mp4", 10);
    lib.refresh();

    let json = body_json(lib.get("/s?q=INT").await).await;
    let videos = json["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["title"], "Intro");
    assert_eq!(videos[0]["description"], DEFAULT_DESCRIPTION);

    let json = body_json(lib.get("/s?q=zzz").await).await;
    assert!(json["videos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_without_query_redirects() {
    let lib = TestLibrary::new();

    for uri in ["/s", "/s?q="] {
        let response = lib.get(uri).await;
        assert!(response.status().is_redirection());
        assert_eq!(header(&response, "location"), Some("/"));
    }
}

#[tokio::test]
async fn test_links_survive_refresh() {
    let lib = TestLibrary::new();
    lib.add_video("intro.mp4", 10);
    lib.refresh();
    let id = lib.entry("intro.mp4").id;

    lib.add_video("later.mp4", 10);
    lib.refresh();
    lib.refresh();

    let json = body_json(lib.get("/videos").await).await;
    assert_eq!(json["videos"].as_array().unwrap().len(), 2);

    let response = lib.get(&format!("/w?v={}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_page_shells() {
    let lib = TestLibrary::new();
    std::fs::create_dir_all(lib.path().join("static/public")).unwrap();
    lib.add_text("static/index.html", "<html>index</html>");
    lib.add_text("static/public/app.js", "console.log(1)");

    let response = lib.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<html>index</html>".to_vec());

    let response = lib.get("/public/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);
}
