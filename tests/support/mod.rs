//! Shared helpers for integration tests: socket guard and portfolio fixtures.

#![allow(dead_code)]

pub mod socket_guard;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "braveking";
pub const USER_ID: u64 = 199_106;

/// Profile page with the numeric id embedded several times plus one decoy.
pub fn profile_html() -> String {
    format!(
        r#"<html><script>window.cache = {{"user_id":{USER_ID}}};</script>
<div data-x='{{"user_id": {USER_ID}}}'></div>
<a href="/follow?user_id=7">follow</a>
<script>var p = {{"user_id":{USER_ID},"id":1}};</script></html>"#
    )
}

pub fn detail(hash_id: &str, images: &[&str]) -> Value {
    let assets: Vec<Value> = images
        .iter()
        .enumerate()
        .map(|(i, url)| {
            json!({"id": i + 1, "has_image": true, "image_url": url, "asset_type": "image"})
        })
        .collect();
    json!({"hash_id": hash_id, "title": hash_id, "assets": assets})
}

pub fn listing(total: u64, data: Value) -> Value {
    json!({"total_count": total, "data": data})
}

pub async fn mount_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/{USERNAME}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_html()))
        .mount(server)
        .await;
}

/// Root works listing page `page`.
pub async fn mount_root_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{USERNAME}/projects.json")))
        .and(query_param("page", page.to_string()))
        .and(query_param_is_missing("album_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .named(format!("root page {page}"))
        .mount(server)
        .await;
}

pub async fn mount_album_index_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/albums.json"))
        .and(query_param("user_id", USER_ID.to_string()))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .named(format!("album index page {page}"))
        .mount(server)
        .await;
}

pub async fn mount_album_page(server: &MockServer, album_id: u64, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{USERNAME}/projects.json")))
        .and(query_param("album_id", album_id.to_string()))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .named(format!("album {album_id} page {page}"))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, hash_id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/projects/{hash_id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
