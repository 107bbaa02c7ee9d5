//! End-to-end discovery against a mock ArtStation over the direct transport.

use std::sync::Arc;

use artstation_core::{
    ArtStation, DirectTransport, DiscoveryError, ImageTask, SiteConfig, TransportError,
};
use futures_util::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;
use support::{
    USERNAME, detail, listing, mount_album_index_page, mount_album_page, mount_detail,
    mount_profile, mount_root_page,
};

fn site(server: &MockServer) -> ArtStation {
    let config = SiteConfig {
        page_delay_ms: 0,
        ..SiteConfig::with_base_url(server.uri())
    };
    ArtStation::new(format!("{}/{USERNAME}", server.uri()), config).expect("valid profile url")
}

async fn walk(server: &MockServer) -> Result<Vec<ImageTask>, DiscoveryError> {
    let site = site(server);
    let transport = Arc::new(DirectTransport::new(site.config()).expect("client"));
    site.task_maker(transport).tasks().try_collect().await
}

fn summary(entries: &[(&str, Option<&str>)]) -> Vec<(String, Option<String>)> {
    entries
        .iter()
        .map(|(url, album)| ((*url).to_string(), album.map(str::to_string)))
        .collect()
}

fn outline(tasks: &[ImageTask]) -> Vec<(String, Option<String>)> {
    tasks
        .iter()
        .map(|task| (task.url.clone(), task.album_name().map(str::to_string)))
        .collect()
}

#[tokio::test]
async fn test_full_portfolio_walk() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_profile(&server).await;

    mount_root_page(
        &server,
        1,
        listing(3, json!([{"hash_id": "aaa"}, {"hash_id": "bbb"}])),
    )
    .await;
    mount_root_page(&server, 2, listing(3, json!([{"hash_id": "ccc"}]))).await;
    let aaa = detail("aaa", &["https://cdn.test/a1.jpg?1", "https://cdn.test/a2.png?1"]);
    mount_detail(&server, "aaa", aaa).await;
    mount_detail(&server, "bbb", detail("bbb", &[])).await;
    mount_detail(&server, "ccc", detail("ccc", &["https://cdn.test/c1.jpg?1"])).await;

    mount_album_index_page(
        &server,
        1,
        listing(2, json!([{"id": 5, "title": "Sketches"}, {"id": 6, "title": "Empty"}])),
    )
    .await;
    mount_album_page(&server, 5, 1, listing(1, json!([{"hash_id": "ccc"}]))).await;
    mount_album_page(&server, 6, 1, listing(0, json!([]))).await;

    let tasks = walk(&server).await.expect("walk succeeds");

    assert_eq!(
        outline(&tasks),
        summary(&[
            ("https://cdn.test/a1.jpg?1", None),
            ("https://cdn.test/a2.png?1", None),
            ("https://cdn.test/c1.jpg?1", None),
            ("https://cdn.test/c1.jpg?1", Some("Sketches")),
        ])
    );
}

#[tokio::test]
async fn test_stale_total_stops_listing_and_walk_continues() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_profile(&server).await;
    mount_root_page(&server, 1, listing(5, json!([{"hash_id": "aaa"}]))).await;
    mount_root_page(&server, 2, listing(5, json!([]))).await;
    mount_detail(&server, "aaa", detail("aaa", &["https://cdn.test/a1.jpg?1"])).await;
    mount_album_index_page(&server, 1, listing(0, json!([]))).await;

    let tasks = walk(&server).await.expect("walk succeeds");

    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_album_index_is_paged() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_profile(&server).await;
    mount_root_page(&server, 1, listing(0, json!([]))).await;

    let first: Vec<_> = (1..=25).map(|id| json!({"id": id, "title": format!("A{id}")})).collect();
    mount_album_index_page(&server, 1, listing(26, json!(first))).await;
    mount_album_index_page(&server, 2, listing(26, json!([{"id": 26, "title": "Last"}]))).await;
    for id in 1..=25 {
        mount_album_page(&server, id, 1, listing(0, json!([]))).await;
    }
    mount_album_page(&server, 26, 1, listing(1, json!([{"hash_id": "zzz"}]))).await;
    mount_detail(&server, "zzz", detail("zzz", &["https://cdn.test/z.jpg?1"])).await;

    let tasks = walk(&server).await.expect("walk succeeds");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].album_name(), Some("Last"));
}

#[tokio::test]
async fn test_listing_server_error_fails_stream() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_profile(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{USERNAME}/projects.json")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = walk(&server).await.unwrap_err();

    assert!(
        matches!(
            err,
            DiscoveryError::Transport(TransportError::HttpStatus { status: 500, .. })
        ),
        "{err}"
    );
}

#[tokio::test]
async fn test_listing_without_total_count_fails_stream() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_profile(&server).await;
    mount_root_page(&server, 1, json!({"data": [{"hash_id": "aaa"}]})).await;

    let err = walk(&server).await.unwrap_err();

    assert!(matches!(err, DiscoveryError::MissingTotalCount { .. }), "{err}");
}

#[tokio::test]
async fn test_profile_without_identity_fails_before_listing() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(format!("/{USERNAME}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>private</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{USERNAME}/projects.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(0, json!([]))))
        .expect(0)
        .mount(&server)
        .await;

    let err = walk(&server).await.unwrap_err();

    assert!(matches!(err, DiscoveryError::IdentityNotFound { .. }), "{err}");
}
