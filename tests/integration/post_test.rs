//! Integration tests for the posts resource and versioned updates.

mod helpers;

use axum::http::StatusCode;
use axum::http::header::LOCATION;
use serde_json::json;

async fn create_post(app: &helpers::TestApp, token: &str, title: &str, tags: &[&str]) -> i64 {
    let response = app
        .request(
            "POST",
            "/v1/posts",
            Some(json!({ "title": title, "body": "Lorem ipsum", "tags": tags })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"]["id"].as_i64().expect("post id")
}

#[tokio::test]
async fn test_create_post_starts_at_version_one() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;

    let response = app
        .request(
            "POST",
            "/v1/posts",
            Some(json!({ "title": "First", "body": "Hello", "tags": ["intro"] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let post = &response.body["data"];
    assert_eq!(post["version"], 1);
    assert_eq!(post["title"], "First");
    assert_eq!(
        response.headers[LOCATION],
        format!("/v1/posts/{}", post["id"].as_i64().unwrap())
    );
}

#[tokio::test]
async fn test_duplicate_tags_are_rejected() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;

    let response = app
        .request(
            "POST",
            "/v1/posts",
            Some(json!({ "title": "Tags", "body": "Twice", "tags": ["a", "a"] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["tags"].is_string());
}

#[tokio::test]
async fn test_show_post_and_bad_ids() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;
    let id = create_post(&app, &token, "Visible", &[]).await;

    let found = app
        .request("GET", &format!("/v1/posts/{id}"), None, Some(&token))
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["title"], "Visible");

    for path in ["/v1/posts/999", "/v1/posts/abc", "/v1/posts/0", "/v1/posts/-3"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "path {path}");
    }
}

#[tokio::test]
async fn test_update_increments_version() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;
    let id = create_post(&app, &token, "Draft", &[]).await;

    let response = app
        .request(
            "PATCH",
            &format!("/v1/posts/{id}"),
            Some(json!({ "title": "Final" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Final");
    assert_eq!(response.body["data"]["body"], "Lorem ipsum");
    assert_eq!(response.body["data"]["version"], 2);
}

#[tokio::test]
async fn test_expected_version_precondition() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;
    let id = create_post(&app, &token, "Draft", &[]).await;
    let path = format!("/v1/posts/{id}");

    let matching = app
        .send(
            "PATCH",
            &path,
            Some(json!({ "body": "second" })),
            Some(&token),
            &[("X-Expected-Version", "1")],
            None,
        )
        .await;
    assert_eq!(matching.status, StatusCode::OK);
    assert_eq!(matching.body["data"]["version"], 2);

    let stale = app
        .send(
            "PATCH",
            &path,
            Some(json!({ "body": "third" })),
            Some(&token),
            &[("X-Expected-Version", "1")],
            None,
        )
        .await;
    assert_eq!(stale.status, StatusCode::CONFLICT);
    assert_eq!(stale.error_code(), "EDIT_CONFLICT");

    let current = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(current.body["data"]["body"], "second");
    assert_eq!(current.body["data"]["version"], 2);
}

#[tokio::test]
async fn test_non_integer_expected_version_is_bad_request() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;
    let id = create_post(&app, &token, "Draft", &[]).await;

    let response = app
        .send(
            "PATCH",
            &format!("/v1/posts/{id}"),
            Some(json!({ "body": "x" })),
            Some(&token),
            &[("X-Expected-Version", "one")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_updates_from_same_version() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;
    let id = create_post(&app, &token, "Race", &[]).await;
    let path = format!("/v1/posts/{id}");

    let (a, b) = tokio::join!(
        app.send(
            "PATCH",
            &path,
            Some(json!({ "title": "A" })),
            Some(&token),
            &[("X-Expected-Version", "1")],
            None,
        ),
        app.send(
            "PATCH",
            &path,
            Some(json!({ "title": "B" })),
            Some(&token),
            &[("X-Expected-Version", "1")],
            None,
        ),
    );

    let mut statuses = [a.status, b.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    let current = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(current.body["data"]["version"], 2);
}

#[tokio::test]
async fn test_delete_post() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;
    let id = create_post(&app, &token, "Doomed", &[]).await;
    let path = format!("/v1/posts/{id}");

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let update = app
        .request("PATCH", &path, Some(json!({ "title": "Zombie" })), Some(&token))
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_sorts_and_pages() {
    let app = helpers::TestApp::new();
    let token = app.writer("writer@example.com").await;
    create_post(&app, &token, "Rust async", &["rust", "async"]).await;
    create_post(&app, &token, "Rust traits", &["rust"]).await;
    create_post(&app, &token, "Go channels", &["go"]).await;

    let rust = app
        .request("GET", "/v1/posts?tags=rust&sort=-title", None, Some(&token))
        .await;
    assert_eq!(rust.status, StatusCode::OK);
    let titles: Vec<&str> = rust.body["data"]["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Rust traits", "Rust async"]);

    let paged = app
        .request("GET", "/v1/posts?page=2&page_size=2&sort=id", None, Some(&token))
        .await;
    assert_eq!(paged.status, StatusCode::OK);
    assert_eq!(paged.body["data"]["posts"].as_array().unwrap().len(), 1);
    assert_eq!(paged.body["data"]["posts"][0]["title"], "Go channels");
    assert_eq!(paged.body["data"]["metadata"]["total_records"], 3);

    let by_title = app
        .request("GET", "/v1/posts?title=TRAITS", None, Some(&token))
        .await;
    assert_eq!(by_title.body["data"]["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_rejects_bad_query_values() {
    let app = helpers::TestApp::new();
    let token = app.reader("reader@example.com").await;

    let bad_sort = app
        .request("GET", "/v1/posts?sort=body", None, Some(&token))
        .await;
    assert_eq!(bad_sort.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(bad_sort.body["details"]["sort"].is_string());

    let big_page = app
        .request("GET", "/v1/posts?page_size=101", None, Some(&token))
        .await;
    assert_eq!(big_page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(big_page.body["details"]["page_size"].is_string());
}

#[tokio::test]
async fn test_reader_can_list_but_not_delete() {
    let app = helpers::TestApp::new();
    let writer = app.writer("writer@example.com").await;
    let reader = app.reader("reader@example.com").await;
    let id = create_post(&app, &writer, "Shared", &[]).await;

    let listed = app.request("GET", "/v1/posts", None, Some(&reader)).await;
    assert_eq!(listed.status, StatusCode::OK);

    let deleted = app
        .request("DELETE", &format!("/v1/posts/{id}"), None, Some(&reader))
        .await;
    assert_eq!(deleted.status, StatusCode::FORBIDDEN);
    assert_eq!(deleted.error_code(), "NOT_PERMITTED");
}
