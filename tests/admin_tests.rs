
use chrono::{DateTime, Utc};
use folio::entities::post::Post;
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn admin_endpoints_require_a_token() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/admin/posts")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .client
        .get(app.url("/admin/posts"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn wrong_password_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.login(ADMIN_USERNAME, "guess").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.login("someone", ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn health_reports_store_status() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let health: Value = app
        .client
        .get(app.url("/admin/health"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(health["database"], "OK");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_rt::test]
async fn created_post_gets_slug_from_title() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .post(app.url("/admin/posts"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Race Condition",
            "content": "## What is it?\n\nTrouble.",
            "excerpt": "Two threads walk into a bar"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let post: Post = response.json().await.unwrap();
    assert_eq!(post.slug, "race-condition");
    assert!(post.published);

    let page = app.client.get(app.url("/blog/race-condition")).send().await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert!(page.text().await.unwrap().contains(r#"<h2 id="what-is-it">What is it?</h2>"#));
}

#[actix_rt::test]
async fn invalid_post_returns_field_errors() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .post(app.url("/admin/posts"))
        .bearer_auth(&token)
        .json(&json!({ "title": "!!!", "content": "x", "excerpt": "y" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "slug");
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .post(app.url("/admin/posts"))
        .bearer_auth(&token)
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn duplicate_project_title_conflicts() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let project = json!({
        "title": "Test",
        "description": "first",
        "github_url": "https://github.com/example/test"
    });

    let first = app
        .client
        .post(app.url("/admin/projects"))
        .bearer_auth(&token)
        .json(&project)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .client
        .post(app.url("/admin/projects"))
        .bearer_auth(&token)
        .json(&project)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(app.state.project_handler.list_all_projects().await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn title_edit_keeps_slug_and_bumps_updated_at() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let post = app.seed_post("Original Title", 60, true).await;

    let response = app
        .client
        .patch(app.url(&format!("/admin/posts/{}", post.id)))
        .bearer_auth(&token)
        .json(&json!({ "title": "Completely Different", "image_url": null }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Post = response.json().await.unwrap();
    assert_eq!(updated.title, "Completely Different");
    assert_eq!(updated.slug, "original-title");
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at > post.updated_at);
}

#[actix_rt::test]
async fn null_on_required_field_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let post = app.seed_post("Keep Me", 0, true).await;

    let response = app
        .client
        .patch(app.url(&format!("/admin/posts/{}", post.id)))
        .bearer_auth(&token)
        .json(&json!({ "title": null }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn delete_removes_post_and_bad_ids_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let post = app.seed_post("Short Lived", 0, true).await;

    let url = app.url(&format!("/admin/posts/{}", post.id));
    let deleted = app.client.delete(&url).bearer_auth(&token).send().await.unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = app.client.delete(&url).bearer_auth(&token).send().await.unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let bad = app
        .client
        .get(app.url("/admin/posts/not-a-uuid"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn admin_listing_includes_drafts_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.seed_post("Older", 30, true).await;
    app.seed_post("Draft", 0, false).await;

    let posts: Vec<Post> = app
        .client
        .get(app.url("/admin/posts"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["draft", "older"]);
    let newest: DateTime<Utc> = posts[0].created_at;
    assert!(newest > posts[1].created_at);
}

#[actix_rt::test]
async fn markdown_preview_uses_the_site_renderer() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let preview: Value = app
        .client
        .post(app.url("/admin/markdown/preview"))
        .bearer_auth(&token)
        .json(&json!({ "content": "### Step 1.\nline one\nline two" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let html = preview["html"].as_str().unwrap();
    assert!(html.contains(r#"<h3 id="step-1">Step 1.</h3>"#));
    assert!(html.contains("line one<br />"));
}
