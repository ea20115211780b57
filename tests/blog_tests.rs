
use reqwest::StatusCode;
use test_utils::*;

async fn seeded_blog() -> TestApp {
    let app = TestApp::spawn().await;
    // Post 0 is the newest
    for i in 0..12 {
        app.seed_post(&format!("Published post {i:02}"), i * 10, true).await;
    }
    for i in 0..3 {
        app.seed_post(&format!("Draft {i}"), 1 + i * 10, false).await;
    }
    app
}

async fn page_body(app: &TestApp, query: &str) -> String {
    let response = app
        .client
        .get(app.url(&format!("/blog{query}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.text().await.unwrap()
}

fn shown_posts(body: &str) -> Vec<String> {
    body.match_indices("/blog/published-post-")
        .map(|(idx, _)| body[idx + 6..idx + 6 + "published-post-00".len()].to_string())
        .collect()
}

#[actix_rt::test]
async fn first_page_lists_five_newest_published_posts() {
    let app = seeded_blog().await;

    let body = page_body(&app, "").await;

    assert_eq!(
        shown_posts(&body),
        vec![
            "published-post-00",
            "published-post-01",
            "published-post-02",
            "published-post-03",
            "published-post-04",
        ]
    );
    assert!(!body.contains("draft-"));
    assert!(body.contains("Page 1 of 3"));
}

#[actix_rt::test]
async fn last_page_holds_the_remainder() {
    let app = seeded_blog().await;

    let body = page_body(&app, "?page=3").await;

    assert_eq!(shown_posts(&body), vec!["published-post-10", "published-post-11"]);
    assert!(body.contains("Page 3 of 3"));
}

#[actix_rt::test]
async fn out_of_range_pages_are_clamped() {
    let app = seeded_blog().await;

    assert!(page_body(&app, "?page=4").await.contains("Page 3 of 3"));
    assert!(page_body(&app, "?page=0").await.contains("Page 1 of 3"));
    assert!(page_body(&app, "?page=abc").await.contains("Page 1 of 3"));
    assert!(page_body(&app, "?page=last").await.contains("Page 3 of 3"));
}

#[actix_rt::test]
async fn empty_blog_has_one_empty_page() {
    let app = TestApp::spawn().await;

    let body = page_body(&app, "?page=7").await;

    assert!(body.contains("Page 1 of 1"));
    assert!(body.contains("No posts yet."));
}

#[actix_rt::test]
async fn detail_renders_markdown_with_anchors_and_tags() {
    let app = TestApp::spawn().await;
    let post = app.seed_post("Race Condition", 0, true).await;

    let response = app
        .client
        .get(app.url(&format!("/blog/{}", post.slug)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains(r#"<h2 id="about-race-condition">About Race Condition</h2>"#));
    assert!(body.contains(r#"<span class="tag">Rust</span>"#));
    assert!(body.contains(r#"<span class="tag">Web</span>"#));
}

#[actix_rt::test]
async fn unpublished_post_is_indistinguishable_from_missing() {
    let app = TestApp::spawn().await;
    let draft = app.seed_post("Secret Draft", 0, false).await;

    let hidden = app
        .client
        .get(app.url(&format!("/blog/{}", draft.slug)))
        .send()
        .await
        .unwrap();
    let missing = app
        .client
        .get(app.url("/blog/no-such-post"))
        .send()
        .await
        .unwrap();

    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(hidden.text().await.unwrap(), missing.text().await.unwrap());
}
