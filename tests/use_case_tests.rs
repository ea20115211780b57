use async_trait::async_trait;
use chrono::{Duration, Utc};
use folio::{
    entities::{
        option_fields::OptionField,
        post::{Post, PostInsert, UpdatePostRequest},
        project::{Project, ProjectInsert},
    },
    errors::AppError,
    repositories::{post::PostRepository, project::ProjectRepository},
    use_cases::{blog::PostHandler, home::HomeHandler},
    utils::markdown::MarkdownRenderer,
};
use mockall::{mock, predicate::*};
use uuid::Uuid;

mock! {
    pub PostRepo {}

    #[async_trait]
    impl PostRepository for PostRepo {
        async fn create_post(&self, post: &PostInsert) -> Result<Post, AppError>;
        async fn get_post_by_id(&self, id: &Uuid) -> Result<Post, AppError>;
        async fn get_published_post_by_slug(&self, slug: &str) -> Result<Post, AppError>;
        async fn update_post(&self, post: &Post) -> Result<Post, AppError>;
        async fn delete_post(&self, id: &Uuid) -> Result<(), AppError>;
        async fn list_published_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError>;
        async fn list_all_posts(&self) -> Result<Vec<Post>, AppError>;
        async fn count_posts(&self, published_only: bool) -> Result<i64, AppError>;
        async fn check_connection(&self) -> Result<(), AppError>;
    }
}

mock! {
    pub ProjectRepo {}

    #[async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
        async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
        async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
        async fn update_project(&self, project: &Project) -> Result<Project, AppError>;
        async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
        async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
        async fn list_featured_projects(&self, limit: Option<u32>) -> Result<Vec<Project>, AppError>;
        async fn count_projects(&self) -> Result<i64, AppError>;
    }
}

fn stored_post() -> Post {
    let created = Utc::now() - Duration::days(1);
    Post {
        id: Uuid::new_v4(),
        title: "Stored".to_string(),
        slug: "stored".to_string(),
        content: "## Hello".to_string(),
        excerpt: "excerpt".to_string(),
        image_url: None,
        created_at: created,
        updated_at: created,
        tags: "Rust".to_string(),
        published: true,
    }
}

fn handler(repo: MockPostRepo) -> PostHandler<MockPostRepo> {
    PostHandler::new(repo, MarkdownRenderer::default(), 5)
}

#[actix_rt::test]
async fn listing_requests_the_offset_of_the_clamped_page() {
    let mut repo = MockPostRepo::new();
    repo.expect_count_posts()
        .with(eq(true))
        .times(2)
        .returning(|_| Ok(12));
    repo.expect_list_published_posts()
        .with(eq(5i64), eq(10i64))
        .times(2)
        .returning(|_, _| Ok(vec![stored_post(), stored_post()]));

    let handler = handler(repo);

    let page = handler.list_published_posts(Some("3")).await.unwrap();
    assert_eq!(page.number, 3);
    assert_eq!(page.items.len(), 2);
    assert!(!page.has_next);

    let clamped = handler.list_published_posts(Some("99")).await.unwrap();
    assert_eq!(clamped.number, 3);
}

#[actix_rt::test]
async fn missing_page_parameter_reads_from_the_start() {
    let mut repo = MockPostRepo::new();
    repo.expect_count_posts().returning(|_| Ok(0));
    repo.expect_list_published_posts()
        .with(eq(5i64), eq(0i64))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let page = handler(repo).list_published_posts(None).await.unwrap();

    assert_eq!(page.number, 1);
    assert_eq!(page.num_pages, 1);
    assert!(page.items.is_empty());
}

#[actix_rt::test]
async fn detail_miss_maps_to_post_not_found() {
    let mut repo = MockPostRepo::new();
    repo.expect_get_published_post_by_slug()
        .withf(|slug| slug == "draft")
        .returning(|_| Err(AppError::NotFound("Record not found".into())));

    let err = handler(repo).get_published_post("draft").await.unwrap_err();

    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Post not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[actix_rt::test]
async fn detail_renders_content_and_splits_tags() {
    let mut repo = MockPostRepo::new();
    repo.expect_get_published_post_by_slug()
        .returning(|_| Ok(stored_post()));

    let detail = handler(repo).get_published_post("stored").await.unwrap();

    assert_eq!(detail.content_html.trim(), r#"<h2 id="hello">Hello</h2>"#);
    assert_eq!(detail.tags, vec!["Rust"]);
}

#[actix_rt::test]
async fn update_saves_with_fresh_timestamp_and_same_slug() {
    let original = stored_post();
    let id = original.id;
    let before = original.updated_at;

    let mut repo = MockPostRepo::new();
    repo.expect_get_post_by_id()
        .with(eq(id))
        .return_once(move |_| Ok(original));
    repo.expect_update_post()
        .withf(move |post| post.slug == "stored" && post.title == "Renamed" && post.updated_at > before)
        .times(1)
        .returning(|post| Ok(post.clone()));

    let changes = UpdatePostRequest {
        title: OptionField::SetToValue("Renamed".to_string()),
        ..Default::default()
    };

    let updated = handler(repo).update_post(&id.to_string(), changes).await.unwrap();
    assert_eq!(updated.slug, "stored");
}

#[actix_rt::test]
async fn home_summary_asks_for_the_configured_featured_limit() {
    let mut projects = MockProjectRepo::new();
    projects
        .expect_list_featured_projects()
        .with(eq(Some(3u32)))
        .times(1)
        .returning(|_| Ok(vec![]));
    projects.expect_count_projects().returning(|| Ok(7));

    let mut posts = MockPostRepo::new();
    posts.expect_count_posts().with(eq(true)).returning(|_| Ok(4));

    let summary = HomeHandler::new(projects, posts, 3).summary().await.unwrap();

    assert_eq!(summary.projects_count, 7);
    assert_eq!(summary.posts_count, 4);
    assert!(summary.featured_projects.is_empty());
}
