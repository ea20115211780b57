use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    entities::{
        option_fields::OptionField,
        validation::{
            new_validation_error, validate_required_field,
            validate_slug, validate_slug_field, validate_slug_input, validate_title,
            validate_title_field, validate_url, validate_url_field, MAX_SLUG_LENGTH,
            MAX_TITLE_LENGTH,
        },
    },
    utils::{delimited::split_delimited, slug::assign_slug},
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_EXCERPT_LENGTH: u64 = 300;
const MAX_TAGS_LENGTH: u64 = 200;

// ───── Database Model ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: String,
    pub published: bool,
}

impl Post {
    pub fn tag_list(&self) -> Vec<String> {
        split_delimited(&self.tags)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A validated post ready for its first save. The slug is already assigned.
#[derive(Debug, Validate)]
pub struct PostInsert {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(
        length(min = 1, max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug")
    )]
    pub slug: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(length(min = 1, max = MAX_EXCERPT_LENGTH))]
    pub excerpt: String,

    #[validate(custom(function = "validate_url"))]
    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[validate(length(max = MAX_TAGS_LENGTH))]
    pub tags: String,

    pub published: bool,
}

// ───── Page Models ───────────────────────────────────────────────────

/// Everything the detail page needs: the post, its rendered body and tags.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub content_html: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkdownPreviewRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkdownPreviewResponse {
    pub html: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewPostRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(
        length(max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug_input")
    )]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(length(min = 1, max = MAX_EXCERPT_LENGTH))]
    pub excerpt: String,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub image_url: Option<String>,

    #[serde(default)]
    #[validate(length(max = MAX_TAGS_LENGTH))]
    pub tags: String,

    #[serde(default = "default_published")]
    pub published: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdatePostRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title_field")
    )]
    pub title: OptionField<String>,

    #[validate(
        length(max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug_field")
    )]
    pub slug: OptionField<String>,

    #[validate(
        length(min = 1, message = "Content cannot be empty"),
        custom(function = "validate_required_field")
    )]
    pub content: OptionField<String>,

    #[validate(
        length(min = 1, max = MAX_EXCERPT_LENGTH),
        custom(function = "validate_required_field")
    )]
    pub excerpt: OptionField<String>,

    #[validate(custom(function = "validate_url_field"))]
    pub image_url: OptionField<String>,

    #[validate(length(max = MAX_TAGS_LENGTH))]
    pub tags: OptionField<String>,

    #[validate(custom(function = "validate_required_field"))]
    pub published: OptionField<bool>,

    #[validate(custom(function = "validate_required_field"))]
    pub created_at: OptionField<DateTime<Utc>>,
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewPostRequest> for PostInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewPostRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let slug = assign_slug(&value.title, value.slug.as_deref());
        if slug.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("slug", new_validation_error("slug_empty", "Could not derive a slug from the title; please provide one"));
            return Err(errors);
        }

        let now = Utc::now();
        let insert = PostInsert {
            title: value.title,
            slug,
            content: value.content,
            excerpt: value.excerpt,
            image_url: value.image_url,
            created_at: value.created_at.unwrap_or(now),
            updated_at: now,
            tags: value.tags,
            published: value.published,
        };

        insert.validate()?;
        Ok(insert)
    }
}

impl UpdatePostRequest {
    /// Applies the requested edits. The slug only changes on an explicit,
    /// non-blank value; a title edit never regenerates it.
    pub fn apply_to(self, post: &mut Post) {
        self.title.apply_required(&mut post.title);
        if let OptionField::SetToValue(slug) = self.slug {
            if !slug.trim().is_empty() {
                post.slug = slug;
            }
        }
        self.content.apply_required(&mut post.content);
        self.excerpt.apply_required(&mut post.excerpt);
        self.image_url.apply_nullable(&mut post.image_url);
        match self.tags {
            OptionField::SetToValue(tags) => post.tags = tags,
            OptionField::SetToNull => post.tags.clear(),
            OptionField::Unchanged => {}
        }
        self.published.apply_required(&mut post.published);
        self.created_at.apply_required(&mut post.created_at);
    }
}
