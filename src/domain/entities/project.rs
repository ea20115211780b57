use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    entities::{
        option_fields::OptionField,
        validation::{
            new_validation_error, validate_required_field, validate_required_url_field,
            validate_slug, validate_slug_field, validate_slug_input, validate_title,
            validate_title_field, validate_url, validate_url_field, MAX_SLUG_LENGTH,
            MAX_TITLE_LENGTH,
        },
    },
    utils::{delimited::split_delimited, slug::assign_slug},
};

const MAX_TECHNOLOGIES_LENGTH: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub github_url: String,
    pub demo_url: Option<String>,
    /// Comma separated, e.g. "Python, Django, React".
    pub technologies: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub featured: bool,
}

impl Project {
    pub fn technology_list(&self) -> Vec<String> {
        split_delimited(&self.technologies)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Debug, Validate)]
pub struct ProjectInsert {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(
        length(min = 1, max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug")
    )]
    pub slug: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(custom(function = "validate_url"))]
    pub github_url: String,

    #[validate(custom(function = "validate_url"))]
    pub demo_url: Option<String>,

    #[validate(length(max = MAX_TECHNOLOGIES_LENGTH))]
    pub technologies: String,

    #[validate(custom(function = "validate_url"))]
    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub featured: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub technologies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectListing {
    pub projects: Vec<Project>,
    pub featured: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct HomeSummary {
    pub featured_projects: Vec<Project>,
    pub projects_count: i64,
    pub posts_count: i64,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewProjectRequest {
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

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    #[validate(custom(function = "validate_url"))]
    pub github_url: String,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub demo_url: Option<String>,

    #[serde(default)]
    #[validate(length(max = MAX_TECHNOLOGIES_LENGTH))]
    pub technologies: String,

    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateProjectRequest {
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
        length(min = 1, message = "Description cannot be empty"),
        custom(function = "validate_required_field")
    )]
    pub description: OptionField<String>,

    #[validate(custom(function = "validate_required_url_field"))]
    pub github_url: OptionField<String>,

    #[validate(custom(function = "validate_url_field"))]
    pub demo_url: OptionField<String>,

    #[validate(length(max = MAX_TECHNOLOGIES_LENGTH))]
    pub technologies: OptionField<String>,

    #[validate(custom(function = "validate_url_field"))]
    pub image_url: OptionField<String>,

    #[validate(custom(function = "validate_required_field"))]
    pub created_at: OptionField<DateTime<Utc>>,

    #[validate(custom(function = "validate_required_field"))]
    pub featured: OptionField<bool>,
}

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let slug = assign_slug(&value.title, value.slug.as_deref());
        if slug.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("slug", new_validation_error("slug_empty", "Could not derive a slug from the title; please provide one"));
            return Err(errors);
        }

        let insert = ProjectInsert {
            title: value.title,
            slug,
            description: value.description,
            github_url: value.github_url,
            demo_url: value.demo_url,
            technologies: value.technologies,
            image_url: value.image_url,
            created_at: value.created_at.unwrap_or_else(Utc::now),
            featured: value.featured,
        };

        insert.validate()?;
        Ok(insert)
    }
}

impl UpdateProjectRequest {
    /// Applies the requested edits; the slug follows the same write-once rule as posts.
    pub fn apply_to(self, project: &mut Project) {
        self.title.apply_required(&mut project.title);
        if let OptionField::SetToValue(slug) = self.slug {
            if !slug.trim().is_empty() {
                project.slug = slug;
            }
        }
        self.description.apply_required(&mut project.description);
        self.github_url.apply_required(&mut project.github_url);
        self.demo_url.apply_nullable(&mut project.demo_url);
        match self.technologies {
            OptionField::SetToValue(technologies) => project.technologies = technologies,
            OptionField::SetToNull => project.technologies.clear(),
            OptionField::Unchanged => {}
        }
        self.image_url.apply_nullable(&mut project.image_url);
        self.created_at.apply_required(&mut project.created_at);
        self.featured.apply_required(&mut project.featured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> NewProjectRequest {
        NewProjectRequest {
            title: title.to_string(),
            slug: None,
            description: "A thing I built".to_string(),
            github_url: "https://github.com/me/thing".to_string(),
            demo_url: None,
            technologies: "Rust, Actix".to_string(),
            image_url: None,
            created_at: None,
            featured: false,
        }
    }

    #[test]
    fn insert_derives_slug_and_defaults() {
        let insert = ProjectInsert::try_from(request("My Portfolio Site")).unwrap();
        assert_eq!(insert.slug, "my-portfolio-site");
        assert!(!insert.featured);
    }

    #[test]
    fn insert_requires_valid_github_url() {
        let mut req = request("Thing");
        req.github_url = "github.com/me/thing".to_string();
        let errors = ProjectInsert::try_from(req).unwrap_err();
        assert!(errors.field_errors().contains_key("github_url"));
    }

    #[test]
    fn update_rejects_null_github_url() {
        let changes = UpdateProjectRequest {
            github_url: OptionField::SetToNull,
            ..Default::default()
        };
        assert!(changes.validate().is_err());
    }

    #[test]
    fn update_keeps_slug_on_title_change() {
        let mut project = Project {
            id: Uuid::new_v4(),
            title: "Old".to_string(),
            slug: "old".to_string(),
            description: "d".to_string(),
            github_url: "https://github.com/me/old".to_string(),
            demo_url: Some("https://demo.example.com".to_string()),
            technologies: "Rust".to_string(),
            image_url: None,
            created_at: Utc::now(),
            featured: false,
        };
        let changes = UpdateProjectRequest {
            title: OptionField::SetToValue("New".to_string()),
            demo_url: OptionField::SetToNull,
            featured: OptionField::SetToValue(true),
            ..Default::default()
        };
        changes.apply_to(&mut project);
        assert_eq!(project.title, "New");
        assert_eq!(project.slug, "old");
        assert!(project.demo_url.is_none());
        assert!(project.featured);
    }

    #[test]
    fn technology_list_preserves_order() {
        let project = ProjectInsert::try_from(request("x project")).unwrap();
        assert_eq!(split_delimited(&project.technologies), vec!["Rust", "Actix"]);
    }
}
