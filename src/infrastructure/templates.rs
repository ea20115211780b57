//! Page templates, embedded in the binary and rendered with Tera.

use std::collections::HashMap;

use tera::{Context, Tera};

use crate::errors::AppError;

pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Loads every page template. Autoescaping stays on; rendered Markdown is
    /// marked `safe` where it is inserted.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("blog/list.html", include_str!("../../templates/blog/list.html")),
            ("blog/detail.html", include_str!("../../templates/blog/detail.html")),
            ("projects/list.html", include_str!("../../templates/projects/list.html")),
            ("projects/detail.html", include_str!("../../templates/projects/detail.html")),
        ])?;

        tera.register_filter("tag_chips", tag_chips_filter);

        Ok(Self { tera })
    }

    pub fn render(&self, template_name: &str, context: &Context) -> Result<String, AppError> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: comma separated tags or technologies as a list
fn tag_chips_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("tag_chips", "value", String, value);
    let items = crate::utils::delimited::split_delimited(&s)
        .into_iter()
        .filter(|item| !item.is_empty())
        .map(tera::Value::String)
        .collect();
    Ok(tera::Value::Array(items))
}
