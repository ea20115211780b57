pub mod option_fields;
pub mod pagination;
pub mod post;
pub mod project;
pub mod token;
pub mod validation;
