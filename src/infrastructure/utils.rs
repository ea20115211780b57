pub mod delimited;
pub mod markdown;
pub mod slug;
pub mod valid_uuid;
