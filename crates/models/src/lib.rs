pub mod course_key;
pub mod member_ref;
pub mod ordering;
pub mod query;
pub mod slug;
