pub mod available_course;
pub mod catalog;
pub mod membership;
