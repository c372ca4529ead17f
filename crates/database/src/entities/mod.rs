pub mod available_course;
pub mod catalog_courses_member;
pub mod course_overview;
pub mod dynamic_catalog;
pub mod fixed_catalog_course_run;
pub mod flexible_catalog;
