use crate::routes::{
    available_course, catalog_courses, dynamic_catalog, fixed_catalog, flexible_catalog, health,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        flexible_catalog::list_catalogs,
        flexible_catalog::get_catalog,
        flexible_catalog::update_catalog,
        flexible_catalog::delete_catalog,
        flexible_catalog::get_members,
        fixed_catalog::list_fixed_catalogs,
        fixed_catalog::create_fixed_catalog,
        fixed_catalog::get_fixed_catalog,
        fixed_catalog::add_course_runs,
        fixed_catalog::remove_course_runs,
        catalog_courses::list_catalog_courses,
        catalog_courses::create_catalog_courses,
        catalog_courses::get_catalog_courses,
        catalog_courses::add_courses,
        catalog_courses::remove_courses,
        dynamic_catalog::list_dynamic_catalogs,
        dynamic_catalog::create_dynamic_catalog,
        dynamic_catalog::get_dynamic_catalog,
        dynamic_catalog::set_query,
        available_course::list_available_courses,
        available_course::create_available_course,
        available_course::get_available_course,
        available_course::update_available_course,
        available_course::delete_available_course,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Catalogs", description = "Catalogs of every variant, addressed by id or slug"),
        (name = "Fixed catalogs", description = "Catalogs of explicitly chosen course runs"),
        (name = "Catalog courses", description = "Catalogs of available course registry entries"),
        (name = "Dynamic catalogs", description = "Catalogs computed from a stored course filter"),
        (name = "Available courses", description = "Registry of course runs offered for cataloguing"),
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Flexible course catalogs",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
