//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalog: CRUD, sorted listing and search by name",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::handlers::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_paths_are_nested() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/products"));
        assert!(doc.paths.paths.contains_key("/api/products/{id}"));
        assert!(doc.paths.paths.contains_key("/api/products/search"));
    }
}
