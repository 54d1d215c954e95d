//! OpenAPI document and Swagger UI mount.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::storage::{InventoryStats, LocationStats, ManufacturerStats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "showroom-api",
        description = "Vehicle dealership back office: inventory, quotations, invoices, banks, financing rates, catalogs and users"
    ),
    components(schemas(
        ErrorResponse,
        InventoryStats,
        ManufacturerStats,
        LocationStats
    ))
)]
pub struct ApiDoc;

/// Swagger UI serving the generated document at `/docs`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
