//! OpenAPI documentation.
//! Only the `/records` paths are documented; `/todos` serves the same handlers.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tasklet_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tasklet API",
        version = "0.1.0",
        description = "Minimal record store: list, upsert and delete records keyed by id, backed by an object store bucket or a DynamoDB table."
    ),
    paths(
        handlers::records::list_records,
        handlers::records::create_record,
        handlers::records::delete_record,
    ),
    components(schemas(
        models::Record,
        error::ErrorResponse,
        handlers::records::DeleteMessage,
    )),
    tags(
        (name = "records", description = "Record collection")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_record_paths() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/records"));
        assert!(spec.paths.paths.contains_key("/records/{id}"));
    }
}
