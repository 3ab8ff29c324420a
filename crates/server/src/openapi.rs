use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(ToSchema)]
pub struct FavoriteInputDoc {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Number or numeric string; coerced to an integer.
    pub rating: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct FavoriteDoc {
    pub id: String,
    pub title: String,
    pub creator: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub rating: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub createdAt: String,
    pub updatedAt: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::favs::list,
        crate::routes::favs::create,
        crate::routes::favs::update,
        crate::routes::favs::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            FavoriteInputDoc,
            FavoriteDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "favs")
    )
)]
pub struct ApiDoc;
