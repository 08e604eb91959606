use serde::Serialize;
use utoipa::ToSchema;

/// Projection used when taking attendance: just enough to show a roster.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ActiveUsuario {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Juan Pérez")]
    pub nombre_completo: String,
}
