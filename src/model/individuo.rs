use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "nombre": "Alice",
        "apellido": "Smith",
        "dni": "12345678",
        "fecha_nacimiento": "2000-01-15",
        "genero": "Femenino"
    })
)]
pub struct Individuo {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Alice")]
    pub nombre: String,

    #[schema(example = "Smith")]
    pub apellido: String,

    #[schema(example = "12345678")]
    pub dni: String,

    #[schema(example = "2000-01-15", value_type = Option<String>, format = "date", nullable = true)]
    pub fecha_nacimiento: Option<NaiveDate>,

    #[schema(example = "Femenino", nullable = true)]
    pub genero: Option<String>,
}
