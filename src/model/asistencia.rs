use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Asistencia {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub usuario_id: i64,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub fecha: NaiveDate,

    #[schema(example = "Presente")]
    pub estado: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Estado {
    Presente,
    Ausente,
    Tarde,
    Justificado,
}

impl Estado {
    /// Accepts the single-letter codes or the full names, any casing.
    /// Anything unrecognized is recorded as Ausente rather than rejected.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_uppercase().as_str() {
            "P" | "PRESENTE" => Estado::Presente,
            "A" | "AUSENTE" => Estado::Ausente,
            "T" | "TARDE" => Estado::Tarde,
            "J" | "JUSTIFICADO" => Estado::Justificado,
            _ => Estado::Ausente,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Presente => "Presente",
            Estado::Ausente => "Ausente",
            Estado::Tarde => "Tarde",
            Estado::Justificado => "Justificado",
        }
    }
}
