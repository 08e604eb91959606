use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::asistencia::{Asistencia, Estado};
use crate::model::usuario::ActiveUsuario;
use crate::store::{asistencia, usuarios};

#[derive(Deserialize, ToSchema)]
pub struct MarkAsistencia {
    #[schema(example = 1)]
    pub usuario_id: i64,
    /// Defaults to today when omitted.
    #[schema(example = "2024-01-01", format = "date", value_type = Option<String>)]
    pub fecha: Option<NaiveDate>,
    /// P/A/T/J or the full name; anything else is recorded as Ausente.
    #[schema(example = "P")]
    pub estado: String,
}

/// Active roster
#[utoipa::path(
    get,
    path = "/api/asistencia/activos",
    responses(
        (status = 200, description = "Active usuarios", body = [ActiveUsuario]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asistencia"
)]
pub async fn active_usuarios(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let roster = usuarios::active(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to list active usuarios");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(roster))
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/asistencia",
    request_body = MarkAsistencia,
    responses(
        (status = 200, description = "Attendance recorded (insert or replace)", body = Object, example = json!({
            "message": "Attendance recorded",
            "estado": "Presente"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asistencia"
)]
pub async fn mark_asistencia(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAsistencia>,
) -> impl Responder {
    let fecha = payload
        .fecha
        .unwrap_or_else(|| Local::now().date_naive());
    let estado = Estado::from_input(&payload.estado);

    match asistencia::mark(pool.get_ref(), payload.usuario_id, fecha, estado).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "Attendance recorded",
            "estado": estado.as_str()
        })),
        Err(e) => {
            error!(error = %e, usuario_id = payload.usuario_id, "Failed to record attendance");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}

/// Attendance history for one usuario
#[utoipa::path(
    get,
    path = "/api/asistencia/{usuario_id}",
    params(
        ("usuario_id", Path, description = "Usuario ID")
    ),
    responses(
        (status = 200, description = "Attendance rows ordered by fecha", body = [Asistencia]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Asistencia"
)]
pub async fn asistencia_for_usuario(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let usuario_id = path.into_inner();

    let rows = asistencia::for_usuario(pool.get_ref(), usuario_id)
        .await
        .map_err(|e| {
            error!(error = %e, usuario_id, "Failed to fetch attendance");
            ErrorInternalServerError("Database error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}
