use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::error::StoreError;
use crate::model::individuo::Individuo;
use crate::store::individuos::{self, IndividuoFilter, IndividuoPatch};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateIndividuo {
    #[schema(example = "Alice")]
    pub nombre: String,
    #[schema(example = "Smith")]
    pub apellido: String,
    #[schema(example = "12345678")]
    pub dni: String,
    #[schema(example = "2000-01-15", format = "date", value_type = Option<String>)]
    pub fecha_nacimiento: Option<NaiveDate>,
    #[schema(example = "Femenino")]
    pub genero: Option<String>,
}

/// Register Individuo
#[utoipa::path(
    post,
    path = "/api/individuos",
    request_body = CreateIndividuo,
    responses(
        (status = 201, description = "Individuo registered", body = Object, example = json!({
            "id": 1,
            "message": "Individuo registered successfully"
        })),
        (status = 400, description = "Required field empty"),
        (status = 409, description = "DNI already registered", body = Object, example = json!({
            "error": "An individuo with this DNI already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Individuos"
)]
pub async fn create_individuo(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateIndividuo>,
) -> impl Responder {
    let nombre = payload.nombre.trim();
    let apellido = payload.apellido.trim();
    let dni = payload.dni.trim();

    if nombre.is_empty() || apellido.is_empty() || dni.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "nombre, apellido and dni must not be empty"
        }));
    }

    let genero = payload.genero.as_deref().map(str::trim).filter(|g| !g.is_empty());

    let result = individuos::insert(
        pool.get_ref(),
        nombre,
        apellido,
        dni,
        payload.fecha_nacimiento,
        genero,
    )
    .await;

    match result {
        Ok(id) => HttpResponse::Created().json(json!({
            "id": id,
            "message": "Individuo registered successfully"
        })),
        Err(StoreError::Duplicate) => HttpResponse::Conflict().json(json!({
            "error": "An individuo with this DNI already exists"
        })),
        Err(e) => {
            error!(error = %e, "Failed to create individuo");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}

/// List / filter Individuos
#[utoipa::path(
    get,
    path = "/api/individuos",
    params(
        ("nombre", Query, description = "Substring match on nombre"),
        ("apellido", Query, description = "Substring match on apellido"),
        ("dni", Query, description = "Substring match on dni"),
        ("fecha_nacimiento", Query, description = "Substring match on fecha_nacimiento"),
        ("genero", Query, description = "Substring match on genero")
    ),
    responses(
        (status = 200, description = "Individuos ordered by apellido, nombre", body = [Individuo])
    ),
    tag = "Individuos"
)]
pub async fn list_individuos(
    pool: web::Data<SqlitePool>,
    filter: web::Query<IndividuoFilter>,
) -> actix_web::Result<impl Responder> {
    let result = if filter.is_empty() {
        individuos::list_all(pool.get_ref()).await
    } else {
        individuos::search(pool.get_ref(), &filter).await
    };

    let rows = result.map_err(|e| {
        error!(error = %e, "Failed to list individuos");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Get Individuo by ID
#[utoipa::path(
    get,
    path = "/api/individuos/{id}",
    params(
        ("id", Path, description = "Individuo ID")
    ),
    responses(
        (status = 200, description = "Individuo found", body = Individuo),
        (status = 404, description = "Individuo not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Individuos"
)]
pub async fn get_individuo(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let individuo = individuos::find_by_id(pool.get_ref(), id)
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to fetch individuo");
            ErrorInternalServerError("Database error")
        })?;

    match individuo {
        Some(row) => Ok(HttpResponse::Ok().json(row)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "Individuo not found"
        }))),
    }
}

/// Get Individuo by DNI
#[utoipa::path(
    get,
    path = "/api/individuos/dni/{dni}",
    params(
        ("dni", Path, description = "Exact DNI")
    ),
    responses(
        (status = 200, description = "Individuo found", body = Individuo),
        (status = 404, description = "Individuo not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Individuos"
)]
pub async fn get_individuo_by_dni(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let dni = path.into_inner();

    let individuo = individuos::find_by_dni(pool.get_ref(), &dni)
        .await
        .map_err(|e| {
            error!(error = %e, dni = %dni, "Failed to fetch individuo by dni");
            ErrorInternalServerError("Database error")
        })?;

    match individuo {
        Some(row) => Ok(HttpResponse::Ok().json(row)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "Individuo not found"
        }))),
    }
}

/// Update Individuo
#[utoipa::path(
    put,
    path = "/api/individuos/{id}",
    params(
        ("id", Path, description = "Individuo ID")
    ),
    request_body = IndividuoPatch,
    responses(
        (status = 200, description = "Individuo updated", body = Object, example = json!({
            "message": "Individuo updated successfully"
        })),
        (status = 400, description = "No fields provided for update"),
        (status = 404, description = "Individuo not found"),
        (status = 409, description = "DNI already in use by another individuo"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Individuos"
)]
pub async fn update_individuo(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    patch: web::Json<IndividuoPatch>,
) -> impl Responder {
    let id = path.into_inner();

    match individuos::update(pool.get_ref(), id, &patch).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "Individuo updated successfully"
        })),
        Err(StoreError::EmptyUpdate) => HttpResponse::BadRequest().json(json!({
            "error": "No fields provided for update"
        })),
        Err(StoreError::NotFound) => HttpResponse::NotFound().json(json!({
            "error": "Individuo not found"
        })),
        Err(StoreError::Duplicate) => HttpResponse::Conflict().json(json!({
            "error": "This DNI is already in use by another individuo"
        })),
        Err(e) => {
            error!(error = %e, id, "Failed to update individuo");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}

/// Delete Individuo
#[utoipa::path(
    delete,
    path = "/api/individuos/{id}",
    params(
        ("id", Path, description = "Individuo ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Individuo not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Individuos"
)]
pub async fn delete_individuo(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();

    // Attendance rows referencing this individuo are intentionally left alone.
    match individuos::delete(pool.get_ref(), id).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "Successfully deleted"
        })),
        Err(StoreError::NotFound) => HttpResponse::NotFound().json(json!({
            "error": "Individuo not found"
        })),
        Err(e) => {
            error!(error = %e, id, "Failed to delete individuo");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}
