use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::error::StoreError;
use crate::store::usuarios;

#[derive(Deserialize, ToSchema)]
pub struct RegisterUsuario {
    #[schema(example = "Juan Pérez")]
    pub nombre_completo: Option<String>,
    #[schema(example = "12345678")]
    pub dni: Option<String>,
    #[schema(example = "juan.perez@example.com", format = "email")]
    pub email: Option<String>,
    #[schema(example = "Alumno")]
    pub rol: Option<String>,
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn missing_field(name: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "error": format!("The field '{name}' is required")
    }))
}

/// Register Usuario
#[utoipa::path(
    post,
    path = "/api/usuarios",
    request_body = RegisterUsuario,
    responses(
        (status = 201, description = "Usuario registered", body = Object, example = json!({
            "message": "Usuario registered successfully"
        })),
        (status = 400, description = "Missing or empty required field", body = Object, example = json!({
            "error": "The field 'email' is required"
        })),
        (status = 409, description = "Email or DNI already registered", body = Object, example = json!({
            "error": "Email or DNI already registered"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Usuarios"
)]
pub async fn register_usuario(
    pool: web::Data<SqlitePool>,
    payload: web::Json<RegisterUsuario>,
) -> HttpResponse {
    let Some(nombre_completo) = trimmed(&payload.nombre_completo) else {
        return missing_field("nombre_completo");
    };
    let Some(dni) = trimmed(&payload.dni) else {
        return missing_field("dni");
    };
    let Some(email) = trimmed(&payload.email) else {
        return missing_field("email");
    };
    let Some(rol) = trimmed(&payload.rol) else {
        return missing_field("rol");
    };

    match usuarios::insert(pool.get_ref(), nombre_completo, dni, email, rol).await {
        Ok(_) => HttpResponse::Created().json(json!({
            "message": "Usuario registered successfully"
        })),
        Err(StoreError::Duplicate) => HttpResponse::Conflict().json(json!({
            "error": "Email or DNI already registered"
        })),
        Err(e) => {
            error!(error = %e, "Failed to register usuario");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register usuario"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::json;

    use super::register_usuario;
    use crate::db::memory_pool;

    #[actix_web::test]
    async fn registers_then_rejects_duplicate() {
        let pool = memory_pool().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .route("/usuarios", web::post().to(register_usuario)),
        )
        .await;

        let body = json!({
            "nombre_completo": "Juan Pérez",
            "dni": "12345678",
            "email": "juan.perez@example.com",
            "rol": "Alumno"
        });

        let req = test::TestRequest::post()
            .uri("/usuarios")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // same email, different dni
        let dup = json!({
            "nombre_completo": "Otro Nombre",
            "dni": "99999999",
            "email": "juan.perez@example.com",
            "rol": "Profesor"
        });
        let req = test::TestRequest::post()
            .uri("/usuarios")
            .set_json(&dup)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn missing_or_empty_required_field_is_bad_request() {
        let pool = memory_pool().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .route("/usuarios", web::post().to(register_usuario)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/usuarios")
            .set_json(json!({
                "nombre_completo": "Juan Pérez",
                "dni": "12345678",
                "email": "juan.perez@example.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/usuarios")
            .set_json(json!({
                "nombre_completo": "  ",
                "dni": "12345678",
                "email": "juan.perez@example.com",
                "rol": "Alumno"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
