use sqlx::SqlitePool;

use crate::error::{StoreError, is_unique_violation};
use crate::model::usuario::ActiveUsuario;

/// `estado` defaults to 'Activo' at the schema level.
pub async fn insert(
    pool: &SqlitePool,
    nombre_completo: &str,
    dni: &str,
    email: &str,
    rol: &str,
) -> Result<i64, StoreError> {
    let result = sqlx::query(
        r#"
        INSERT INTO usuarios (nombre_completo, dni, email, rol)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(nombre_completo)
    .bind(dni)
    .bind(email)
    .bind(rol)
    .execute(pool)
    .await;

    match result {
        Ok(res) => Ok(res.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate),
        Err(e) => Err(e.into()),
    }
}

/// Roster for taking attendance.
pub async fn active(pool: &SqlitePool) -> Result<Vec<ActiveUsuario>, StoreError> {
    let usuarios = sqlx::query_as::<_, ActiveUsuario>(
        "SELECT id, nombre_completo FROM usuarios WHERE estado = 'Activo' ORDER BY nombre_completo",
    )
    .fetch_all(pool)
    .await?;

    Ok(usuarios)
}
