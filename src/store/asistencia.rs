use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::model::asistencia::{Asistencia, Estado};

/// Upsert keyed on (usuario_id, fecha). Must stay a single statement with
/// conflict resolution, never a read-then-write.
pub async fn mark(
    pool: &SqlitePool,
    usuario_id: i64,
    fecha: NaiveDate,
    estado: Estado,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO asistencia (usuario_id, fecha, estado)
        VALUES (?, ?, ?)
        ON CONFLICT (usuario_id, fecha) DO UPDATE SET estado = excluded.estado
        "#,
    )
    .bind(usuario_id)
    .bind(fecha)
    .bind(estado.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn for_usuario(
    pool: &SqlitePool,
    usuario_id: i64,
) -> Result<Vec<Asistencia>, StoreError> {
    let rows = sqlx::query_as::<_, Asistencia>(
        "SELECT * FROM asistencia WHERE usuario_id = ? ORDER BY fecha",
    )
    .bind(usuario_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
