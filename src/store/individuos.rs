use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::{StoreError, is_unique_violation};
use crate::model::individuo::Individuo;

/// Sparse patch. `None` leaves the column untouched; so does an empty
/// string. Clearing a column is not supported.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IndividuoPatch {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub dni: Option<String>,
    #[schema(example = "2000-01-15", value_type = Option<String>, format = "date")]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub genero: Option<String>,
}

/// Closed set of filterable columns. Every supplied value is matched as a
/// substring; multiple criteria are AND-ed.
#[derive(Debug, Default, Deserialize)]
pub struct IndividuoFilter {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub dni: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub genero: Option<String>,
}

impl IndividuoFilter {
    fn criteria(&self) -> Vec<(&'static str, &str)> {
        [
            ("nombre", &self.nombre),
            ("apellido", &self.apellido),
            ("dni", &self.dni),
            ("fecha_nacimiento", &self.fecha_nacimiento),
            ("genero", &self.genero),
        ]
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (column, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }
}

pub async fn insert(
    pool: &SqlitePool,
    nombre: &str,
    apellido: &str,
    dni: &str,
    fecha_nacimiento: Option<NaiveDate>,
    genero: Option<&str>,
) -> Result<i64, StoreError> {
    let result = sqlx::query(
        r#"
        INSERT INTO individuos (nombre, apellido, dni, fecha_nacimiento, genero)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(nombre)
    .bind(apellido)
    .bind(dni)
    .bind(fecha_nacimiento)
    .bind(genero)
    .execute(pool)
    .await;

    match result {
        Ok(res) => Ok(res.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate),
        Err(e) => Err(e.into()),
    }
}

pub async fn update(pool: &SqlitePool, id: i64, patch: &IndividuoPatch) -> Result<(), StoreError> {
    // ---------- build SET clause dynamically ----------
    let mut set_clauses: Vec<&'static str> = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(nombre) = patch.nombre.as_deref().filter(|v| !v.is_empty()) {
        set_clauses.push("nombre = ?");
        bindings.push(nombre.to_owned());
    }

    if let Some(apellido) = patch.apellido.as_deref().filter(|v| !v.is_empty()) {
        set_clauses.push("apellido = ?");
        bindings.push(apellido.to_owned());
    }

    if let Some(dni) = patch.dni.as_deref().filter(|v| !v.is_empty()) {
        set_clauses.push("dni = ?");
        bindings.push(dni.to_owned());
    }

    if let Some(fecha) = patch.fecha_nacimiento {
        set_clauses.push("fecha_nacimiento = ?");
        bindings.push(fecha.format("%Y-%m-%d").to_string());
    }

    if let Some(genero) = patch.genero.as_deref().filter(|v| !v.is_empty()) {
        set_clauses.push("genero = ?");
        bindings.push(genero.to_owned());
    }

    if set_clauses.is_empty() {
        return Err(StoreError::EmptyUpdate);
    }

    let sql = format!(
        "UPDATE individuos SET {} WHERE id = ?",
        set_clauses.join(", ")
    );

    let mut query = sqlx::query(&sql);
    for value in bindings {
        query = query.bind(value);
    }

    match query.bind(id).execute(pool).await {
        Ok(res) if res.rows_affected() == 0 => Err(StoreError::NotFound),
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate),
        Err(e) => Err(e.into()),
    }
}

/// No cascade: related asistencia rows are left in place.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let res = sqlx::query("DELETE FROM individuos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }

    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Individuo>, StoreError> {
    let individuo = sqlx::query_as::<_, Individuo>("SELECT * FROM individuos WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(individuo)
}

pub async fn find_by_dni(pool: &SqlitePool, dni: &str) -> Result<Option<Individuo>, StoreError> {
    let individuo = sqlx::query_as::<_, Individuo>("SELECT * FROM individuos WHERE dni = ?")
        .bind(dni)
        .fetch_optional(pool)
        .await?;

    Ok(individuo)
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Individuo>, StoreError> {
    let individuos =
        sqlx::query_as::<_, Individuo>("SELECT * FROM individuos ORDER BY apellido, nombre")
            .fetch_all(pool)
            .await?;

    Ok(individuos)
}

pub async fn search(
    pool: &SqlitePool,
    filter: &IndividuoFilter,
) -> Result<Vec<Individuo>, StoreError> {
    let criteria = filter.criteria();
    if criteria.is_empty() {
        return list_all(pool).await;
    }

    let mut conditions: Vec<String> = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    for (column, value) in criteria {
        conditions.push(format!("{column} LIKE ?"));
        bindings.push(format!("%{value}%"));
    }

    let sql = format!(
        "SELECT * FROM individuos WHERE {} ORDER BY apellido, nombre",
        conditions.join(" AND ")
    );

    let mut query = sqlx::query_as::<_, Individuo>(&sql);
    for value in bindings {
        query = query.bind(value);
    }

    Ok(query.fetch_all(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    async fn seed(pool: &SqlitePool) {
        insert(pool, "Alice", "Smith", "12345678", None, Some("Femenino"))
            .await
            .unwrap();
        insert(pool, "Bob", "Johnson", "87654321", None, Some("Masculino"))
            .await
            .unwrap();
        insert(pool, "Alicia", "Gomez", "11223344", None, None)
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn duplicate_dni_is_rejected_and_store_unchanged() {
        let pool = memory_pool().await;

        insert(&pool, "Alice", "Smith", "12345678", None, None)
            .await
            .unwrap();
        let err = insert(&pool, "Other", "Person", "12345678", None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Duplicate));
        assert_eq!(list_all(&pool).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn empty_patch_reports_nothing_to_update() {
        let pool = memory_pool().await;
        let id = insert(&pool, "Alice", "Smith", "12345678", None, None)
            .await
            .unwrap();

        let err = update(&pool, id, &IndividuoPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmptyUpdate));

        // Empty strings count as "leave untouched" too.
        let patch = IndividuoPatch {
            nombre: Some(String::new()),
            genero: Some(String::new()),
            ..Default::default()
        };
        let err = update(&pool, id, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyUpdate));

        let row = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(row.nombre, "Alice");
        assert_eq!(row.dni, "12345678");
    }

    #[actix_web::test]
    async fn sparse_patch_touches_only_supplied_fields() {
        let pool = memory_pool().await;
        let id = insert(&pool, "Alice", "Smith", "12345678", None, Some("Femenino"))
            .await
            .unwrap();

        let patch = IndividuoPatch {
            nombre: Some("Alicia".to_string()),
            fecha_nacimiento: NaiveDate::from_ymd_opt(2000, 1, 16),
            ..Default::default()
        };
        update(&pool, id, &patch).await.unwrap();

        let row = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(row.nombre, "Alicia");
        assert_eq!(row.apellido, "Smith");
        assert_eq!(row.dni, "12345678");
        assert_eq!(row.fecha_nacimiento, NaiveDate::from_ymd_opt(2000, 1, 16));
        assert_eq!(row.genero.as_deref(), Some("Femenino"));
    }

    #[actix_web::test]
    async fn update_to_taken_dni_leaves_both_rows_intact() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let bob = find_by_dni(&pool, "87654321").await.unwrap().unwrap();
        let patch = IndividuoPatch {
            dni: Some("11223344".to_string()),
            ..Default::default()
        };
        let err = update(&pool, bob.id, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));

        let bob = find_by_id(&pool, bob.id).await.unwrap().unwrap();
        assert_eq!(bob.dni, "87654321");
        assert!(find_by_dni(&pool, "11223344").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn update_unknown_id_is_not_found() {
        let pool = memory_pool().await;

        let patch = IndividuoPatch {
            nombre: Some("Nadie".to_string()),
            ..Default::default()
        };
        let err = update(&pool, 999, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[actix_web::test]
    async fn search_matches_substrings_ordered_by_apellido_nombre() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let filter = IndividuoFilter {
            nombre: Some("ali".to_string()),
            ..Default::default()
        };
        let hits = search(&pool, &filter).await.unwrap();

        let names: Vec<&str> = hits.iter().map(|i| i.nombre.as_str()).collect();
        assert_eq!(names, ["Alicia", "Alice"]); // Gomez before Smith
    }

    #[actix_web::test]
    async fn search_ands_multiple_criteria() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let filter = IndividuoFilter {
            nombre: Some("ali".to_string()),
            apellido: Some("Smith".to_string()),
            ..Default::default()
        };
        let hits = search(&pool, &filter).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nombre, "Alice");
    }

    #[actix_web::test]
    async fn blank_filter_lists_everyone() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let filter = IndividuoFilter {
            nombre: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(search(&pool, &filter).await.unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn list_orders_by_apellido_then_nombre() {
        let pool = memory_pool().await;
        seed(&pool).await;
        insert(&pool, "Alan", "Gomez", "55667788", None, None)
            .await
            .unwrap();

        let all = list_all(&pool).await.unwrap();
        let pairs: Vec<(&str, &str)> = all
            .iter()
            .map(|i| (i.apellido.as_str(), i.nombre.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("Gomez", "Alan"),
                ("Gomez", "Alicia"),
                ("Johnson", "Bob"),
                ("Smith", "Alice"),
            ]
        );
    }

    #[actix_web::test]
    async fn delete_removes_row_then_reports_not_found() {
        let pool = memory_pool().await;
        let id = insert(&pool, "Charlie", "Brown", "99887766", None, None)
            .await
            .unwrap();

        delete(&pool, id).await.unwrap();
        assert!(find_by_id(&pool, id).await.unwrap().is_none());

        let err = delete(&pool, id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[actix_web::test]
    async fn point_lookups() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let alice = find_by_dni(&pool, "12345678").await.unwrap().unwrap();
        assert_eq!(alice.nombre, "Alice");
        assert!(find_by_dni(&pool, "00000000").await.unwrap().is_none());

        let same = find_by_id(&pool, alice.id).await.unwrap().unwrap();
        assert_eq!(same.dni, alice.dni);
    }
}
