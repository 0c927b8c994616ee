//! Repositorio de vehículos
//!
//! SQL de la fila padre: alta, lectura, actualización de escalares,
//! eliminación y el listado filtrado con paginación.

use std::collections::HashMap;

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::vehiculo_dto::{CamposEscalares, CreateVehiculoRequest, VehiculoFilters};
use crate::models::vehiculo::Vehiculo;
use crate::utils::errors::{mapear_error_bd, AppResult};
use crate::utils::pagination::Paginacion;
use crate::utils::validation::texto_presente;

pub async fn crear<'e, E>(exec: E, datos: &CreateVehiculoRequest) -> AppResult<Vehiculo>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Vehiculo>(
        r#"
        INSERT INTO vehiculos (dominio, marca, modelo, anio, tipo, chasis, motor, cedula, title, chofer)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(datos.dominio.trim())
    .bind(texto_presente(&datos.marca))
    .bind(texto_presente(&datos.modelo))
    .bind(datos.anio)
    .bind(texto_presente(&datos.tipo))
    .bind(texto_presente(&datos.chasis))
    .bind(texto_presente(&datos.motor))
    .bind(texto_presente(&datos.cedula))
    .bind(datos.title.trim())
    .bind(texto_presente(&datos.chofer))
    .fetch_one(exec)
    .await
    .map_err(mapear_error_bd)
}

pub async fn buscar_por_id<'e, E>(exec: E, id: Uuid) -> AppResult<Option<Vehiculo>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE id = $1")
        .bind(id)
        .fetch_optional(exec)
        .await
        .map_err(mapear_error_bd)
}

/// Aplica los campos escalares presentes en una sola actualización
/// in-place; los ausentes conservan su valor.
pub async fn actualizar_escalares<'e, E>(
    exec: E,
    id: Uuid,
    campos: &CamposEscalares,
) -> AppResult<Vehiculo>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Vehiculo>(
        r#"
        UPDATE vehiculos SET
            dominio = COALESCE($2, dominio),
            marca = COALESCE($3, marca),
            modelo = COALESCE($4, modelo),
            anio = COALESCE($5, anio),
            tipo = COALESCE($6, tipo),
            chasis = COALESCE($7, chasis),
            motor = COALESCE($8, motor),
            cedula = COALESCE($9, cedula),
            title = COALESCE($10, title),
            chofer = COALESCE($11, chofer),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&campos.dominio)
    .bind(&campos.marca)
    .bind(&campos.modelo)
    .bind(campos.anio)
    .bind(&campos.tipo)
    .bind(&campos.chasis)
    .bind(&campos.motor)
    .bind(&campos.cedula)
    .bind(&campos.title)
    .bind(&campos.chofer)
    .fetch_one(exec)
    .await
    .map_err(mapear_error_bd)
}

/// Elimina la fila padre; las colecciones hijas caen por ON DELETE CASCADE.
pub async fn eliminar<'e, E>(exec: E, id: Uuid) -> AppResult<u64>
where
    E: PgExecutor<'e>,
{
    let resultado = sqlx::query("DELETE FROM vehiculos WHERE id = $1")
        .bind(id)
        .execute(exec)
        .await
        .map_err(mapear_error_bd)?;

    Ok(resultado.rows_affected())
}

/// Traducción de los filtros a SQL. `alcance` es la unidad ya resuelta por
/// la política de acceso; el filtro de destino exige al menos una entrada
/// coincidente en el historial de destinos.
fn aplicar_filtros(
    builder: &mut QueryBuilder<'_, Postgres>,
    filtros: &VehiculoFilters,
    alcance: Option<&str>,
) {
    builder.push(" WHERE 1 = 1");

    if let Some(dominio) = texto_presente(&filtros.dominio) {
        builder
            .push(" AND dominio ILIKE ")
            .push_bind(format!("%{}%", dominio));
    }
    if let Some(marca) = texto_presente(&filtros.marca) {
        builder
            .push(" AND marca ILIKE ")
            .push_bind(format!("%{}%", marca));
    }
    if let Some(modelo) = texto_presente(&filtros.modelo) {
        builder
            .push(" AND modelo ILIKE ")
            .push_bind(format!("%{}%", modelo));
    }
    if let Some(tipo) = texto_presente(&filtros.tipo) {
        builder
            .push(" AND tipo ILIKE ")
            .push_bind(format!("%{}%", tipo));
    }
    if let Some(anio) = filtros.anio {
        builder.push(" AND anio = ").push_bind(anio);
    }
    if let Some(unidad) = alcance {
        builder.push(" AND title = ").push_bind(unidad.to_string());
    }
    if let Some(destino) = texto_presente(&filtros.destino) {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM historial_destinos d \
                 WHERE d.vehiculo_id = vehiculos.id AND d.descripcion ILIKE ",
            )
            .push_bind(format!("%{}%", destino))
            .push(")");
    }
}

/// Listado filtrado, ordenado por dominio ascendente. El conteo total y la
/// página corren en paralelo sobre el pool.
pub async fn listar(
    pool: &PgPool,
    filtros: &VehiculoFilters,
    alcance: Option<&str>,
    paginacion: Paginacion,
) -> AppResult<(Vec<Vehiculo>, i64)> {
    let mut consulta = QueryBuilder::new("SELECT * FROM vehiculos");
    aplicar_filtros(&mut consulta, filtros, alcance);
    consulta
        .push(" ORDER BY dominio ASC LIMIT ")
        .push_bind(paginacion.limite)
        .push(" OFFSET ")
        .push_bind(paginacion.offset());

    let mut conteo = QueryBuilder::new("SELECT COUNT(*) FROM vehiculos");
    aplicar_filtros(&mut conteo, filtros, alcance);

    let (docs, total) = futures::try_join!(
        consulta.build_query_as::<Vehiculo>().fetch_all(pool),
        conteo.build_query_scalar::<i64>().fetch_one(pool),
    )
    .map_err(mapear_error_bd)?;

    Ok((docs, total))
}

/// URLs de imágenes de un conjunto de vehículos, agrupadas por vehículo.
pub async fn imagenes_por_vehiculos(
    pool: &PgPool,
    ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<String>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let filas: Vec<(Uuid, String)> = sqlx::query_as(
        "SELECT vehiculo_id, url FROM imagenes WHERE vehiculo_id = ANY($1) ORDER BY id ASC",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
    .map_err(mapear_error_bd)?;

    let mut mapa: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (vehiculo_id, url) in filas {
        mapa.entry(vehiculo_id).or_default().push(url);
    }
    Ok(mapa)
}
