//! Repositorio del historial
//!
//! SQL de las siete colecciones hijas del vehículo. Los nombres de tabla y
//! columna salen del conjunto cerrado `TipoHistorial`, nunca del request.
//! Las inserciones aceptan cualquier executor para poder correr dentro de
//! la transacción del alta o modificación del padre.

use sqlx::{PgExecutor, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::models::historial::{EntradaHistorial, HistorialVehiculo, TipoHistorial, ValorHistorial};
use crate::utils::errors::{mapear_error_bd, AppError, AppResult};

/// Proyección normalizada de cualquier colección: las columnas que no
/// aplican se devuelven como NULL tipado.
fn columnas_select(tipo: TipoHistorial) -> String {
    let valor = match tipo {
        TipoHistorial::Kilometraje => "kilometraje, NULL::text AS descripcion",
        TipoHistorial::Imagen => "NULL::bigint AS kilometraje, url AS descripcion",
        _ => "NULL::bigint AS kilometraje, descripcion",
    };
    let fecha = match tipo.columna_fecha() {
        Some(columna) => format!("{} AS fecha", columna),
        None => "NULL::timestamptz AS fecha".to_string(),
    };
    format!("id, vehiculo_id, {}, {}", valor, fecha)
}

/// Inserta una entrada en la colección indicada.
pub async fn insertar<'e, E>(
    exec: E,
    vehiculo_id: Uuid,
    tipo: TipoHistorial,
    valor: &ValorHistorial,
) -> AppResult<EntradaHistorial>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "INSERT INTO {tabla} (vehiculo_id, {columna}) VALUES ($1, $2) RETURNING {select}",
        tabla = tipo.tabla(),
        columna = tipo.columna_valor(),
        select = columnas_select(tipo),
    );

    let consulta = sqlx::query_as::<_, EntradaHistorial>(&sql).bind(vehiculo_id);
    let consulta = match valor {
        ValorHistorial::Kilometros(km) => consulta.bind(*km),
        ValorHistorial::Texto(texto) => consulta.bind(texto.clone()),
    };

    consulta.fetch_one(exec).await.map_err(mapear_error_bd)
}

/// Inserta las URLs de imágenes en lote; todo-o-nada dentro de la
/// transacción del llamador.
pub async fn insertar_imagenes<'e, E>(
    exec: E,
    vehiculo_id: Uuid,
    urls: &[String],
) -> AppResult<Vec<i64>>
where
    E: PgExecutor<'e>,
{
    if urls.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::new("INSERT INTO imagenes (vehiculo_id, url) ");
    builder.push_values(urls, |mut b, url| {
        b.push_bind(vehiculo_id).push_bind(url);
    });
    builder.push(" RETURNING id");

    builder
        .build_query_scalar::<i64>()
        .fetch_all(exec)
        .await
        .map_err(mapear_error_bd)
}

/// Elimina la entrada más reciente según la columna de orden de la
/// colección. Colección vacía => NotFound.
pub async fn eliminar_ultima(
    pool: &PgPool,
    vehiculo_id: Uuid,
    tipo: TipoHistorial,
) -> AppResult<EntradaHistorial> {
    let sql = format!(
        "DELETE FROM {tabla} WHERE id = (
             SELECT id FROM {tabla} WHERE vehiculo_id = $1
             ORDER BY {orden} DESC, id DESC LIMIT 1
         ) RETURNING {select}",
        tabla = tipo.tabla(),
        orden = tipo.columna_orden(),
        select = columnas_select(tipo),
    );

    sqlx::query_as::<_, EntradaHistorial>(&sql)
        .bind(vehiculo_id)
        .fetch_optional(pool)
        .await
        .map_err(mapear_error_bd)?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "El vehículo no tiene entradas de {}",
                tipo.campo()
            ))
        })
}

/// Elimina exactamente una entrada. El doble match de id y vehiculo_id es
/// el límite de seguridad: un caller autorizado sobre un vehículo no puede
/// borrar entradas de otro adivinando ids.
pub async fn eliminar_una(
    pool: &PgPool,
    vehiculo_id: Uuid,
    tipo: TipoHistorial,
    entrada_id: i64,
) -> AppResult<EntradaHistorial> {
    let sql = format!(
        "DELETE FROM {tabla} WHERE id = $1 AND vehiculo_id = $2 RETURNING {select}",
        tabla = tipo.tabla(),
        select = columnas_select(tipo),
    );

    sqlx::query_as::<_, EntradaHistorial>(&sql)
        .bind(entrada_id)
        .bind(vehiculo_id)
        .fetch_optional(pool)
        .await
        .map_err(mapear_error_bd)?
        .ok_or_else(|| {
            AppError::NotFound("Entrada de historial no encontrada para este vehículo".to_string())
        })
}

/// Elimina todas las entradas de la colección para el vehículo. Cero
/// entradas eliminadas no es un error.
pub async fn eliminar_todas(
    pool: &PgPool,
    vehiculo_id: Uuid,
    tipo: TipoHistorial,
) -> AppResult<u64> {
    let sql = format!(
        "DELETE FROM {tabla} WHERE vehiculo_id = $1",
        tabla = tipo.tabla()
    );

    let resultado = sqlx::query(&sql)
        .bind(vehiculo_id)
        .execute(pool)
        .await
        .map_err(mapear_error_bd)?;

    Ok(resultado.rows_affected())
}

/// Lista la colección, más reciente primero. Lectura fresca en cada llamada.
pub async fn listar(
    pool: &PgPool,
    vehiculo_id: Uuid,
    tipo: TipoHistorial,
) -> AppResult<Vec<EntradaHistorial>> {
    let sql = format!(
        "SELECT {select} FROM {tabla} WHERE vehiculo_id = $1 ORDER BY {orden} DESC, id DESC",
        select = columnas_select(tipo),
        tabla = tipo.tabla(),
        orden = tipo.columna_orden(),
    );

    sqlx::query_as::<_, EntradaHistorial>(&sql)
        .bind(vehiculo_id)
        .fetch_all(pool)
        .await
        .map_err(mapear_error_bd)
}

/// Carga las siete colecciones del vehículo como una sola lectura del
/// agregado.
pub async fn historial_completo(pool: &PgPool, vehiculo_id: Uuid) -> AppResult<HistorialVehiculo> {
    let (kilometraje, service, reparaciones, destinos, rodados, notas, imagenes) = futures::try_join!(
        listar(pool, vehiculo_id, TipoHistorial::Kilometraje),
        listar(pool, vehiculo_id, TipoHistorial::Service),
        listar(pool, vehiculo_id, TipoHistorial::Reparacion),
        listar(pool, vehiculo_id, TipoHistorial::Destino),
        listar(pool, vehiculo_id, TipoHistorial::Rodado),
        listar(pool, vehiculo_id, TipoHistorial::Nota),
        listar(pool, vehiculo_id, TipoHistorial::Imagen),
    )?;

    Ok(HistorialVehiculo {
        kilometraje,
        service,
        reparaciones,
        destinos,
        rodados,
        notas,
        imagenes,
    })
}
