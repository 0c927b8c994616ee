//! Notificaciones a administradores
//!
//! Fan-out best-effort después de un alta o modificación exitosa. Corre
//! fuera de la transacción principal y nunca hace fallar la operación que
//! lo disparó: cualquier error se registra y se descarta.

use sqlx::PgPool;
use tracing::warn;

/// Encola una notificación para todos los administradores.
pub fn notificar_admins(pool: PgPool, titulo: String, cuerpo: String) {
    tokio::spawn(async move {
        if let Err(e) = insertar_para_admins(&pool, &titulo, &cuerpo).await {
            warn!("No se pudieron encolar notificaciones ({}): {}", titulo, e);
        }
    });
}

async fn insertar_para_admins(pool: &PgPool, titulo: &str, cuerpo: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO notificaciones (usuario_id, titulo, cuerpo)
        SELECT id, $1, $2 FROM usuarios WHERE admin = TRUE
        "#,
    )
    .bind(titulo)
    .bind(cuerpo)
    .execute(pool)
    .await?;

    Ok(())
}
