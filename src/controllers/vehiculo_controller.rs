//! Controller de Vehículos
//!
//! El agregado: la fila padre más sus siete colecciones de historial,
//! tratadas como un único límite de consistencia. Toda escritura corre en
//! una transacción que llega a commit o rollback en todos los caminos de
//! salida; la transacción de sqlx revierte al soltarse si no hubo commit.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehiculo_dto::{
    CreateVehiculoRequest, UpdateVehiculoRequest, VehiculoFilters,
};
use crate::middleware::auth::UsuarioAutenticado;
use crate::models::historial::{
    EntradaHistorial, HistorialVehiculo, TipoHistorial, ValorHistorial,
};
use crate::models::unidad::Unidad;
use crate::models::vehiculo::{Vehiculo, VehiculoConImagenes};
use crate::repositories::{historial_repository, vehiculo_repository};
use crate::services::acceso_service::PoliticaAcceso;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::pagination::{Paginacion, Paginado};
use crate::utils::validation::parsear_kilometros;

pub struct VehiculoController {
    pool: PgPool,
    politica: PoliticaAcceso,
}

impl VehiculoController {
    pub fn new(pool: PgPool, politica: PoliticaAcceso) -> Self {
        Self { pool, politica }
    }

    /// Listado filtrado y paginado. El alcance de unidad lo resuelve la
    /// política: filtro explícito > unidad propia (no admin) > sin
    /// restricción. Cada vehículo sale con sus URLs de imágenes aplanadas.
    pub async fn listar(
        &self,
        filtros: VehiculoFilters,
        principal: &UsuarioAutenticado,
    ) -> AppResult<Paginado<VehiculoConImagenes>> {
        let paginacion = Paginacion::nueva(filtros.pagina, filtros.limite);
        let alcance = self
            .politica
            .alcance_listado(principal, filtros.title.as_deref());

        let (vehiculos, total) =
            vehiculo_repository::listar(&self.pool, &filtros, alcance.as_deref(), paginacion)
                .await?;

        let ids: Vec<Uuid> = vehiculos.iter().map(|v| v.id).collect();
        let mut imagenes = vehiculo_repository::imagenes_por_vehiculos(&self.pool, &ids).await?;

        let docs = vehiculos
            .into_iter()
            .map(|vehiculo| VehiculoConImagenes {
                imagenes: imagenes.remove(&vehiculo.id).unwrap_or_default(),
                vehiculo,
            })
            .collect();

        Ok(Paginado::envolver(docs, total, paginacion))
    }

    /// Lectura por id con sus imágenes. Un vehículo inexistente y uno de
    /// otra unidad responden igual: la existencia no se revela.
    pub async fn obtener(
        &self,
        id: Uuid,
        principal: &UsuarioAutenticado,
    ) -> AppResult<VehiculoConImagenes> {
        let vehiculo = self.cargar_visible(id, principal).await?;

        let imagenes = vehiculo_repository::imagenes_por_vehiculos(&self.pool, &[vehiculo.id])
            .await?
            .remove(&vehiculo.id)
            .unwrap_or_default();

        Ok(VehiculoConImagenes { vehiculo, imagenes })
    }

    /// Alta del agregado completo en una transacción: la fila padre, una
    /// entrada de historial por cada campo opcional presente y las imágenes
    /// en lote. Cualquier fallo revierte todo el conjunto.
    pub async fn crear(
        &self,
        datos: CreateVehiculoRequest,
        principal: &UsuarioAutenticado,
    ) -> AppResult<VehiculoConImagenes> {
        datos.validate().map_err(AppError::Validation)?;
        let entradas = datos.entradas_historial()?;
        let urls = datos.urls_imagenes();

        let mut tx = self.pool.begin().await?;

        if !self
            .politica
            .puede_escribir(principal, &Unidad::nueva(datos.title.trim()))
        {
            tx.rollback().await?;
            return Err(AppError::Forbidden(
                "No puede crear vehículos fuera de su unidad".to_string(),
            ));
        }

        let vehiculo = vehiculo_repository::crear(&mut *tx, &datos).await?;

        for (tipo, valor) in &entradas {
            historial_repository::insertar(&mut *tx, vehiculo.id, *tipo, valor).await?;
        }
        historial_repository::insertar_imagenes(&mut *tx, vehiculo.id, &urls).await?;

        tx.commit().await?;

        Ok(VehiculoConImagenes {
            vehiculo,
            imagenes: urls,
        })
    }

    /// Modificación del agregado en una transacción. Cada campo presente es
    /// o un escalar del padre (un solo update in-place) o un campo de
    /// historial (una entrada nueva); las entradas existentes no se tocan.
    pub async fn actualizar(
        &self,
        id: Uuid,
        datos: UpdateVehiculoRequest,
        principal: &UsuarioAutenticado,
    ) -> AppResult<Vehiculo> {
        datos.validate().map_err(AppError::Validation)?;
        let (escalares, entradas) = datos.clasificar()?;
        let urls = datos.urls_imagenes();

        let mut tx = self.pool.begin().await?;

        let actual = vehiculo_repository::buscar_por_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        if !self.politica.puede_escribir(principal, &actual.unidad()) {
            // mismo mensaje que el vehículo inexistente: no se revela nada
            tx.rollback().await?;
            return Err(not_found_error("Vehículo", &id.to_string()));
        }

        let vehiculo = if escalares.esta_vacio() {
            actual
        } else {
            vehiculo_repository::actualizar_escalares(&mut *tx, id, &escalares).await?
        };

        for (tipo, valor) in &entradas {
            historial_repository::insertar(&mut *tx, id, *tipo, valor).await?;
        }
        historial_repository::insertar_imagenes(&mut *tx, id, &urls).await?;

        tx.commit().await?;

        Ok(vehiculo)
    }

    /// Baja del agregado. Las colecciones hijas caen por cascada.
    pub async fn eliminar(&self, id: Uuid, principal: &UsuarioAutenticado) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let vehiculo = vehiculo_repository::buscar_por_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        if !self.politica.puede_escribir(principal, &vehiculo.unidad()) {
            tx.rollback().await?;
            return Err(AppError::Forbidden(
                "No tiene permiso para eliminar este vehículo".to_string(),
            ));
        }

        vehiculo_repository::eliminar(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Historial completo del vehículo, las siete colecciones en una sola
    /// lectura del agregado.
    pub async fn historial(
        &self,
        id: Uuid,
        principal: &UsuarioAutenticado,
    ) -> AppResult<HistorialVehiculo> {
        let vehiculo = self.cargar_visible(id, principal).await?;
        historial_repository::historial_completo(&self.pool, vehiculo.id).await
    }

    pub async fn listar_historial(
        &self,
        id: Uuid,
        campo: &str,
        principal: &UsuarioAutenticado,
    ) -> AppResult<Vec<EntradaHistorial>> {
        let tipo = resolver_campo(campo)?;
        let vehiculo = self.cargar_visible(id, principal).await?;
        historial_repository::listar(&self.pool, vehiculo.id, tipo).await
    }

    /// Agrega una entrada suelta a una colección de historial.
    pub async fn agregar_historial(
        &self,
        id: Uuid,
        campo: &str,
        valor: &str,
        principal: &UsuarioAutenticado,
    ) -> AppResult<EntradaHistorial> {
        let tipo = resolver_campo(campo)?;
        let vehiculo = self.cargar_editable(id, principal).await?;

        let valor = match tipo {
            TipoHistorial::Kilometraje => {
                ValorHistorial::Kilometros(parsear_kilometros(valor)?)
            }
            _ => {
                let texto = valor.trim();
                if texto.is_empty() {
                    return Err(validation_error("valor", "no puede estar vacío"));
                }
                ValorHistorial::Texto(texto.to_string())
            }
        };

        historial_repository::insertar(&self.pool, vehiculo.id, tipo, &valor).await
    }

    /// Elimina la entrada más reciente de la colección.
    pub async fn eliminar_ultima_entrada(
        &self,
        id: Uuid,
        campo: &str,
        principal: &UsuarioAutenticado,
    ) -> AppResult<EntradaHistorial> {
        let tipo = resolver_campo(campo)?;
        let vehiculo = self.cargar_editable(id, principal).await?;
        historial_repository::eliminar_ultima(&self.pool, vehiculo.id, tipo).await
    }

    /// Elimina una entrada puntual; el repositorio exige que pertenezca al
    /// vehículo indicado.
    pub async fn eliminar_entrada(
        &self,
        id: Uuid,
        campo: &str,
        entrada_id: i64,
        principal: &UsuarioAutenticado,
    ) -> AppResult<EntradaHistorial> {
        let tipo = resolver_campo(campo)?;
        let vehiculo = self.cargar_editable(id, principal).await?;
        historial_repository::eliminar_una(&self.pool, vehiculo.id, tipo, entrada_id).await
    }

    /// Vacía la colección para el vehículo; devuelve cuántas entradas cayeron.
    pub async fn eliminar_coleccion(
        &self,
        id: Uuid,
        campo: &str,
        principal: &UsuarioAutenticado,
    ) -> AppResult<u64> {
        let tipo = resolver_campo(campo)?;
        let vehiculo = self.cargar_editable(id, principal).await?;
        historial_repository::eliminar_todas(&self.pool, vehiculo.id, tipo).await
    }

    /// Carga para lectura: ausencia y falta de permiso responden igual.
    async fn cargar_visible(
        &self,
        id: Uuid,
        principal: &UsuarioAutenticado,
    ) -> AppResult<Vehiculo> {
        vehiculo_repository::buscar_por_id(&self.pool, id)
            .await?
            .filter(|v| self.politica.puede_ver(principal, &v.unidad()))
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
    }

    /// Carga para mutación de historial: el vehículo debe existir y el
    /// principal debe poder escribir sobre su unidad.
    async fn cargar_editable(
        &self,
        id: Uuid,
        principal: &UsuarioAutenticado,
    ) -> AppResult<Vehiculo> {
        let vehiculo = vehiculo_repository::buscar_por_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        if !self.politica.puede_escribir(principal, &vehiculo.unidad()) {
            return Err(AppError::Forbidden(
                "No tiene permiso sobre este vehículo".to_string(),
            ));
        }
        Ok(vehiculo)
    }
}

fn resolver_campo(campo: &str) -> AppResult<TipoHistorial> {
    TipoHistorial::desde_campo(campo)
        .ok_or_else(|| validation_error("campo", "tipo de historial desconocido"))
}
