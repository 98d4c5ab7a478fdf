//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo mapea el pathname de un request a su destino: un archivo
//! estático bajo el webroot o un handler dinámico registrado.
//!
//! ## Arquitectura
//!
//! ```text
//! pathname → Router → File(ruta relativa) | Dynamic(handler)
//! ```
//!
//! El destino de cada ruta es una variante etiquetada, no un valor
//! polimórfico: el dispatch es explícito en el match del caller.
//!
//! Resolución:
//! - Ruta registrada a un archivo → ese archivo bajo el webroot
//! - Ruta registrada a un handler → se invoca con los query parameters
//! - `/` sin registrar → `index.html` (documento por defecto)
//! - Cualquier otro pathname → el path literal bajo el webroot; si el
//!   archivo no existe, el file store lo señala y se responde 404

use crate::http::request::QueryParams;
use std::collections::HashMap;

/// Tipo de función handler para rutas dinámicas
///
/// Recibe los query parameters ya decodificados y retorna los bytes del
/// body (sin comprimir). Un `Err` se convierte en una respuesta 500; nunca
/// tumba el loop de la conexión ni el servidor.
pub type Handler = fn(&QueryParams) -> Result<Vec<u8>, String>;

/// Destino de una ruta registrada
#[derive(Clone)]
pub enum RouteTarget {
    /// Servir un archivo del webroot (nombre relativo al root)
    StaticFile(String),

    /// Invocar un handler que calcula el body
    Handler(Handler),
}

/// Resultado de resolver un pathname
#[derive(Clone)]
pub enum Resolution {
    /// Leer y servir este archivo (ruta relativa al webroot)
    File(String),

    /// Invocar este handler con los query parameters del request
    Dynamic(Handler),
}

/// Router que mapea pathnames a archivos o handlers
///
/// Las keys son pathnames canónicos (ej: `/`, `/calculate-area`); la última
/// registración para una key gana.
pub struct Router {
    routes: HashMap<String, RouteTarget>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registra una ruta (crea o sobrescribe)
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::router::{Router, RouteTarget};
    /// use static_server::http::request::QueryParams;
    ///
    /// fn next_handler(query: &QueryParams) -> Result<Vec<u8>, String> {
    ///     let num: i64 = query
    ///         .get("num")
    ///         .ok_or("Missing parameter: num")?
    ///         .parse()
    ///         .map_err(|_| "Parameter num must be an integer")?;
    ///     Ok((num + 1).to_string().into_bytes())
    /// }
    ///
    /// let mut router = Router::new();
    /// router.add_route("/about", RouteTarget::StaticFile("about.html".to_string()));
    /// router.add_route("/calculate-next", RouteTarget::Handler(next_handler));
    /// ```
    pub fn add_route(&mut self, path: &str, target: RouteTarget) {
        self.routes.insert(path.to_string(), target);
    }

    /// Elimina una ruta registrada (no-op si no existe)
    pub fn remove_route(&mut self, path: &str) {
        self.routes.remove(path);
    }

    /// Resuelve un pathname (sin query string) a su destino
    pub fn resolve(&self, pathname: &str) -> Resolution {
        match self.routes.get(pathname) {
            Some(RouteTarget::StaticFile(name)) => Resolution::File(name.clone()),
            Some(RouteTarget::Handler(handler)) => Resolution::Dynamic(*handler),
            // Documento por defecto, salvo que "/" esté registrado
            None if pathname == "/" => Resolution::File("index.html".to_string()),
            // Fallback: servir el path literal bajo el webroot
            None => Resolution::File(pathname.to_string()),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
