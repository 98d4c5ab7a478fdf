//! # File Store
//! src/store/mod.rs
//!
//! Este módulo resuelve paths lógicos a contenidos de archivo bajo el
//! directorio raíz del servidor (webroot), e infiere el Content-Type a
//! partir de la extensión.
//!
//! Un archivo inexistente NO es un error: `read` retorna `Ok(None)` para
//! que el caller produzca un 404 en vez de tumbar la conexión. Los errores
//! de I/O reales (permisos, disco) sí se propagan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Acceso de lectura a los archivos servidos bajo un directorio raíz
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directorio raíz del que se sirven los archivos
    root: PathBuf,
}

impl FileStore {
    /// Crea un file store sobre el directorio indicado
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Obtiene el directorio raíz
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lee el contenido completo de un archivo relativo al root
    ///
    /// # Retorna
    ///
    /// * `Ok(Some(bytes))` - El archivo existe; contenido completo
    /// * `Ok(None)` - El archivo no existe (señal de not-found, no error)
    /// * `Err(e)` - Error de I/O real (permisos, etc.)
    pub fn read(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.resolve(path)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Verifica si un archivo existe bajo el root
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    /// Resuelve un path lógico a su ubicación bajo el root
    ///
    /// El `/` inicial se descarta para que el join no reemplace al root.
    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

/// Infiere el Content-Type de un archivo a partir de su extensión
///
/// La extensión se compara de forma case-sensitive, tal cual llega.
/// Cualquier extensión desconocida (o ausente) cae en `text/plain`.
///
/// # Ejemplo
/// ```
/// use static_server::store::content_type;
///
/// assert_eq!(content_type("index.html"), "text/html");
/// assert_eq!(content_type("logo.svg"), "image/svg+xml");
/// assert_eq!(content_type("data.xyz"), "text/plain");
/// ```
pub fn content_type(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("");

    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "css" => "text/css",
        "csv" => "text/csv",
        "html" => "text/html",
        "xml" => "text/xml",
        "js" => "application/javascript",
        _ => "text/plain",
    }
}
