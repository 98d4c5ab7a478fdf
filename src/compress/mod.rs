//! # Compresión de Bodies
//! src/compress/mod.rs
//!
//! Todos los bodies del servidor viajan comprimidos con gzip (contenedor
//! RFC 1952, payload DEFLATE), decodificable por cualquier cliente
//! estándar. No hay camino de descompresión: el servidor nunca recibe
//! bodies comprimidos.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Comprime bytes en un stream gzip completo
///
/// La salida es determinista para una misma entrada (nivel de compresión
/// fijo, sin mtime en el header). Una entrada vacía produce un stream gzip
/// válido de payload vacío.
///
/// # Ejemplo
/// ```
/// use static_server::compress::compress;
///
/// let compressed = compress(b"<html></html>").unwrap();
/// assert_eq!(&compressed[..2], &[0x1f, 0x8b]); // magic number gzip
/// ```
pub fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
