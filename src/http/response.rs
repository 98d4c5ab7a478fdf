//! # Construcción de Respuestas HTTP
//!
//! Este módulo construye las respuestas HTTP/1.1 del servidor. A diferencia
//! de un builder genérico, los headers van en un orden fijo que es parte
//! del contrato de wire, y el body siempre viaja comprimido con gzip.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Date: Sun, 01 Jan 2023 00:00:00 GMT\r\n
//! Server: StaticServer/0.1.0\r\n
//! Content-Encoding: gzip\r\n
//! Content-Length: 33\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! Connection: keep-alive\r\n
//! \r\n
//! <body comprimido>
//! ```
//!
//! `Content-Length` es la longitud del body *comprimido*. `Connection` es
//! `keep-alive` salvo para un 404, que cierra la conexión con `Closed`.

use super::StatusCode;
use std::time::SystemTime;

/// Token que identifica al servidor en el header `Server`
pub const SERVER_TOKEN: &str = "StaticServer/0.1.0";

/// Representa una respuesta HTTP completa, con el body ya comprimido
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, 500)
    status: StatusCode,

    /// Headers en orden de inserción (el orden es contrato de wire,
    /// por eso un Vec y no un HashMap)
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta, ya comprimido con gzip
    body: Vec<u8>,
}

impl Response {
    /// Construye una respuesta completa con los headers estándar en orden
    ///
    /// # Argumentos
    ///
    /// * `status` - Código de estado de la respuesta
    /// * `content_type` - Content-Type base; si empieza con `text` se le
    ///   agrega `; charset=utf-8`
    /// * `body` - Body ya comprimido con gzip (su longitud alimenta
    ///   `Content-Length`)
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok, "text/html", vec![0x1f, 0x8b]);
    /// assert_eq!(response.header("Content-Length"), Some("2"));
    /// assert_eq!(response.header("Connection"), Some("keep-alive"));
    /// ```
    pub fn new(status: StatusCode, content_type: &str, body: Vec<u8>) -> Self {
        let date = httpdate::fmt_http_date(SystemTime::now());

        let full_type = if content_type.starts_with("text") {
            format!("{}; charset=utf-8", content_type)
        } else {
            content_type.to_string()
        };

        // Solo un 404 cierra la conexión
        let connection = if status == StatusCode::NotFound {
            "Closed"
        } else {
            "keep-alive"
        };

        let headers = vec![
            ("Date".to_string(), date),
            ("Server".to_string(), SERVER_TOKEN.to_string()),
            ("Content-Encoding".to_string(), "gzip".to_string()),
            ("Content-Length".to_string(), body.len().to_string()),
            ("Content-Type".to_string(), full_type),
            ("Connection".to_string(), connection.to_string()),
        ];

        Self {
            status,
            headers,
            body,
        }
    }

    /// Genera el bloque de headers como bytes
    ///
    /// Cada línea termina en `\r\n` y un `\r\n` extra cierra el bloque.
    pub fn header_bytes(&self) -> Vec<u8> {
        let mut lines = Vec::with_capacity(self.headers.len() + 1);
        lines.push(format!("HTTP/1.1 {}", self.status));

        for (name, value) in &self.headers {
            lines.push(format!("{}: {}", name, value));
        }

        let mut block = lines.join("\r\n");
        block.push_str("\r\n\r\n");
        block.into_bytes()
    }

    /// Convierte la respuesta completa a bytes: headers + body comprimido
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = self.header_bytes();
        result.extend_from_slice(&self.body);
        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Busca el valor de un header por nombre
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene una referencia al body comprimido
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Indica si la respuesta pide cerrar la conexión después del write
    pub fn closes_connection(&self) -> bool {
        self.header("Connection") == Some("Closed")
    }
}
