//! # Módulo HTTP
//!
//! Este módulo implementa la parte del protocolo HTTP/1.1 que el servidor
//! necesita, sin usar librerías de alto nivel:
//!
//! - Parsing y validación de la request line
//! - Extracción de query parameters
//! - Construcción de responses con headers en orden fijo
//! - Manejo de status codes
//!
//! ### Formato de Request aceptado
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! Solo se inspecciona la request line; los headers del cliente se ignoran.
//!
//! ### Formato de Response
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
//! <body comprimido con gzip>
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;
