//! # Static Server
//! src/lib.rs
//!
//! Servidor HTTP concurrente de archivos estáticos implementado desde cero.
//! Sirve los archivos de un directorio raíz (webroot), comprime cada body
//! con gzip y permite registrar rutas dinámicas (callbacks que calculan
//! la respuesta a partir de los query parameters).
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y construcción de responses HTTP/1.1
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `router`: Mapeo de paths a archivos estáticos o handlers dinámicos
//! - `store`: Lectura de archivos bajo el webroot e inferencia de Content-Type
//! - `compress`: Compresión gzip de los bodies
//! - `config`: Configuración vía CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_server::config::Config;
//! use static_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod compress;
pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod store;
