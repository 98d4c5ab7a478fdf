//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes y las despacha a un thread propio
//! 3. Lee y valida requests HTTP en un loop por conexión
//! 4. Genera y envía responses comprimidas con gzip

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
