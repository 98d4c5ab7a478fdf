//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_server --port 8080 --serve-dir ./webroot --read-timeout-ms 1000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 SERVE_DIR=./webroot ./static_server
//! ```

use clap::Parser;

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor HTTP concurrente de archivos estáticos con compresión gzip")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "80", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz desde el que se sirven los archivos
    #[arg(long = "serve-dir", default_value = "./webroot", env = "SERVE_DIR")]
    pub serve_dir: String,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    ///
    /// Una conexión inactiva se cierra cuando expira este tiempo sin
    /// recibir un nuevo request.
    #[arg(long = "read-timeout-ms", default_value = "1000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:80");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.serve_dir.trim().is_empty() {
            return Err("Serve directory must not be empty".to_string());
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════╗");
        println!("║     Static Server Configuration          ║");
        println!("╚══════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Webroot:      {}", self.serve_dir);
        if self.read_timeout_ms > 0 {
            println!("   Read timeout: {} ms", self.read_timeout_ms);
        } else {
            println!("   Read timeout: disabled");
        }
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 80,
            host: "0.0.0.0".to_string(),
            serve_dir: "./webroot".to_string(),
            read_timeout_ms: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 80);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.serve_dir, "./webroot");
        assert_eq!(config.read_timeout_ms, 1_000);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "0.0.0.0:80");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Host"));
    }

    #[test]
    fn test_validate_empty_serve_dir() {
        let mut config = Config::default();
        config.serve_dir = "  ".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Serve directory"));
    }

    #[test]
    fn test_read_timeout_disabled() {
        let mut config = Config::default();
        config.read_timeout_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_print_summary() {
        let config = Config::default();
        // Should not panic
        config.print_summary();
    }
}
