//! # Static Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos estáticos. Lee la
//! configuración (CLI/env), registra las rutas dinámicas de ejemplo y
//! arranca el accept loop.

use static_server::config::Config;
use static_server::http::request::QueryParams;
use static_server::router::RouteTarget;
use static_server::server::Server;

/// Handler de /calculate-area?height=H&width=W
///
/// Calcula el área de un triángulo: height * width / 2
fn calculate_area(query: &QueryParams) -> Result<Vec<u8>, String> {
    let height: f64 = query
        .get("height")
        .ok_or("Missing parameter: height")?
        .parse()
        .map_err(|_| "Parameter height must be a number")?;
    let width: f64 = query
        .get("width")
        .ok_or("Missing parameter: width")?
        .parse()
        .map_err(|_| "Parameter width must be a number")?;

    Ok((height * width / 2.0).to_string().into_bytes())
}

/// Handler de /calculate-next?num=N
///
/// Retorna el entero siguiente: num + 1
fn calculate_next(query: &QueryParams) -> Result<Vec<u8>, String> {
    let num: i64 = query
        .get("num")
        .ok_or("Missing parameter: num")?
        .parse()
        .map_err(|_| "Parameter num must be an integer")?;

    Ok((num + 1).to_string().into_bytes())
}

fn main() {
    println!("=================================");
    println!("  Static Server");
    println!("=================================\n");

    // Crear configuración desde CLI args y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("[!] Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    let mut server = Server::new(config);

    // Rutas dinámicas de ejemplo
    server.add_route("/calculate-area", RouteTarget::Handler(calculate_area));
    server.add_route("/calculate-next", RouteTarget::Handler(calculate_next));

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("[!] Error fatal: {}", e);
        std::process::exit(1);
    }
}
