//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread con un loop request/response: la conexión queda abierta hasta
//! que el cliente la cierra, llega un request inválido o se sirve un 404.

use crate::compress;
use crate::config::Config;
use crate::http::{Request, Response, StatusCode};
use crate::router::{Resolution, RouteTarget, Router};
use crate::store::{self, FileStore};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

/// Tamaño del buffer de lectura por request
///
/// Cada read debe contener la request line completa; no se reensamblan
/// requests fragmentados (limitación conocida de este servidor).
const READ_CHUNK_SIZE: usize = 1024;

/// Servidor HTTP concurrente de archivos estáticos
pub struct Server {
    config: Config,
    /// Tabla de rutas compartida con los threads de conexión; el RwLock
    /// permite registrar/eliminar rutas mientras se despachan requests
    router: Arc<RwLock<Router>>,
    store: Arc<FileStore>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea un servidor con la configuración indicada
    pub fn new(config: Config) -> Self {
        let store = FileStore::new(config.serve_dir.clone());

        Self {
            config,
            router: Arc::new(RwLock::new(Router::new())),
            store: Arc::new(store),
            listener: None,
        }
    }

    /// Registra una ruta (crea o sobrescribe)
    pub fn add_route(&self, path: &str, target: RouteTarget) {
        self.router.write().unwrap().add_route(path, target);
    }

    /// Elimina una ruta registrada (no-op si no existe)
    pub fn remove_route(&self, path: &str) {
        self.router.write().unwrap().remove_route(path);
    }

    /// Hace bind del listener en la dirección configurada
    ///
    /// Separado de `run` para que los tests puedan bindear el puerto 0
    /// y consultar `local_addr` antes de arrancar el accept loop.
    pub fn bind(&mut self) -> io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);
        self.listener = Some(listener);
        Ok(())
    }

    /// Dirección real del listener (disponible después de `bind`)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Arranca el accept loop (bloquea el thread actual)
    ///
    /// Cada conexión aceptada se atiende en su propio thread; un error en
    /// una conexión nunca detiene el accept loop.
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let Some(listener) = self.listener.as_ref() else {
            return Ok(());
        };

        let read_timeout = match self.config.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    let store = Arc::clone(&self.store);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    println!("[*] Nueva conexión desde {}", peer_addr);

                    thread::spawn(move || {
                        if let Err(e) =
                            Self::handle_connection(stream, router, store, read_timeout)
                        {
                            eprintln!("[!] Error en conexión {}: {}", peer_addr, e);
                        }
                        println!("[*] Conexión {} cerrada", peer_addr);
                    });
                }
                Err(e) => {
                    eprintln!("[!] Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Loop request/response de una conexión
    ///
    /// Estados: esperar request → despachar → (esperar de nuevo | cerrar).
    /// Se cierra la conexión cuando el peer corta (read de 0 bytes), cuando
    /// un request no valida (sin enviar respuesta), cuando la respuesta
    /// lleva `Connection: Closed` (404) o al expirar el timeout de lectura.
    fn handle_connection(
        mut stream: TcpStream,
        router: Arc<RwLock<Router>>,
        store: Arc<FileStore>,
        read_timeout: Option<Duration>,
    ) -> io::Result<()> {
        if read_timeout.is_some() {
            stream.set_read_timeout(read_timeout)?;
        }

        let mut buffer = [0u8; READ_CHUNK_SIZE];

        loop {
            let bytes_read = match stream.read(&mut buffer) {
                Ok(n) => n,
                // Timeout de lectura: conexión inactiva, cerrar sin error
                Err(e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::TimedOut =>
                {
                    break;
                }
                Err(e) => return Err(e),
            };

            if bytes_read == 0 {
                // El peer cerró su extremo
                break;
            }

            let request = match Request::parse(&buffer[..bytes_read]) {
                Ok(request) => request,
                Err(e) => {
                    // Request inválido: se cierra sin responder
                    println!("[!] Request inválido ({}), cerrando", e);
                    break;
                }
            };

            println!("[*] {} {}", request.method().as_str(), request.path());

            let response = Self::dispatch(&request, &router, &store)?;
            stream.write_all(&response.to_bytes())?;
            stream.flush()?;

            println!("[*] → {}", response.status());

            if response.closes_connection() {
                break;
            }
        }

        Ok(())
    }

    /// Resuelve un request validado a su respuesta completa
    ///
    /// El body (archivo, salida del handler, o los mensajes de 404/500)
    /// siempre se comprime antes de enmarcar la respuesta.
    fn dispatch(
        request: &Request,
        router: &RwLock<Router>,
        store: &FileStore,
    ) -> io::Result<Response> {
        let resolution = router.read().unwrap().resolve(request.pathname());

        match resolution {
            Resolution::File(filename) => {
                let content_type = store::content_type(&filename);
                match store.read(&filename)? {
                    Some(data) => {
                        let body = compress::compress(&data)?;
                        Ok(Response::new(StatusCode::Ok, content_type, body))
                    }
                    None => {
                        let body = compress::compress(b"Not Found")?;
                        Ok(Response::new(StatusCode::NotFound, content_type, body))
                    }
                }
            }
            Resolution::Dynamic(handler) => {
                let query = request.query_params();
                match handler(&query) {
                    Ok(bytes) => {
                        let body = compress::compress(&bytes)?;
                        Ok(Response::new(StatusCode::Ok, "text/plain", body))
                    }
                    Err(message) => {
                        // El fallo del handler se contiene en esta respuesta
                        let body = compress::compress(message.as_bytes())?;
                        Ok(Response::new(
                            StatusCode::InternalServerError,
                            "text/plain",
                            body,
                        ))
                    }
                }
            }
        }
    }
}
