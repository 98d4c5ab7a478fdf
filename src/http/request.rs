//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Este módulo valida la request line de un request HTTP/1.1 y extrae el
//! path pedido. El resto del request (headers, body) no se inspecciona.
//!
//! ## Formato aceptado
//!
//! ```text
//! GET /path?param1=value1&param2=value2 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! La request line debe tener exactamente 3 tokens separados por un espacio:
//! método `GET`, path que empieza con `/` y versión `HTTP/1.1`. Cualquier
//! otra forma se rechaza y el servidor cierra la conexión sin responder.

use std::collections::HashMap;

/// Mapa de query parameters (nombre → valor ya decodificado)
pub type QueryParams = HashMap<String, String>;

/// Métodos HTTP soportados
///
/// El servidor solo atiende GET; cualquier otro método se rechaza en el
/// parsing aunque la request line tenga forma válida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,
}

impl Method {
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

/// Representa un request HTTP validado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (solo GET)
    method: Method,

    /// Path tal cual llegó en la request line, query string incluido
    /// (ej: "/calculate-next?num=4")
    path: String,

    /// Versión HTTP (siempre "HTTP/1.1")
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// El request no es texto UTF-8 válido
    InvalidEncoding,

    /// La request line no tiene exactamente 3 tokens
    InvalidRequestLine,

    /// Método HTTP no soportado (solo se acepta GET)
    UnsupportedMethod(String),

    /// El path no empieza con '/'
    InvalidPath(String),

    /// Versión HTTP incorrecta (debe ser HTTP/1.1)
    InvalidHttpVersion(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidEncoding => write!(f, "Request is not valid UTF-8"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::InvalidPath(p) => write!(f, "Invalid request path: {}", p),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea y valida un request HTTP desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Bytes leídos de la conexión (se asume que contienen la
    ///   request line completa)
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request line válida
    /// * `Err(ParseError)` - Request inválido; el caller debe cerrar la conexión
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_server::http::Request;
    ///
    /// let raw = b"GET /calculate-next?num=4 HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/calculate-next?num=4");
    /// assert_eq!(request.pathname(), "/calculate-next");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str =
            std::str::from_utf8(buffer).map_err(|_| ParseError::InvalidEncoding)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // La primera línea (hasta el primer \r\n) es la request line
        let request_line = request_str.split("\r\n").next().unwrap_or("");

        let (method, path, version) = Self::parse_request_line(request_line)?;

        Ok(Request {
            method,
            path,
            version,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path?query HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;

        if !parts[1].starts_with('/') {
            return Err(ParseError::InvalidPath(parts[1].to_string()));
        }
        let path = parts[1].to_string();

        let version = parts[2].to_string();
        if version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, path, version))
    }

    /// Parsea una query string en un mapa de parámetros
    ///
    /// Ejemplo: "num=10&text=hello%20world"
    /// Retorna: {"num": "10", "text": "hello world"}
    fn parse_query_string(query: &str) -> QueryParams {
        let mut params = HashMap::new();

        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }

            if let Some(eq_pos) = param.find('=') {
                let key = &param[..eq_pos];
                let value = &param[eq_pos + 1..];
                params.insert(key.to_string(), Self::url_decode(value));
            } else {
                // Parámetro sin valor (ej: "?debug")
                params.insert(param.to_string(), String::new());
            }
        }

        params
    }

    /// Decodifica un valor URL-encoded: escapes `%XX` y `+` como espacio
    fn url_decode(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'%' if i + 2 < bytes.len() => {
                    let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                    if let Ok(byte) = u8::from_str_radix(hex, 16) {
                        decoded.push(byte);
                        i += 3;
                    } else {
                        // Escape inválido: se conserva el '%' literal
                        decoded.push(b'%');
                        i += 1;
                    }
                }
                b'+' => {
                    decoded.push(b' ');
                    i += 1;
                }
                byte => {
                    decoded.push(byte);
                    i += 1;
                }
            }
        }

        String::from_utf8_lossy(&decoded).into_owned()
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path verbatim de la request line, query string incluido
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene el path sin el sufijo `?query` (para el route lookup)
    pub fn pathname(&self) -> &str {
        match self.path.find('?') {
            Some(pos) => &self.path[..pos],
            None => &self.path,
        }
    }

    /// Parsea los query parameters del path
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::Request;
    ///
    /// let raw = b"GET /test?num=42&text=hello+world HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    /// let params = request.query_params();
    ///
    /// assert_eq!(params.get("num").map(|s| s.as_str()), Some("42"));
    /// assert_eq!(params.get("text").map(|s| s.as_str()), Some("hello world"));
    /// ```
    pub fn query_params(&self) -> QueryParams {
        match self.path.find('?') {
            Some(pos) => Self::parse_query_string(&self.path[pos + 1..]),
            None => HashMap::new(),
        }
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }
}
