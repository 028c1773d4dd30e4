/// Clave de localStorage para el JWT
pub const TOKEN_STORAGE_KEY: &str = "jwt_token";

/// Clave de localStorage para el perfil del usuario (JSON)
pub const USER_STORAGE_KEY: &str = "user_info";

/// Devuelto por el ApiClient cuando el backend rechaza la credencial (401/422)
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Mostrado en el banner de auth tras la redirección por sesión expirada
pub const SESSION_EXPIRED_BANNER: &str = "Session expired. Please log in again.";

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Is the server running?";

pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";

pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from server.";

/// Nombre del fichero de exportación CSV de una tabla del chat
pub const CSV_EXPORT_FILENAME: &str = "export.csv";

/// Modal de imagen de los gráficos del chat
pub const IMAGE_MODAL_ID: &str = "imageModal";
pub const MODAL_IMAGE_ID: &str = "modalImage";
pub const MODAL_DOWNLOAD_LINK_ID: &str = "modalDownloadLink";
