// ============================================================================
// ERRORES INTERNOS - Transporte y almacenamiento
// ============================================================================
// Nunca cruzan el ApiClient: allí se convierten en la respuesta uniforme
// {success: false, error: "..."}
// ============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// La petición no llegó al servidor (red caída, CORS, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// No se pudo construir la petición (body, headers)
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// El cuerpo de la respuesta no es JSON válido
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// localStorage no disponible o lleno
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = ClientError::Storage("QuotaExceededError".to_string());
        assert_eq!(err.to_string(), "Storage error: QuotaExceededError");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
