pub mod config;
pub mod logging;
pub mod error;
pub mod lookup;

pub use config::*;
pub use logging::*;
pub use error::*;
pub use lookup::{lookup, OrderLookup};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.app.mode, AppMode::Lookup);
    }

    #[test]
    fn test_error_handling() {
        let error = PrazosError::missing_column("Fagor", "Número do Pedido");
        assert_eq!(error.error_code(), "MISSING_COLUMN");
        assert_eq!(error.http_status_code(), 500);
        assert!(error.is_processing());

        let error = PrazosError::source_not_found("pedidos.xlsx");
        assert_eq!(error.http_status_code(), 503);
        assert!(!error.is_processing());
    }
}
