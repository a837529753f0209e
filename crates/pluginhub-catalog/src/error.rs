//! Catalog error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed registry response: {0}")]
    MalformedResponse(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Display messages ──────────────────────────────────────────────

    #[test]
    fn test_display_status() {
        let err = CatalogError::Status {
            url: "https://packagist.org/p/foo/bar.json".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "registry returned status 404 for https://packagist.org/p/foo/bar.json"
        );
    }

    #[test]
    fn test_display_malformed_response() {
        let err = CatalogError::MalformedResponse("missing packageNames".into());
        assert_eq!(
            err.to_string(),
            "malformed registry response: missing packageNames"
        );
    }

    #[test]
    fn test_display_config() {
        let err = CatalogError::Config("no categories".into());
        assert_eq!(err.to_string(), "configuration error: no categories");
    }

    // ── From conversions ──────────────────────────────────────────────

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(matches!(err, CatalogError::Serialization(_)));
    }

    #[test]
    fn test_from_db_error() {
        let db_err = sea_orm::DbErr::Custom("connection lost".into());
        let err: CatalogError = db_err.into();
        assert!(matches!(err, CatalogError::Database(_)));
        assert!(err.to_string().contains("connection lost"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err: CatalogError = sea_orm::DbErr::Custom("x".into()).into();
        assert!(err.source().is_some());
        let err = CatalogError::Config("x".into());
        assert!(err.source().is_none());
    }
}
