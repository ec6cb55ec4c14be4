//! Unified page-level error handling.
//!
//! Every page controller returns `Result<T, AppError>`. Details are logged
//! through `tracing`; the user only ever sees [`AppError::user_message`].

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::checkout::CheckoutError;
use crate::services::diagnosis::DiagnosisError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Local store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Diagnosis answers were rejected.
    #[error("Diagnosis error: {0}")]
    Diagnosis(#[from] DiagnosisError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Generic Japanese message safe to show to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Database(_) => "データの読み込みまたは保存に失敗しました",
            Self::Diagnosis(_) => "診断の回答が正しくありません",
            Self::Checkout(CheckoutError::EmptyCart) => "カートが空です",
            Self::Checkout(CheckoutError::InvalidEmail(_)) => {
                "メールアドレスの形式が正しくありません"
            }
            Self::Checkout(CheckoutError::Repository(_)) => "注文の処理に失敗しました",
            Self::Config(_) => "設定の読み込みに失敗しました",
            Self::NotFound(_) => "お探しの商品または注文が見つかりません",
            Self::BadRequest(_) => "入力内容が正しくありません",
        }
    }

    /// Log the error with its details.
    ///
    /// Storage and configuration failures are logged at error level, input
    /// problems at warn.
    pub fn log(&self) {
        if matches!(
            self,
            Self::Database(_) | Self::Config(_) | Self::Checkout(CheckoutError::Repository(_))
        ) {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_details() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "invalid tags column: expected value at line 1".to_owned(),
        ));
        assert!(!err.user_message().contains("tags"));
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn test_checkout_messages() {
        assert_eq!(
            AppError::from(CheckoutError::EmptyCart).user_message(),
            "カートが空です"
        );
        assert_eq!(
            AppError::from(CheckoutError::Repository(RepositoryError::NotFound)).user_message(),
            "注文の処理に失敗しました"
        );
    }
}
