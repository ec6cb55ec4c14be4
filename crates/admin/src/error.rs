//! Unified error handling for admin.

use thiserror::Error;

use sakaya_core::OrderStatus;
use sakaya_storefront::db::RepositoryError;
use sakaya_storefront::models::InvalidProduct;

use crate::config::ConfigError;

/// Application-level error type for the admin pages.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Email or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No admin session marker is stored.
    #[error("not logged in")]
    NotLoggedIn,

    /// Status change outside pending → shipped / cancelled.
    #[error("cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Product fields out of range.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] InvalidProduct),

    /// Record with this key already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Local store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AdminError {
    /// Generic Japanese message safe to show to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "メールアドレスまたはパスワードが正しくありません。",
            Self::NotLoggedIn => "管理者ログインが必要です",
            Self::InvalidTransition { .. } => "この注文のステータスは変更できません",
            Self::NotFound(_) => "お探しの商品または注文が見つかりません",
            Self::InvalidProduct(_) => "商品情報が正しくありません",
            Self::Conflict(_) => "同じIDの商品が既に存在します",
            Self::Database(_) => "データの読み込みまたは保存に失敗しました",
            Self::Config(_) => "設定の読み込みに失敗しました",
        }
    }

    /// Log the error with its details.
    pub fn log(&self) {
        if matches!(self, Self::Database(_) | Self::Config(_)) {
            tracing::error!(error = %self, "Admin request error");
        } else {
            tracing::warn!(error = %self, "Admin request rejected");
        }
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
