//! MySQL implementation of the VerificationCodeRepository trait.
//!
//! The replace operation wraps its DELETE and INSERT in a transaction so two
//! concurrent issuers for the same email cannot both leave a "latest" code
//! behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use c2e_core::domain::entities::verification_code::VerificationCode;
use c2e_core::errors::DomainError;
use c2e_core::repositories::VerificationCodeRepository;

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a VerificationCode entity
    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {}", e),
        })?;
        let user_id: Option<String> =
            row.try_get("user_id").map_err(|e| DomainError::Database {
                message: format!("Failed to get user_id: {}", e),
            })?;
        let purpose: String = row.try_get("purpose").map_err(|e| DomainError::Database {
            message: format!("Failed to get purpose: {}", e),
        })?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            user_id: user_id
                .map(|s| Uuid::parse_str(&s))
                .transpose()
                .map_err(|e| DomainError::Database {
                    message: format!("Invalid user_id UUID: {}", e),
                })?,
            email: row.try_get("email").map_err(|e| DomainError::Database {
                message: format!("Failed to get email: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Database {
                message: format!("Failed to get code: {}", e),
            })?,
            purpose: purpose.parse().map_err(|e: String| DomainError::Database {
                message: e,
            })?,
            attempts: row.try_get("attempts").map_err(|e| DomainError::Database {
                message: format!("Failed to get attempts: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            consumed: row.try_get("consumed").map_err(|e| DomainError::Database {
                message: format!("Failed to get consumed: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn replace_for_email(
        &self,
        code: VerificationCode,
    ) -> Result<VerificationCode, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Database {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        sqlx::query("DELETE FROM verification_codes WHERE email = ?")
            .bind(&code.email)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete stale codes: {}", e),
            })?;

        let insert = r#"
            INSERT INTO verification_codes (
                id, user_id, email, code, purpose, attempts,
                created_at, expires_at, consumed
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(insert)
            .bind(code.id.to_string())
            .bind(code.user_id.map(|id| id.to_string()))
            .bind(&code.email)
            .bind(&code.code)
            .bind(code.purpose.as_str())
            .bind(code.attempts)
            .bind(code.created_at)
            .bind(code.expires_at)
            .bind(code.consumed)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to store verification code: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Database {
            message: format!("Failed to commit code replacement: {}", e),
        })?;

        Ok(code)
    }

    async fn find_latest_unconsumed(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = r#"
            SELECT id, user_id, email, code, purpose, attempts,
                   created_at, expires_at, consumed
            FROM verification_codes
            WHERE email = ? AND consumed = FALSE
            ORDER BY created_at DESC, id DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        result.map(|row| Self::row_to_code(&row)).transpose()
    }

    async fn mark_consumed(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE verification_codes SET consumed = TRUE WHERE id = ? AND consumed = FALSE",
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to mark code consumed: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "VerificationCode".to_string(),
            });
        }

        Ok(())
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        sqlx::query("UPDATE verification_codes SET attempts = attempts + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to increment attempts: {}", e),
            })?;

        let row = sqlx::query("SELECT attempts FROM verification_codes WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to read attempts: {}", e),
            })?;

        row.try_get("attempts").map_err(|e| DomainError::Database {
            message: format!("Failed to get attempts: {}", e),
        })
    }

    async fn latest_created_at(
        &self,
        email: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let row = sqlx::query(
            "SELECT MAX(created_at) as latest FROM verification_codes WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Database query failed: {}", e),
        })?;

        row.try_get("latest").map_err(|e| DomainError::Database {
            message: format!("Failed to get latest timestamp: {}", e),
        })
    }

    async fn delete_for_email(&self, email: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete codes: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
