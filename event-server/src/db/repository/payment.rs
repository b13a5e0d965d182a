//! Payment Transaction Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{PaymentStatus, PaymentTransaction, RefundData};
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "payment_transaction";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all payments, newest first
    pub async fn find_all(&self, limit: usize) -> RepoResult<Vec<PaymentTransaction>> {
        let payments: Vec<PaymentTransaction> = self
            .base
            .db()
            .query("SELECT * FROM payment_transaction ORDER BY created_date DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(payments)
    }

    /// Find payment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PaymentTransaction>> {
        let payment: Option<PaymentTransaction> = self.base.db().select(parse_id(TABLE, id)).await?;
        Ok(payment)
    }

    /// Create a pending payment
    pub async fn create(&self, payment: PaymentTransaction) -> RepoResult<PaymentTransaction> {
        let created: Option<PaymentTransaction> =
            self.base.db().create(TABLE).content(payment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    /// Approve a pending payment
    pub async fn approve(&self, id: &str) -> RepoResult<PaymentTransaction> {
        #[derive(Serialize)]
        struct StatusUpdate {
            status: PaymentStatus,
        }

        let updated: Option<PaymentTransaction> = self
            .base
            .db()
            .update(parse_id(TABLE, id))
            .merge(StatusUpdate {
                status: PaymentStatus::Approved,
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Payment {} not found", id)))
    }

    /// Reject a pending payment, recording the refund reason
    pub async fn reject(&self, id: &str, reason: String) -> RepoResult<PaymentTransaction> {
        #[derive(Serialize)]
        struct RejectUpdate {
            status: PaymentStatus,
            refund_data: RefundData,
        }

        let updated: Option<PaymentTransaction> = self
            .base
            .db()
            .update(parse_id(TABLE, id))
            .merge(RejectUpdate {
                status: PaymentStatus::Rejected,
                refund_data: RefundData {
                    refund_date: Utc::now(),
                    refund_reason: reason,
                },
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Payment {} not found", id)))
    }
}
