//! Repository for the `denuncia_referrals` table (referrals of a complaint
//! to emergency or specialised services).

use sqlx::PgPool;
use seguridad_core::denuncia::ReferralKind;
use seguridad_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::dispatch::DenunciaReferral;
use crate::repositories::dispatch_order;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, denuncia_id, assignment_order, kind, referred_at, notes, \
                        emergency_service_id, driver_id, created_at, updated_at";

/// Validated insert for the `denuncia_referrals` table.
#[derive(Debug, Clone)]
pub struct NewReferral<'a> {
    pub assignment_order: Option<i32>,
    pub kind: ReferralKind,
    pub referred_at: Timestamp,
    pub notes: Option<&'a str>,
    pub emergency_service_id: Option<DbId>,
    pub driver_id: Option<DbId>,
}

/// Provides operations for complaint referrals.
pub struct DenunciaReferralRepo;

impl DenunciaReferralRepo {
    /// Refer a complaint to another service, auto-assigning the order
    /// position when none is given.
    pub async fn create(
        pool: &PgPool,
        denuncia_id: DbId,
        input: &NewReferral<'_>,
    ) -> Result<DenunciaReferral, DbError> {
        let mut tx = pool.begin().await?;
        let order = dispatch_order::resolve(
            &mut tx,
            "denuncia_referrals",
            denuncia_id,
            input.assignment_order,
        )
        .await?;

        let query = format!(
            "INSERT INTO denuncia_referrals \
                (denuncia_id, assignment_order, kind, referred_at, notes, emergency_service_id, driver_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let referral = sqlx::query_as::<_, DenunciaReferral>(&query)
            .bind(denuncia_id)
            .bind(order)
            .bind(input.kind.as_str())
            .bind(input.referred_at)
            .bind(input.notes)
            .bind(input.emergency_service_id)
            .bind(input.driver_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(referral)
    }

    /// List a complaint's referrals in assignment order.
    pub async fn list_for_denuncia(
        pool: &PgPool,
        denuncia_id: DbId,
    ) -> Result<Vec<DenunciaReferral>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM denuncia_referrals
             WHERE denuncia_id = $1
             ORDER BY assignment_order"
        );
        sqlx::query_as::<_, DenunciaReferral>(&query)
            .bind(denuncia_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a referral belonging to `denuncia_id`.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, denuncia_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM denuncia_referrals WHERE id = $1 AND denuncia_id = $2")
                .bind(id)
                .bind(denuncia_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
