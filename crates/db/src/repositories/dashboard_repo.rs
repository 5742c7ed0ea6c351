//! Read-only aggregate queries behind the admin pages.

use sqlx::PgPool;
use seguridad_core::status::{DenunciaStatus, RequestStatus, ResourceStatus};

use crate::models::dashboard::{DashboardCounts, DenunciaStatusCount, RequerimientoUsage};

/// Number of rows returned by [`DashboardRepo::top_requerimientos`].
const TOP_REQUERIMIENTOS: i64 = 10;

/// Provides aggregate reads for the admin dashboard.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts across the whole system.
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM users WHERE is_active) AS active_users,
                (SELECT COUNT(*) FROM ciudadanos) AS ciudadanos,
                (SELECT COUNT(*) FROM familias) AS familias,
                (SELECT COUNT(*) FROM grupos) AS grupos,
                (SELECT COUNT(*) FROM subgrupos) AS subgrupos,
                (SELECT COUNT(*) FROM requerimientos) AS requerimientos,
                (SELECT COUNT(*) FROM denuncias) AS denuncias,
                (SELECT COUNT(*) FROM denuncias WHERE status_id IN ($1, $2)) AS open_denuncias,
                (SELECT COUNT(*) FROM vehicles WHERE status_id = $3) AS vehicles_available,
                (SELECT COUNT(*) FROM radios WHERE status_id = $3) AS radios_available,
                (SELECT COUNT(*) FROM citizen_requests WHERE status_id = $4)
                  + (SELECT COUNT(*) FROM worker_requests WHERE status_id = $4) AS pending_requests",
        )
        .bind(DenunciaStatus::Received.id())
        .bind(DenunciaStatus::InProgress.id())
        .bind(ResourceStatus::Available.id())
        .bind(RequestStatus::Pending.id())
        .fetch_one(pool)
        .await
    }

    /// Complaint count per status, including statuses with no complaints.
    pub async fn denuncias_by_status(
        pool: &PgPool,
    ) -> Result<Vec<DenunciaStatusCount>, sqlx::Error> {
        sqlx::query_as::<_, DenunciaStatusCount>(
            "SELECT s.id AS status_id, s.name, COUNT(d.id) AS count
             FROM denuncia_statuses s
             LEFT JOIN denuncias d ON d.status_id = s.id
             GROUP BY s.id, s.name
             ORDER BY s.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Requerimientos with the most complaints filed under them.
    pub async fn top_requerimientos(
        pool: &PgPool,
    ) -> Result<Vec<RequerimientoUsage>, sqlx::Error> {
        sqlx::query_as::<_, RequerimientoUsage>(
            "SELECT r.id AS requerimiento_id, r.code, r.name, COUNT(d.id) AS count
             FROM requerimientos r
             JOIN denuncias d ON d.requerimiento_id = r.id
             GROUP BY r.id, r.code, r.name
             ORDER BY count DESC, r.code
             LIMIT $1",
        )
        .bind(TOP_REQUERIMIENTOS)
        .fetch_all(pool)
        .await
    }
}
