// Painel administrativo: situação das folhas do período corrente.

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, UnitStatus},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

pub fn current_period() -> (i32, i32) {
    let today = Utc::now();
    (today.month() as i32, today.year())
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn summary(&self, organization_id: Uuid) -> Result<DashboardSummary, AppError> {
        let (month, year) = current_period();
        let counts = self.repo.summary_counts(organization_id, month, year).await?;

        // Unidades que nem rascunho têm.
        let pending_sheets =
            (counts.total_units - counts.submitted_sheets - counts.draft_sheets).max(0);

        Ok(DashboardSummary {
            total_units: counts.total_units,
            submitted_sheets: counts.submitted_sheets,
            pending_signature: counts.draft_sheets,
            pending_sheets,
            month,
            year,
        })
    }

    pub async fn units_status(&self, organization_id: Uuid) -> Result<Vec<UnitStatus>, AppError> {
        let (month, year) = current_period();
        let rows = self.repo.unit_status_rows(organization_id, month, year).await?;
        Ok(rows.into_iter().map(UnitStatus::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodo_corrente_e_valido() {
        let (month, year) = current_period();
        assert!((1..=12).contains(&month));
        assert!(year >= 2024);
    }
}
