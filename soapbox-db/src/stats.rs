use sea_orm::ColumnTrait;
use sea_orm::EntityTrait;
use sea_orm::FromQueryResult;
use sea_orm::PaginatorTrait;
use sea_orm::QueryFilter;
use sea_orm::QueryOrder;
use sea_orm::QuerySelect;
use soapbox_api_types::stats::{CountBucket, DashboardTotals};
use soapbox_api_types::ComplaintStatus;
use tracing::instrument;

use crate::entity::*;
use crate::SoapboxDb;
use anyhow::Result;

#[derive(Debug, FromQueryResult)]
struct RawBucket {
    label: String,
    count: i64,
}

impl SoapboxDb {
    /// Complaint counts per category, ordered by category name so charts and
    /// tables come out stable between refreshes.
    #[instrument]
    pub async fn count_by_category(&self) -> Result<Vec<CountBucket>> {
        self.count_grouped_by(complaint::Column::Category).await
    }

    #[instrument]
    pub async fn count_by_priority(&self) -> Result<Vec<CountBucket>> {
        self.count_grouped_by(complaint::Column::Priority).await
    }

    #[instrument]
    pub async fn count_by_status(&self) -> Result<Vec<CountBucket>> {
        self.count_grouped_by(complaint::Column::Status).await
    }

    async fn count_grouped_by(&self, column: complaint::Column) -> Result<Vec<CountBucket>> {
        let buckets = complaint::Entity::find()
            .select_only()
            .column_as(column, "label")
            .column_as(complaint::Column::Id.count(), "count")
            .group_by(column)
            .order_by_asc(column)
            .into_model::<RawBucket>()
            .all(&self.db)
            .await?;
        Ok(buckets
            .into_iter()
            .map(|RawBucket { label, count }| CountBucket { label, count })
            .collect())
    }

    /// Headline numbers for the operator dashboard cards.
    #[instrument]
    pub async fn dashboard_totals(&self) -> Result<DashboardTotals> {
        let total = complaint::Entity::find().count(&self.db).await?;
        let pending = self.count_with_status(ComplaintStatus::Pending).await?;
        let in_progress = self.count_with_status(ComplaintStatus::InProgress).await?;
        let resolved = self.count_with_status(ComplaintStatus::Resolved).await?;
        Ok(DashboardTotals {
            total,
            pending,
            in_progress,
            resolved,
        })
    }

    async fn count_with_status(&self, status: ComplaintStatus) -> Result<u64> {
        Ok(complaint::Entity::find()
            .filter(complaint::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await?)
    }
}
