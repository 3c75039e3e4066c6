use chrono::Local;
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue;
use sea_orm::ColumnTrait;
use sea_orm::EntityTrait;
use sea_orm::IntoActiveModel;
use sea_orm::Order;
use sea_orm::QueryFilter;
use sea_orm::QueryOrder;
use sea_orm::Set;
use soapbox_api_types::{Complaint, ComplaintStatus, Priority};
use tracing::info;
use tracing::instrument;

use crate::entity::*;
use crate::SoapboxDb;
use anyhow::Result;

impl SoapboxDb {
    /// Stores a freshly triaged complaint. New complaints always start out
    /// pending regardless of what the submitter would prefer.
    #[instrument(skip(text))]
    pub async fn submit_complaint(
        &self,
        user_id: i32,
        text: &str,
        location: &str,
        category: &str,
        priority: Priority,
    ) -> Result<Complaint> {
        let complaint = complaint::ActiveModel {
            id: ActiveValue::default(),
            text: Set(text.to_string()),
            category: Set(category.to_string()),
            priority: Set(priority.as_str().to_string()),
            status: Set(ComplaintStatus::Pending.as_str().to_string()),
            location: Set(location.to_string()),
            user_id: Set(user_id),
            submitted_at: Set(Local::now().naive_local()),
        }
        .insert(&self.db)
        .await?;
        Ok(Complaint::try_from(complaint)?)
    }

    #[instrument]
    pub async fn complaints_for_user(&self, user_id: i32) -> Result<Vec<Complaint>> {
        let rows = complaint::Entity::find()
            .filter(complaint::Column::UserId.eq(user_id))
            .order_by(complaint::Column::SubmittedAt, Order::Desc)
            .all(&self.db)
            .await?;
        rows.into_iter()
            .map(|row| Ok(Complaint::try_from(row)?))
            .collect()
    }

    #[instrument]
    pub async fn all_complaints(&self) -> Result<Vec<Complaint>> {
        let rows = complaint::Entity::find()
            .order_by(complaint::Column::SubmittedAt, Order::Desc)
            .all(&self.db)
            .await?;
        rows.into_iter()
            .map(|row| Ok(Complaint::try_from(row)?))
            .collect()
    }

    /// Deletes a complaint on behalf of the citizen who filed it. Returns
    /// false when the row is missing or belongs to someone else.
    #[instrument]
    pub async fn delete_complaint_for_user(
        &self,
        complaint_id: i32,
        user_id: i32,
    ) -> Result<bool> {
        let Some(complaint) = complaint::Entity::find_by_id(complaint_id)
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };
        if complaint.user_id != user_id {
            return Ok(false);
        }
        complaint::Entity::delete(complaint.into_active_model())
            .exec(&self.db)
            .await?;
        info!("Deleted complaint {complaint_id}");
        Ok(true)
    }

    /// Moves a complaint to a new workflow state. Unknown ids are ignored.
    #[instrument]
    pub async fn update_complaint_status(
        &self,
        complaint_id: i32,
        status: ComplaintStatus,
    ) -> Result<()> {
        if let Some(complaint) = complaint::Entity::find_by_id(complaint_id)
            .one(&self.db)
            .await?
        {
            let mut complaint = complaint.into_active_model();
            complaint.status = Set(status.as_str().to_string());
            complaint.update(&self.db).await?;
        }
        Ok(())
    }

    /// Operator side cleanup. Only resolved complaints may be removed so the
    /// backlog can't be trimmed by deleting open work.
    #[instrument]
    pub async fn delete_resolved_complaint(&self, complaint_id: i32) -> Result<bool> {
        let Some(complaint) = complaint::Entity::find_by_id(complaint_id)
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };
        if complaint.status != ComplaintStatus::Resolved.as_str() {
            return Ok(false);
        }
        complaint::Entity::delete(complaint.into_active_model())
            .exec(&self.db)
            .await?;
        info!("Deleted resolved complaint {complaint_id}");
        Ok(true)
    }
}
