use soapbox_api_types::{Complaint, ParseValueError, UserData};

use crate::entity::{complaint, user};

impl TryFrom<complaint::Model> for Complaint {
    type Error = ParseValueError;

    fn try_from(value: complaint::Model) -> Result<Self, Self::Error> {
        let complaint::Model {
            id,
            text,
            category,
            priority,
            status,
            location,
            user_id,
            submitted_at,
        } = value;
        Ok(Complaint {
            id,
            text,
            category,
            priority: priority.parse()?,
            status: status.parse()?,
            location,
            user_id,
            submitted_at,
        })
    }
}

impl TryFrom<user::Model> for UserData {
    type Error = ParseValueError;

    fn try_from(value: user::Model) -> Result<Self, Self::Error> {
        // password hash and salt stay inside this crate
        let user::Model {
            id,
            username,
            role,
            ..
        } = value;
        Ok(UserData {
            id,
            username,
            role: role.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use soapbox_api_types::{ComplaintStatus, Priority};

    use super::*;

    fn sample_row() -> complaint::Model {
        complaint::Model {
            id: 7,
            text: "water overflow near the park".to_string(),
            category: "Water".to_string(),
            priority: "High".to_string(),
            status: "In Progress".to_string(),
            location: "Ward 3".to_string(),
            user_id: 2,
            submitted_at: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn complaint_row_parses_enums() {
        let complaint = Complaint::try_from(sample_row()).unwrap();
        assert_eq!(complaint.priority, Priority::High);
        assert_eq!(complaint.status, ComplaintStatus::InProgress);
    }

    #[test]
    fn unknown_status_is_an_error() {
        let mut row = sample_row();
        row.status = "Escalated".to_string();
        assert!(Complaint::try_from(row).is_err());
    }
}
