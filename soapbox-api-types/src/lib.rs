mod complaint;
mod user;

pub mod stats;

pub use complaint::{Complaint, ComplaintStatus, ParseValueError, Priority};
pub use user::{Role, UserData};
