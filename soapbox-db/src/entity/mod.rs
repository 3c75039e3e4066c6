pub mod complaint;
pub mod user;
