pub(crate) mod client_dashboard;
pub(crate) mod login_page;
pub(crate) mod operator_dashboard;
pub(crate) mod signup_page;
