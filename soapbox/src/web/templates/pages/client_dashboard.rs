use maud::{html, Markup};
use soapbox_api_types::Complaint;

use crate::web::{
    sessions::AuthUser,
    templates::{
        components::{header::Header, time_since::TimeSince},
        page::Page,
    },
};

pub(crate) struct ClientDashboardPage {
    pub(crate) user: AuthUser,
    pub(crate) complaints: Vec<Complaint>,
}

impl Page for ClientDashboardPage {
    fn get_name(&'_ self) -> String {
        "My complaints".to_string()
    }

    fn draw_body(&self) -> Markup {
        html! {
            (Header {
                user: Some(&self.user),
            })
            div class="container" {
                div class="main-content" {
                    div class="content-well" {
                        span class="content-title" { "File a complaint" }
                        form method="post" action="/client_dashboard" {
                            label for="complaint" { "What's wrong?" }
                            textarea id="complaint" name="complaint" rows="4"
                                placeholder="Describe the issue in a sentence or two" {}
                            label for="location" { "Location" }
                            input type="text" id="location" name="location"
                                placeholder="Street, landmark or sector";
                            input type="submit" class="btn" value="Submit";
                        }
                    }
                    div class="content-well" {
                        span class="content-title" { "Your complaints" }
                        @if self.complaints.is_empty() {
                            span class="empty-note" { "Nothing filed yet." }
                        } @else {
                            table {
                                tr {
                                    th { "Complaint" }
                                    th { "Category" }
                                    th { "Priority" }
                                    th { "Status" }
                                    th { "Location" }
                                    th { "Submitted" }
                                    th { "" }
                                }
                                @for complaint in &self.complaints {
                                    tr {
                                        td { (complaint.text) }
                                        td { (complaint.category) }
                                        td {
                                            span class={"badge priority-" (complaint.priority.as_str().to_lowercase())} {
                                                (complaint.priority)
                                            }
                                        }
                                        td { (complaint.status) }
                                        td { (complaint.location) }
                                        td { (TimeSince(complaint.submitted_at)) }
                                        td {
                                            a class="btn btn-danger" href={"/delete_complaint/" (complaint.id)} {
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
