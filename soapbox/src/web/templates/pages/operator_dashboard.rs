use maud::{html, Markup};
use soapbox_api_types::stats::{CountBucket, DashboardTotals};
use soapbox_api_types::{Complaint, ComplaintStatus};
use soapbox_charts::CHART_ELEMENT_ID;

use crate::web::{
    sessions::AuthUser,
    templates::{
        components::{header::Header, time_since::TimeSince},
        page::Page,
    },
};

/// Operator view over the whole backlog. The category chart div starts out
/// empty; the handler draws the svg into it after the page renders.
pub(crate) struct OperatorDashboardPage {
    pub(crate) user: AuthUser,
    pub(crate) complaints: Vec<Complaint>,
    pub(crate) totals: DashboardTotals,
    pub(crate) priorities: Vec<CountBucket>,
    pub(crate) statuses: Vec<CountBucket>,
}

impl Page for OperatorDashboardPage {
    fn get_name(&'_ self) -> String {
        "Operations".to_string()
    }

    fn draw_body(&self) -> Markup {
        html! {
            (Header {
                user: Some(&self.user),
            })
            div class="container" {
                div class="main-content" {
                    div class="flex-row stat-cards" {
                        (stat_card("Total", self.totals.total))
                        (stat_card("Pending", self.totals.pending))
                        (stat_card("In Progress", self.totals.in_progress))
                        (stat_card("Resolved", self.totals.resolved))
                    }
                    div class="content-well" {
                        span class="content-title" { "Complaints by category" }
                        div id=(CHART_ELEMENT_ID) class="chart" {}
                    }
                    div class="flex-row breakdown-row" {
                        (breakdown_table("By priority", &self.priorities))
                        (breakdown_table("By status", &self.statuses))
                    }
                    div class="content-well" {
                        span class="content-title" { "All complaints" }
                        @if self.complaints.is_empty() {
                            span class="empty-note" { "The backlog is clear." }
                        } @else {
                            table {
                                tr {
                                    th { "Id" }
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
                                        td { (complaint.id) }
                                        td { (complaint.text) }
                                        td { (complaint.category) }
                                        td {
                                            span class={"badge priority-" (complaint.priority.as_str().to_lowercase())} {
                                                (complaint.priority)
                                            }
                                        }
                                        td {
                                            form method="post" action={"/update_status/" (complaint.id)} {
                                                select name="status" {
                                                    @for status in ComplaintStatus::ALL {
                                                        @if status == complaint.status {
                                                            option value=(status) selected { (status) }
                                                        } @else {
                                                            option value=(status) { (status) }
                                                        }
                                                    }
                                                }
                                                input type="submit" class="btn" value="Update";
                                            }
                                        }
                                        td { (complaint.location) }
                                        td { (TimeSince(complaint.submitted_at)) }
                                        td {
                                            @if complaint.status == ComplaintStatus::Resolved {
                                                a class="btn btn-danger" href={"/operator_delete/" (complaint.id)} {
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
}

fn stat_card(label: &str, value: u64) -> Markup {
    html! {
        div class="stat-card" {
            span class="stat-value" { (value) }
            span class="stat-label" { (label) }
        }
    }
}

fn breakdown_table(title: &str, buckets: &[CountBucket]) -> Markup {
    html! {
        div class="content-well breakdown" {
            span class="content-title" { (title) }
            table {
                tr {
                    th { "Label" }
                    th { "Count" }
                }
                @for bucket in buckets {
                    tr {
                        td { (bucket.label) }
                        td { (bucket.count) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use maud::Render;
    use soapbox_api_types::{Priority, Role};
    use soapbox_charts::{render_category_chart, Document};

    use super::*;
    use crate::web::templates::page::RenderPage;

    fn operator() -> AuthUser {
        AuthUser {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    fn complaint(id: i32, status: ComplaintStatus) -> Complaint {
        Complaint {
            id,
            text: "Overflowing garbage bin near the market".to_string(),
            category: "Garbage".to_string(),
            priority: Priority::High,
            status,
            location: "Market square".to_string(),
            user_id: 7,
            submitted_at: Local::now().naive_local(),
        }
    }

    fn page() -> OperatorDashboardPage {
        OperatorDashboardPage {
            user: operator(),
            complaints: vec![
                complaint(1, ComplaintStatus::Pending),
                complaint(2, ComplaintStatus::Resolved),
            ],
            totals: DashboardTotals {
                total: 2,
                pending: 1,
                in_progress: 0,
                resolved: 1,
            },
            priorities: vec![CountBucket {
                label: "High".to_string(),
                count: 2,
            }],
            statuses: vec![
                CountBucket {
                    label: "Pending".to_string(),
                    count: 1,
                },
                CountBucket {
                    label: "Resolved".to_string(),
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn renders_the_chart_placeholder() {
        let html = RenderPage(page()).render().0;
        assert!(html.contains(" id=\"categoryChart\""));
    }

    #[test]
    fn delete_only_offered_for_resolved_complaints() {
        let html = RenderPage(page()).render().0;
        assert!(!html.contains("/operator_delete/1"));
        assert!(html.contains("/operator_delete/2"));
    }

    #[test]
    fn chart_splices_into_the_rendered_page() {
        let html = RenderPage(page()).render().0;
        let mut document = Document::new(html);
        let labels = vec!["Garbage".to_string(), "Water".to_string()];
        let values = vec![2, 1];
        render_category_chart(&mut document, &labels, &values).unwrap();
        let chart = document
            .element_by_id(CHART_ELEMENT_ID)
            .expect("placeholder still present");
        assert!(chart.inner_html().contains("<svg"));
    }
}
