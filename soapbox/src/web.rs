pub mod error;
pub(crate) mod sessions;
mod static_content;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{middleware, Form, Router};
use axum_extra::extract::cookie::Key;
use maud::Render;
use serde::Deserialize;
use soapbox_api_types::stats::CountBucket;
use soapbox_api_types::Role;
use soapbox_charts::{render_category_chart, Document};
use soapbox_db::SoapboxDb;
use tower_http::trace::TraceLayer;

use self::error::WebError;
use self::sessions::{AuthUser, Citizen, Operator, SessionCache};
use self::templates::page::RenderPage;
use self::templates::pages::{
    client_dashboard::ClientDashboardPage, login_page::LoginPage,
    operator_dashboard::OperatorDashboardPage, signup_page::SignupPage,
};
use crate::classifier::ClassifierService;
use crate::triage;
use crate::web_metrics;

async fn root(user: Option<AuthUser>) -> RenderPage<LoginPage> {
    RenderPage(LoginPage {
        user,
        failed: false,
    })
}

async fn signup_page(user: Option<AuthUser>) -> RenderPage<SignupPage> {
    RenderPage(SignupPage { user })
}

#[derive(Deserialize)]
struct SignupForm {
    username: Option<String>,
    password: Option<String>,
}

async fn signup(
    State(db): State<SoapboxDb>,
    Form(SignupForm { username, password }): Form<SignupForm>,
) -> Result<Redirect, WebError> {
    let username = username.unwrap_or_default();
    let password = password.unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return Err(WebError::MissingCredentials);
    }
    if db.get_user_by_username(&username).await?.is_some() {
        return Err(WebError::UserExists);
    }
    let salt = sessions::generate_salt();
    let hash = sessions::hash_password(&password, &salt);
    db.create_user(&username, hash, salt, Role::Citizen).await?;
    Ok(Redirect::to("/"))
}

async fn client_dashboard(
    State(db): State<SoapboxDb>,
    Citizen(user): Citizen,
) -> Result<RenderPage<ClientDashboardPage>, WebError> {
    let complaints = db.complaints_for_user(user.id).await?;
    Ok(RenderPage(ClientDashboardPage { user, complaints }))
}

#[derive(Deserialize)]
struct ComplaintForm {
    complaint: Option<String>,
    location: Option<String>,
}

/// Submission path: validate, filter spam, triage, classify, store. The
/// redirect afterwards means a refresh never double files.
async fn submit_complaint(
    State(db): State<SoapboxDb>,
    State(classifier): State<Arc<ClassifierService>>,
    Citizen(user): Citizen,
    Form(ComplaintForm {
        complaint,
        location,
    }): Form<ComplaintForm>,
) -> Result<Redirect, WebError> {
    let complaint = complaint.unwrap_or_default();
    let location = location.unwrap_or_default();
    if complaint.is_empty() || location.is_empty() {
        return Err(WebError::MissingComplaintFields);
    }
    if triage::is_spam(&complaint) {
        return Err(WebError::SpamComplaint);
    }
    let category = classifier.classify(&complaint);
    let priority = triage::assign_priority(&complaint);
    db.submit_complaint(user.id, &complaint, &location, &category, priority)
        .await?;
    Ok(Redirect::to("/client_dashboard"))
}

async fn delete_complaint(
    State(db): State<SoapboxDb>,
    Citizen(user): Citizen,
    Path(id): Path<i32>,
) -> Result<Redirect, WebError> {
    if !db.delete_complaint_for_user(id, user.id).await? {
        return Err(WebError::Forbidden);
    }
    Ok(Redirect::to("/client_dashboard"))
}

/// Renders the operator page, then splices the category breakdown chart into
/// its placeholder before the html goes out.
async fn operator_dashboard(
    State(db): State<SoapboxDb>,
    Operator(user): Operator,
) -> Result<Html<String>, WebError> {
    let complaints = db.all_complaints().await?;
    let totals = db.dashboard_totals().await?;
    let categories = db.count_by_category().await?;
    let priorities = db.count_by_priority().await?;
    let statuses = db.count_by_status().await?;
    let (labels, values) = CountBucket::split(&categories);
    let page = RenderPage(OperatorDashboardPage {
        user,
        complaints,
        totals,
        priorities,
        statuses,
    });
    let mut document = Document::new(page.render().0);
    render_category_chart(&mut document, &labels, &values)?;
    Ok(Html(document.into_html()))
}

#[derive(Deserialize)]
struct UpdateStatusForm {
    status: Option<String>,
}

async fn update_status(
    State(db): State<SoapboxDb>,
    Operator(_): Operator,
    Path(id): Path<i32>,
    Form(UpdateStatusForm { status }): Form<UpdateStatusForm>,
) -> Result<Redirect, WebError> {
    // A form without a status picked leaves the complaint as it is.
    if let Some(status) = status {
        db.update_complaint_status(id, status.parse()?).await?;
    }
    Ok(Redirect::to("/operator_dashboard"))
}

async fn operator_delete(
    State(db): State<SoapboxDb>,
    Operator(_): Operator,
    Path(id): Path<i32>,
) -> Result<Redirect, WebError> {
    // Quietly ignores complaints that aren't resolved yet.
    db.delete_resolved_complaint(id).await?;
    Ok(Redirect::to("/operator_dashboard"))
}

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) db: SoapboxDb,
    pub(crate) key: Key,
    pub(crate) user_cache: SessionCache,
    pub(crate) classifier: Arc<ClassifierService>,
}

impl FromRef<WebState> for SoapboxDb {
    fn from_ref(input: &WebState) -> Self {
        input.db.clone()
    }
}

impl FromRef<WebState> for Key {
    fn from_ref(input: &WebState) -> Self {
        input.key.clone()
    }
}

impl FromRef<WebState> for SessionCache {
    fn from_ref(input: &WebState) -> Self {
        input.user_cache.clone()
    }
}

impl FromRef<WebState> for Arc<ClassifierService> {
    fn from_ref(input: &WebState) -> Self {
        input.classifier.clone()
    }
}

pub(crate) async fn start_web(web_state: WebState) {
    let app = Router::new()
        .route("/", get(root).post(sessions::login))
        .route("/signup", get(signup_page).post(signup))
        .route("/client_dashboard", get(client_dashboard).post(submit_complaint))
        .route("/delete_complaint/{id}", get(delete_complaint))
        .route("/operator_dashboard", get(operator_dashboard))
        .route("/update_status/{id}", post(update_status))
        .route("/operator_delete/{id}", get(operator_delete))
        .route("/logout", get(sessions::logout))
        .route("/static/{*path}", get(static_content::static_path))
        .fallback(fallback)
        .route_layer(middleware::from_fn(web_metrics::track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(web_state);

    let port = std::env::var("PORT")
        .map(|p| p.parse::<u16>().ok())
        .ok()
        .flatten()
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
