mod classifier;
mod triage;
mod web;
mod web_metrics;

use std::sync::Arc;

use anyhow::Result;
use soapbox_db::SoapboxDb;
use tracing::info;

use crate::classifier::ClassifierService;
use crate::web::sessions;
use crate::web::WebState;

/// Password for the built in operator account. Meant to be changed the first
/// time someone signs in on a real deployment.
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

async fn init_db() -> Result<SoapboxDb> {
    info!("db starting");
    let db = SoapboxDb::connect().await?;
    let salt = sessions::generate_salt();
    let hash = sessions::hash_password(DEFAULT_ADMIN_PASSWORD, &salt);
    db.seed_default_admin("admin", hash, salt).await?;
    info!("DB connected & operator account seeded");
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("Soapbox starting!");
    let classifier = Arc::new(ClassifierService::train_default()?);
    info!("Complaint categories: {:?}", classifier.classes());
    let db = init_db().await?;
    tokio::spawn(web_metrics::start_metrics_server());
    let web_state = WebState {
        db,
        key: sessions::cookie_key(),
        user_cache: sessions::SessionCache::new(),
        classifier,
    };
    web::start_web(web_state).await;
    Ok(())
}
