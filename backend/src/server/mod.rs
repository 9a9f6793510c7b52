//! Server wiring: configuration, adapter construction, and route layout.

pub mod settings;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use crate::domain::ports::{LeadNotifier, LeadStore, Mailer};
use crate::domain::{DispatchService, IntakeService};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{bookings, health, leads, notify};
use crate::outbound::email::ResendMailer;
use crate::outbound::persistence::{MemoryLeadStore, RestLeadStore, RestLeadStoreBuildError};
use crate::server::settings::ServerSettings;

/// Failures while constructing the adapter graph.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    /// A store URL was configured without a credential.
    #[error("PORTAL_STORE_URL is set but PORTAL_STORE_API_KEY is missing")]
    MissingStoreKey,
    /// The hosted store adapter could not be constructed.
    #[error(transparent)]
    Store(#[from] RestLeadStoreBuildError),
    /// The mailer adapter could not be constructed.
    #[error("failed to build mailer: {0}")]
    Mailer(#[from] reqwest::Error),
}

fn build_store(settings: &ServerSettings) -> Result<Arc<dyn LeadStore>, StateBuildError> {
    match (&settings.store_url, &settings.store_api_key) {
        (Some(url), Some(key)) => {
            info!(store = %url, "using hosted lead store");
            Ok(Arc::new(RestLeadStore::new(
                url,
                key.clone(),
                Arc::new(DefaultClock),
            )?))
        }
        (Some(_), None) => Err(StateBuildError::MissingStoreKey),
        (None, _) => {
            warn!("no store configured; leads are held in memory and lost on restart");
            Ok(Arc::new(MemoryLeadStore::new(Arc::new(DefaultClock))))
        }
    }
}

fn build_mailer(settings: &ServerSettings) -> Result<Option<Arc<dyn Mailer>>, StateBuildError> {
    match &settings.resend_api_key {
        Some(key) => Ok(Some(Arc::new(ResendMailer::new(key.clone())?))),
        None => {
            info!("no email credential configured; notifications will be logged skips");
            Ok(None)
        }
    }
}

/// Construct the HTTP state from configuration.
///
/// # Errors
///
/// Returns an error when an adapter cannot be constructed from the
/// configured values.
pub fn build_state(settings: &ServerSettings) -> Result<HttpState, StateBuildError> {
    let store = build_store(settings)?;
    let mailer = build_mailer(settings)?;

    let mut dispatch = DispatchService::new(Arc::clone(&store), mailer);
    if let Some(admin_email) = &settings.admin_email {
        dispatch = dispatch.with_admin_email(admin_email.clone());
    }
    let notifier: Arc<dyn LeadNotifier> = Arc::new(dispatch);
    let intake = Arc::new(IntakeService::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
    ));

    Ok(HttpState::new(intake, store, notifier))
}

/// Register every route on a service config.
///
/// Kept separate from `App` construction so integration tests can mount the
/// identical surface on a test service.
pub fn configure_api(
    cfg: &mut web::ServiceConfig,
    state: HttpState,
    health_state: web::Data<HealthState>,
) {
    cfg.app_data(web::Data::new(state))
        .app_data(health_state)
        .service(
            web::scope("/api/v1")
                .service(bookings::submit_booking)
                .service(leads::list_leads)
                .service(leads::update_lead)
                .service(leads::delete_lead),
        )
        .service(
            web::scope("/functions")
                .service(notify::notify_preflight)
                .service(notify::notify_new_lead),
        )
        .service(health::ready)
        .service(health::live);
}
