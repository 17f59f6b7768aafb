//! Main application run loop

use std::future::Future;
use std::sync::Arc;

use tracing::info;

use crate::app::options::AppOptions;
use crate::authn::session::AuthSession;
use crate::errors::MonitorError;
use crate::http::client::HttpClient;
use crate::http::source::EasyWashSource;
use crate::interpret::tables::LookupTables;
use crate::interpret::Interpreter;
use crate::storage::snapshots::SnapshotStore;
use crate::utils::ServiceClock;
use crate::workers::poller::PollLoop;

/// Run the laundry monitor until `shutdown_signal` resolves
pub async fn run(
    options: AppOptions,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), MonitorError> {
    info!("Initializing laundry monitor...");

    let poll_loop = init(options).await?;
    poll_loop
        .run(|wait| tokio::time::sleep(wait), Box::pin(shutdown_signal))
        .await;

    info!("Laundry monitor stopped");
    Ok(())
}

// =============================== INITIALIZATION ================================== //

async fn init(options: AppOptions) -> Result<PollLoop<EasyWashSource>, MonitorError> {
    options.layout.setup().await?;

    let http_client = Arc::new(HttpClient::new(
        options.api.endpoint.clone(),
        options.api.request_timeout(),
    )?);
    info!(
        "Using endpoint {} (timeout {:?})",
        http_client.endpoint(),
        options.api.request_timeout()
    );

    let session = AuthSession::new(
        http_client.clone(),
        options.credentials,
        options.api.token_settle_delay(),
    );
    let source = EasyWashSource::new(session, http_client, options.api.version.clone());

    let interpreter = Interpreter::new(LookupTables::default(), options.timezone_offset_minutes);
    let store = SnapshotStore::new(options.layout);
    let clock = ServiceClock::new(options.timezone_offset_minutes);

    Ok(PollLoop::new(options.poller, source, interpreter, store, clock))
}
