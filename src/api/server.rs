use crate::api::routes;
use crate::config::SharedConfig;
use crate::gateway::SharedGateway;
use std::future::Future;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub gateway: SharedGateway,
}

/// Bind the HTTP API to [`Config::api_bind_addr`][`crate::config::Config::api_bind_addr`],
/// returning a future that serves requests until `shutdown` resolves.
///
/// # Errors
///
/// Returns a [`hyper::Error`] if the bind address can't be bound.
pub fn new(
    config: SharedConfig,
    gateway: SharedGateway,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> hyper::Result<impl Future<Output = hyper::Result<()>>> {
    let server = axum::Server::try_bind(&config.api_bind_addr)?;
    Ok(server
        .serve(routes::new(AppState { config, gateway }).into_make_service())
        .with_graceful_shutdown(shutdown))
}
