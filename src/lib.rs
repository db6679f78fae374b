pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod error;
pub mod notification;
mod routes;
mod state;
pub mod telemetry;

use axum::{routing::IntoMakeService, Router, Server};
use configuration::Settings;
use email_client::{MailTransport, SmtpEmailClient};
use hyper::server::conn::AddrIncoming;
use notification::{MembershipNotifier, TemplateRenderer};
use state::AppState;
use std::{net::TcpListener, sync::Arc};

type AppServer = Server<AddrIncoming, IntoMakeService<Router>>;

pub struct App {
    port: u16,
    server: AppServer,
}

impl App {
    /// Build the app from `settings`, delivering emails through the
    /// configured SMTP relay.
    pub fn build(settings: &Settings) -> anyhow::Result<Self> {
        let email_client = SmtpEmailClient::new(settings.email_client().clone());
        Self::build_with_transport(settings, Arc::new(email_client))
    }

    /// Build the app with the given mail transport.
    pub fn build_with_transport(
        settings: &Settings,
        transport: Arc<dyn MailTransport>,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(settings.application().address())?;
        let port = listener.local_addr()?.port();

        let notifier = MembershipNotifier::new(
            transport,
            TemplateRenderer::new()?,
            settings.membership().internal_recipients().clone(),
            settings.membership().send_timeout(),
        );
        let app_state = AppState::create(notifier);
        let router = Self::build_router(&app_state);

        tracing::info!("Server running at {}", listener.local_addr()?);
        let server = Server::from_tcp(listener)?.serve(router.into_make_service());

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        self.server.await?;
        Ok(())
    }

    /// Build the router for the application.
    fn build_router(app_state: &AppState) -> Router {
        use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
        use tracing::Level;

        routes::build_router(app_state).layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
    }
}
