pub mod config;
pub mod error;
pub mod notify;
pub mod obfuscate_errors;
pub mod panic_handler;
pub mod registration;
pub mod routes;
pub mod shared_state;
pub mod store;
pub mod telegram_bot;
pub mod tracing_config;

pub use error::Error;

use axum::{
    http::{header, Method},
    routing::IntoMakeService,
    Extension, Router,
};
use hyper::server::conn::AddrIncoming;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{event, Level};

use crate::{
    config::Config,
    notify::{notifiers_from_config, TelegramClient},
    shared_state::{AppState, InnerState},
    store::RegistrationStore,
    telegram_bot::TelegramBot,
};

pub struct Server {
    pub host: String,
    pub port: u16,
    pub server: axum::Server<AddrIncoming, IntoMakeService<Router>>,
    bot: Option<TelegramBot>,
}

impl Server {
    /// Serve until Ctrl-C, then stop the Telegram bot if it is running.
    pub async fn run(self) -> Result<(), Error> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let bot = self.bot.map(|bot| tokio::spawn(bot.run(shutdown_rx)));

        let result = self
            .server
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
                event!(Level::INFO, "Shutting down");
            })
            .await;

        shutdown_tx.send(true).ok();
        if let Some(bot) = bot {
            bot.await.ok();
        }

        result.map_err(Error::from)
    }
}

/// The application router with the global middleware stack applied.
pub fn build_app(state: AppState, production: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(300));

    // Each `Router::layer` call wraps the previous stack back into a boxed route,
    // so the last layer added runs first. CORS needs to see the router's own
    // response body, so it goes on first.
    routes::configure_routes(Router::new())
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO)),
                )
                .layer(Extension(state))
                .into_inner(),
        )
        .layer(axum::middleware::from_fn_with_state(
            production,
            obfuscate_errors::obfuscate_errors,
        ))
        .layer(
            // Global middlewares
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .propagate_x_request_id()
                .layer(CatchPanicLayer::custom(move |err| {
                    panic_handler::handle_panic(production, err)
                }))
                .into_inner(),
        )
}

/// Bind the HTTP listener. Port 0 picks a free port, which is reported back in
/// the returned `Server`.
pub fn bind_server(
    state: AppState,
    production: bool,
    host: &str,
    port: u16,
) -> Result<Server, anyhow::Error> {
    let app = build_app(state, production);

    let bind_ip: IpAddr = host.parse()?;
    let addr = SocketAddr::from((bind_ip, port));
    let server = axum::Server::try_bind(&addr)?.serve(app.into_make_service());
    let port = server.local_addr().port();
    event!(Level::INFO, "Listening on {}:{}", host, port);

    Ok(Server {
        host: host.to_string(),
        port,
        server,
        bot: None,
    })
}

pub async fn create_server(config: Config) -> Result<Server, Error> {
    let production = config.production();

    let pool = aktel_db::connect(&config.database_url()?, config.db_max_connections())?;
    aktel_db::run_migrations(&pool).await?;
    let store: Arc<dyn RegistrationStore> = Arc::new(pool);

    let http = reqwest::Client::new();
    let notifiers = notifiers_from_config(&config, &http);

    let bot = match (&config.telegram_token, config.telegram_polling) {
        (Some(token), true) => Some(TelegramBot::new(
            TelegramClient::new(http.clone(), &config.telegram_api_url, token.clone()),
            store.clone(),
        )),
        _ => None,
    };

    let state = Arc::new(InnerState {
        production,
        store,
        notifiers,
        tournament_id: config.tournament_id,
    });

    let mut server = bind_server(state, production, &config.host, config.port)?;
    server.bot = bot;
    Ok(server)
}
