//! draft-kit server binary.
//!
//! Serves the lobby HTTP/WebSocket API. Card data is supplied by an
//! in-memory catalog; real deployments substitute their own `SetCatalog`
//! without touching the hosting or engine crates.

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use clap::Parser;
use dk_config::InMemoryCatalog;
use dk_hosting::Lobby;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "dk-server", about = "draft-kit room hosting server")]
struct Args {
    /// Address to bind the HTTP/WebSocket server to.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,
    /// Address for the raw framed-TCP fallback transport. Unset disables it.
    #[arg(long)]
    tcp_bind: Option<String>,
    /// Receive-inactivity window for the raw-TCP transport, 0 disables it.
    #[arg(long, default_value_t = dk_core::DEFAULT_WATCHDOG_MILLIS)]
    watchdog_ms: u64,
    /// Probability that a rare-or-mythic composite slot resolves to Mythic.
    #[arg(long, default_value_t = dk_core::DEFAULT_MYTHIC_RARE_PROBABILITY)]
    mythic_rare_probability: f64,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dk_core::init_logging();
    let args = Args::parse();

    let catalog: Arc<dyn dk_config::SetCatalog + Send + Sync> = Arc::new(InMemoryCatalog::new());
    let lobby = web::Data::new(Lobby::new(catalog, args.mythic_rare_probability));

    if let Some(tcp_bind) = args.tcp_bind.clone() {
        let lobby = lobby.clone().into_inner();
        let watchdog_ms = args.watchdog_ms;
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(&tcp_bind).await {
                Ok(listener) => {
                    log::info!("raw-tcp transport listening on {tcp_bind}");
                    dk_hosting::accept_loop(lobby, listener, watchdog_ms).await;
                }
                Err(e) => log::error!("failed to bind raw-tcp transport on {tcp_bind}: {e}"),
            }
        });
    }

    log::info!("starting draft-kit server on {}", args.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
            .app_data(lobby.clone())
            .route("/health", web::get().to(dk_hosting::handlers::health))
            .service(
                web::scope("/room")
                    .route("/start", web::post().to(dk_hosting::handlers::start))
                    .route("/enter/{room_id}", web::get().to(dk_hosting::handlers::enter))
                    .route("/leave/{room_id}", web::post().to(dk_hosting::handlers::leave)),
            )
    })
    .bind(&args.bind)?
    .run()
    .await
}
