use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use motomarket::config::environment::EnvironmentConfig;
use motomarket::database::create_pool;
use motomarket::middleware::cors::cors_middleware;
use motomarket::routes;
use motomarket::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🏍️ Two-Wheeler Marketplace API");
    info!("================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let cors = cors_middleware(&config.cors_origins);
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", routes::create_api_router(app_state.clone()))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/v1/auth/register - Registro");
    info!("   POST /api/v1/auth/login - Login");
    info!("   GET  /api/v1/auth/me - Usuario actual");
    info!("   PUT  /api/v1/auth/profile - Actualizar perfil");
    info!("🏍️ Vehicles:");
    info!("   GET  /api/v1/vehicles - Catálogo con filtros");
    info!("   GET  /api/v1/vehicles/search - Búsqueda rápida");
    info!("   GET  /api/v1/vehicles/featured - Destacados");
    info!("   GET  /api/v1/vehicles/brands - Marcas");
    info!("   GET  /api/v1/vehicles/:id - Detalle");
    info!("   POST /api/v1/vehicles - Crear (dealer)");
    info!("📅 Bookings:");
    info!("   POST /api/v1/bookings - Crear reserva");
    info!("   GET  /api/v1/bookings - Mis reservas");
    info!("   GET  /api/v1/bookings/dealer - Reservas del dealer");
    info!("   PUT  /api/v1/bookings/:id/status - Cambiar estado");
    info!("   PUT  /api/v1/bookings/:id/cancel - Cancelar");
    info!("❤️ Favorites: /api/v1/favorites");
    info!("⭐ Reviews: /api/v1/reviews");
    info!("🎫 Support: /api/v1/support/tickets");
    info!("❓ FAQs: /api/v1/faqs");
    info!("💬 Chat: /api/v1/chat/message");
    info!("🛠️ Admin: /api/v1/admin/*");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
