use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use fleet_inventory::config::environment::EnvironmentConfig;
use fleet_inventory::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use fleet_inventory::routes;
use fleet_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Fleet Inventory - API de inventario de vehículos");
    info!("==================================================");

    let config = EnvironmentConfig::default();
    let app_state = AppState::new(config.clone());

    // En producción solo se aceptan los orígenes configurados
    let cors = if config.is_production() {
        cors_middleware_with_origins(&config.cors_origins)
    } else {
        cors_middleware()
    };

    // Crear router de la API
    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST   /api/vehicle - Crear vehículo");
    info!("   POST   /api/vehicle/many - Crear vehículos en lote");
    info!("   GET    /api/vehicle - Listar vehículos");
    info!("   GET    /api/vehicle/search - Buscar por dimensiones");
    info!("   GET    /api/vehicle/weight - Filtrar por peso");
    info!("   GET    /api/vehicle/:id - Obtener vehículo");
    info!("   PUT    /api/vehicle/:id - Actualizar vehículo");
    info!("   PUT    /api/vehicle/:id/max-speed - Actualizar velocidad máxima");
    info!("   PUT    /api/vehicle/:id/fuel-type - Actualizar combustible");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("   GET    /api/vehicle/color/:color/year/:year - Buscar por color y año");
    info!("   GET    /api/vehicle/brand/:brand/between/:start/:end - Buscar por marca y rango de años");
    info!("   GET    /api/vehicle/fuel-type/:type - Buscar por combustible");
    info!("   GET    /api/vehicle/transmission/:type - Buscar por transmisión");
    info!("   GET    /api/vehicle/average-speed/brand/:brand - Velocidad promedio por marca");
    info!("   GET    /api/vehicle/average-capacity/brand/:brand - Capacidad promedio por marca");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::anyhow!(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡API de inventario de flota funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "started_at": state.started_at.to_rfc3339(),
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
