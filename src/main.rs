use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use rpm_auto::config::environment::EnvironmentConfig;
use rpm_auto::controllers::auth_controller::ensure_admin_user;
use rpm_auto::database;
use rpm_auto::middleware::cors::cors_from_config;
use rpm_auto::repositories::{MemStorage, PgStorage, Storage};
use rpm_auto::routes::create_api_router;
use rpm_auto::services::{FormspreeMailer, LogMailer, Mailer};
use rpm_auto::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🏁 RPM Auto - Backend del concesionario");
    info!("=======================================");

    // Elegir el almacenamiento según la configuración
    let storage: Arc<dyn Storage> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = database::create_pool(Some(url)).await?;
            database::run_migrations(&pool).await?;
            Arc::new(PgStorage::new(pool))
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurada: usando inventario de demostración en memoria");
            Arc::new(MemStorage::with_sample_data())
        }
    };

    // Usuario administrador inicial
    ensure_admin_user(storage.as_ref(), &config).await?;

    // Relevo de correo para consultas
    let mailer: Arc<dyn Mailer> = match config.formspree_endpoint.clone() {
        Some(endpoint) => {
            info!("📧 Relevo de correo configurado: Formspree");
            Arc::new(FormspreeMailer::new(endpoint))
        }
        None => {
            warn!("⚠️ FORMSPREE_ENDPOINT no configurada: las consultas solo se registran en el log");
            Arc::new(LogMailer)
        }
    };

    let upload_dir = config.upload_dir.clone();
    let cors = cors_from_config(&config.cors_origins);
    let state = AppState::new(storage, mailer, config.clone());

    let app = Router::new()
        .nest("/api", create_api_router())
        .nest_service("/uploads", ServeDir::new(&upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("🚗 Endpoints - Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos (filtros, orden, paginación)");
    info!("   GET  /api/vehicles/featured - Vehículos destacados");
    info!("   GET  /api/vehicles/category/:category - Vehículos por categoría");
    info!("   GET  /api/vehicles/search - Búsqueda de texto");
    info!("   GET  /api/vehicles/filter - Listado con filtros explícitos");
    info!("   GET  /api/vehicles/stats - Estadísticas del inventario");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   GET  /api/vehicles/:id/related - Vehículos relacionados");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   PUT  /api/vehicles/:id/status - Cambiar estado");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("📬 Endpoints - Consultas:");
    info!("   POST /api/inquiries - Crear consulta");
    info!("   GET  /api/inquiries - Listar consultas");
    info!("   GET  /api/inquiries/:id - Obtener consulta");
    info!("   PUT  /api/inquiries/:id/status - Cambiar estado");
    info!("💬 Endpoints - Testimonios:");
    info!("   GET  /api/testimonials - Testimonios aprobados");
    info!("   GET  /api/testimonials/all - Vista de moderación");
    info!("   POST /api/testimonials - Crear testimonio");
    info!("   PUT  /api/testimonials/:id/approve - Aprobar testimonio");
    info!("   DELETE /api/testimonials/:id - Eliminar testimonio");
    info!("🖼️ Endpoints - Imágenes:");
    info!("   POST /api/upload/image - Subir una imagen");
    info!("   POST /api/upload/images - Subir hasta 10 imágenes");
    info!("   GET  /uploads/* - Archivos estáticos");
    info!("🔐 Endpoints - Autenticación:");
    info!("   POST /api/auth/login - Verificar credenciales");
    info!("💰 Endpoints - Financiamiento:");
    info!("   GET  /api/financing/estimate - Estimar pago mensual");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
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
