pub mod dashboards;
pub mod handlers;
pub mod routes;
pub mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use shared::format::format_size;

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hyper=warn,reqwest=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Одна строка на запрос: время, длительность, размер тела, статус, метод, путь с query
    fn print_request_line(
        status: axum::http::StatusCode,
        method: &Method,
        uri: &axum::http::Uri,
        elapsed: std::time::Duration,
        size: &str,
    ) {
        // Голубой для 2xx, коричневый для остальных
        let color_code = if status.is_success() { "36" } else { "33" };
        println!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
            color_code,
            chrono::Local::now().format("%H:%M:%S"),
            elapsed.as_millis(),
            size,
            status.as_u16(),
            method,
            uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
        );
    }

    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let (parts, body) = next.run(req).await.into_parts();

        // Тело читается целиком, чтобы залогировать реальный размер
        match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                print_request_line(parts.status, &method, &uri, start.elapsed(), &format_size(bytes.len()));
                Response::from_parts(parts, Body::from(bytes))
            }
            Err(e) => {
                tracing::warn!("Failed to read response body of {}: {}", uri.path(), e);
                print_request_line(parts.status, &method, &uri, start.elapsed(), "error");
                Response::from_parts(parts, Body::default())
            }
        }
    }

    let config = shared::config::initialize()?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let static_dir = shared::config::get_static_dir(config);
    tracing::info!("Serving frontend from {}", static_dir.display());

    let app = routes::configure_routes()
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
