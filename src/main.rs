use guestbook::{db, messages, AppState, MessageStore};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let database_url = dotenv::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://tmp/messages.db?mode=rwc".to_owned());
    let port: u16 = dotenv::var("PORT")
        .unwrap_or_else(|_| "8080".to_owned())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let state = AppState {
        store: MessageStore::new(pool),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/messages", messages::router())
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "guestbook listening");
    axum::serve(listener, app).await.expect("server failed");
}
