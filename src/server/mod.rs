mod extract;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::API;
use crate::error::Error;
use crate::server::handlers::{admin, bookings, pages, sessions};

pub use extract::CurrentUser;

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/login", post(sessions::login))
        .route("/logout", post(sessions::logout))
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route("/bookings/form", get(bookings::form))
        .route("/bookings/track", get(bookings::track))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/bookings/complete", patch(admin::complete))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server stopped: {}", err);
            crate::error::unexpected_error()
        })
}
