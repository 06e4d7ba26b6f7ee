use crate::errors::AppError;
use crate::models::DashboardResponse;
use crate::state::AppState;
use crate::stats::build_dashboard;
use crate::ui::render_index;
use axum::{Json, extract::State, response::Html};
use tracing::error;

pub async fn index() -> Html<&'static str> {
    Html(render_index())
}

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = build_dashboard(state.store.as_ref())
        .await
        .map_err(|err| {
            error!("dashboard load failed: {err}");
            AppError::from(err)
        })?;
    Ok(Json(dashboard))
}
