use axum::{extract::State, Json};

use profile::ClientProfile;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::ApiState;

/// List saved client profiles
#[utoipa::path(
    get,
    path = "/profiles",
    responses(
        (status = 200, description = "List all saved client profiles")
    )
)]
pub async fn get_profiles(
    State(state): State<ApiState>,
) -> Json<Vec<ClientProfile>> {
    Json(state.profiles.load())
}

/// Save a client profile
#[utoipa::path(
    post,
    path = "/profiles",
    responses(
        (status = 200, description = "Save a profile and return the full list")
    )
)]
pub async fn post_profile(
    State(state): State<ApiState>,
    Json(body): Json<ClientProfile>,
) -> ApiResponse<Json<Vec<ClientProfile>>> {
    let profiles = state.profiles.save(body).server_error("save profile")?;

    Ok(Json(profiles))
}
