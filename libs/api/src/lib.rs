use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gemini::models::image_generation::IMAGEN_3;
use gemini::models::text_generation::GEMINI_2_5_FLASH;
use gemini::models::video_generation::VEO_2;
use gemini::models::Models;
use profile::ProfileStore;

pub mod healthz;
pub mod not_found;
pub mod profiles;
pub mod proxy;
mod response;

#[derive(Debug)]
pub enum ApiError {
    ClientError(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    gemini: Models,
    profiles: ProfileStore,
    config: Config,
}

/// Workspace `Config.toml` contents.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub gemini: GeminiConfig,
}

/// Provider endpoint and model names. Model names omitted from the
/// config fall back to the current provider defaults.
#[derive(Clone, Debug, Deserialize)]
pub struct GeminiConfig {
    pub base_url: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_video_model")]
    pub video_model: String,
}

fn default_text_model() -> String {
    GEMINI_2_5_FLASH.to_string()
}

fn default_image_model() -> String {
    IMAGEN_3.to_string()
}

fn default_video_model() -> String {
    VEO_2.to_string()
}

pub async fn serve(
    api_key: &str,
    config_name: &str,
    data_dir: &Path,
) -> anyhow::Result<Router> {
    #[derive(OpenApi)]
    #[openapi(paths(
        proxy::generate,
        profiles::get_profiles,
        profiles::post_profile,
    ))]
    struct ApiDoc;

    info!(task = "start api serving");

    let config: Config = util::load_toml(config_name)?;

    let state = ApiState {
        gemini: Models::new(&config.gemini.base_url, api_key),
        profiles: ProfileStore::new(data_dir),
        config,
    };

    Ok(router(state).merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    ))
}

pub fn router(state: ApiState) -> Router {
    let origins = ["http://localhost:3000".parse().unwrap()];

    Router::new()
        .route("/healthz", get(healthz::get_health))
        .route("/api/generate", post(proxy::generate))
        .route(
            "/profiles",
            get(profiles::get_profiles).post(profiles::post_profile),
        )
        .layer(CorsLayer::new().allow_origin(origins))
        .fallback(not_found::get_404)
        .with_state(state)
}

#[cfg(test)]
mod test {
    use gemini::models::image_generation::IMAGEN_3;
    use gemini::models::video_generation::VEO_2;

    use super::Config;

    #[test]
    fn omitted_model_names_fall_back_to_provider_defaults() {
        let config: Config = toml::from_str(
            "[gemini]\n\
             base_url = \"http://localhost:9\"\n\
             text_model = \"custom-text\"\n",
        )
        .unwrap();

        assert_eq!(config.gemini.text_model, "custom-text");
        assert_eq!(config.gemini.image_model, IMAGEN_3);
        assert_eq!(config.gemini.video_model, VEO_2);
    }
}
