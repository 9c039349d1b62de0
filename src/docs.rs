use crate::common::upload::UploadKind;
use crate::common::video::Embed;
use crate::modules::auth::dto::{AdminResponse, LoginRequest, LoginResponse};
use crate::modules::dashboard::dto::DashboardStats;
use crate::modules::genre::dto::GenreCount;
use crate::modules::movie::dto::{MovieDetailResponse, MovieFields, MovieWriteResponse};
use crate::modules::movie::model::Movie;
use crate::modules::trailer::dto::{EmbedResponse, TrailerFields};
use crate::modules::trailer::model::Trailer;
use crate::modules::upload::dto::{UploadFailure, UploadResponse};
use crate::routes::HealthStatus;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::modules::auth::handler::login,
        crate::modules::auth::handler::logout,
        crate::modules::auth::handler::me,
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::delete_movie,
        crate::modules::trailer::handler::list_movie_trailers,
        crate::modules::trailer::handler::get_trailer,
        crate::modules::trailer::handler::get_trailer_embed,
        crate::modules::trailer::handler::create_trailer,
        crate::modules::trailer::handler::delete_trailer,
        crate::modules::genre::handler::list_genres,
        crate::modules::dashboard::handler::dashboard,
        crate::modules::upload::handler::upload_file,
    ),
    components(
        schemas(
            HealthStatus,
            LoginRequest, LoginResponse, AdminResponse,
            Movie, MovieFields, MovieWriteResponse, MovieDetailResponse,
            Trailer, TrailerFields, EmbedResponse, Embed,
            GenreCount, DashboardStats,
            UploadKind, UploadResponse, UploadFailure,
        )
    ),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Auth", description = "Admin sessions"),
        (name = "Movies", description = "Public movie catalog"),
        (name = "Trailers", description = "Public trailer catalog"),
        (name = "Admin", description = "Back-office management and uploads")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    crate::modules::auth::handler::SESSION_COOKIE,
                ))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
