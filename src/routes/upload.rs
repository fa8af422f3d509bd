use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::upload::requests::{TemplateParams, UploadParams};
use crate::services::UploadService;

static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn upload_file(
    req: HttpRequest,
    query: web::Query<UploadParams>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.import(&req, query.kind, payload).await
}

pub async fn download_template(query: web::Query<TemplateParams>) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.template(query.kind, &query.format).await
}

pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/upload")
            .route("/template", web::get().to(download_template))
            .service(
                web::resource("")
                    .wrap(middlewares::RateLimit::upload())
                    .route(web::post().to(upload_file)),
            ),
    );
}
