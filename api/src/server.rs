//! HTTP surface for the disease guidance table.

use std::convert::Infallible;
use std::net::SocketAddr;

use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::disease_info::{lookup, DiseaseInfoError, DiseaseInfoRequest, DiseaseInfoResponse};

const MAX_BODY_BYTES: u64 = 16 * 1024;

/// `POST /disease-info` → `{information}` or 404 `{error}`.
pub fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    warp::path("disease-info")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .map(handle_lookup)
        .recover(handle_rejection)
}

fn handle_lookup(request: DiseaseInfoRequest) -> warp::reply::WithStatus<warp::reply::Json> {
    match lookup(&request.disease, request.kind) {
        Ok(information) => {
            log::info!("disease-info hit: {} ({:?})", request.disease, request.kind);
            warp::reply::with_status(
                warp::reply::json(&DiseaseInfoResponse {
                    information: information.to_string(),
                }),
                StatusCode::OK,
            )
        }
        Err(_) => {
            log::info!("disease-info miss: {}", request.disease);
            error_reply("Disease information not found", StatusCode::NOT_FOUND)
        }
    }
}

async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let reply = if rejection.is_not_found() {
        error_reply("Not found", StatusCode::NOT_FOUND)
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_reply("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        error_reply("Request too large", StatusCode::PAYLOAD_TOO_LARGE)
    } else {
        log::warn!("Rejected disease-info request: {rejection:?}");
        error_reply("Failed to process request", StatusCode::BAD_REQUEST)
    };
    Ok(reply)
}

fn error_reply(message: &str, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&DiseaseInfoError {
            error: message.to_string(),
        }),
        status,
    )
}

/// Serve [`routes`] until the process receives Ctrl-C.
pub async fn serve(addr: SocketAddr) {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["POST"])
        .allow_headers(vec!["content-type"]);
    let (bound, server) = warp::serve(routes().with(cors).with(warp::log("leafscan::api")))
        .bind_with_graceful_shutdown(addr, async {
            tokio::signal::ctrl_c().await.ok();
        });
    log::info!("Disease info service listening on http://{bound}");
    server.await;
    log::info!("Disease info service stopped");
}
