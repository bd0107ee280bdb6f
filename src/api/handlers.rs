use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};

use crate::sync::progress::Progress;

/// Plain-text progress report. Served on `/` and `/update-products`; the
/// keep-alive pinger hits the same route. No auth, no structured payload.
///
/// Scan mode walks an unbounded sequence and never knows a candidate
/// total, so the remaining count is shown only when a total exists.
pub async fn status(progress: web::Data<Arc<Progress>>) -> impl Responder {
    let snap = progress.snapshot();
    let body = if snap.total_candidates == 0 {
        format!(
            "Last attempted ID: {}, Last succeeded ID: {}, Products updated: {}",
            snap.last_attempted_id, snap.last_succeeded_id, snap.updated_count
        )
    } else {
        format!(
            "Last attempted ID: {}, Last succeeded ID: {}, Products left: {}, Products updated: {}",
            snap.last_attempted_id,
            snap.last_succeeded_id,
            snap.remaining(),
            snap.updated_count
        )
    };
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn status_reports_the_current_snapshot() {
        let progress = Arc::new(Progress::new());
        progress.set_total(10);
        progress.record_attempt(500_169);
        progress.record_success(500_168);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(progress))
                .route("/", web::get().to(status))
                .route("/update-products", web::get().to(status)),
        )
        .await;

        for path in ["/", "/update-products"] {
            let req = test::TestRequest::get().uri(path).to_request();
            let body = test::call_and_read_body(&app, req).await;
            let text = std::str::from_utf8(&body).unwrap();
            assert_eq!(
                text,
                "Last attempted ID: 500169, Last succeeded ID: 500168, \
                 Products left: 9, Products updated: 1"
            );
        }
    }

    #[actix_web::test]
    async fn status_omits_the_remaining_count_without_a_total() {
        // Scan mode: no candidate total, so "Products left" would always
        // read 0 and mislead.
        let progress = Arc::new(Progress::new());
        progress.record_attempt(500_169);
        progress.record_success(500_168);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(progress))
                .route("/", web::get().to(status)),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert_eq!(
            text,
            "Last attempted ID: 500169, Last succeeded ID: 500168, Products updated: 1"
        );
    }
}
