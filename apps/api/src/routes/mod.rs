pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::leads::handlers as leads;
use crate::pages::handlers as pages;
use crate::sitemap::handlers as sitemap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page data
        .route("/api/v1/states", get(pages::handle_list_states))
        .route("/api/v1/states/:state", get(pages::handle_state_hub))
        .route(
            "/api/v1/states/:state/cities",
            get(pages::handle_state_cities),
        )
        .route("/api/v1/cities/:state/:city", get(pages::handle_city_page))
        .route(
            "/api/v1/cities/:state/:city/:service",
            get(pages::handle_service_page),
        )
        .route("/api/v1/services", get(pages::handle_list_services))
        .route("/api/v1/static-params", get(pages::handle_static_params))
        // Forms
        .route("/api/leads", post(leads::handle_submit_lead))
        .route("/api/planner/submit", post(leads::handle_planner_submit))
        // Sitemaps
        .route("/sitemap.xml", get(sitemap::handle_flat_sitemap))
        .route("/sitemap-index.xml", get(sitemap::handle_sitemap_index))
        .route("/sitemaps/:file", get(sitemap::handle_state_sitemap))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback_services;
    use crate::cities::fallback::fallback_cities;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use crate::leads::crm::CrmClient;
    use crate::leads::planner::PlannerRelay;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_app() -> Router {
        build_router(AppState::for_tests(fallback_cities(), fallback_services()))
    }

    /// Both delivery targets configured but pointing at a closed local port.
    fn unreachable_delivery_app() -> Router {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let mut state = AppState::for_tests(fallback_cities(), fallback_services());
        state.crm = CrmClient::new(http.clone(), Some("http://127.0.0.1:9/crm-webhook".to_string()));
        state.planner = PlannerRelay::new(
            http,
            "http://127.0.0.1:9/ajax/".to_string(),
            vec!["sales@example.com".to_string()],
        );
        build_router(state)
    }

    async fn get_path(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get_path(test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "cabling-api");
        assert_eq!(json["cities"], 10);
    }

    #[tokio::test]
    async fn test_lead_enterprise_routing() {
        let response = post_json(
            test_app(),
            "/api/leads",
            json!({
                "firstName": "Dana",
                "lastName": "Reyes",
                "email": "dana@example.com",
                "phone": "404-555-0100",
                "dropCount": "200+",
                "facilityType": "Office",
                "city": "Atlanta",
                "state": "GA"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["routing"]["tag"], "Enterprise_Opp_High_Value");
        assert_eq!(json["routing"]["priority"], "Urgent");
        assert_eq!(json["routing"]["owner"], "Preston_Brown_ID");
        assert!(json["leadId"].is_string());
    }

    #[tokio::test]
    async fn test_lead_missing_fields_is_bad_request() {
        let response = post_json(
            test_app(),
            "/api/leads",
            json!({ "firstName": "Dana", "email": "dana@example.com" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("lastName"));
    }

    #[tokio::test]
    async fn test_lead_malformed_body_is_bad_request() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/leads")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_planner_without_recipients_still_succeeds() {
        let response = post_json(
            test_app(),
            "/api/planner/submit",
            json!({
                "project": { "projectType": "Office fit-out", "services": ["Fiber"] },
                "contact": { "firstName": "Sam", "lastName": "Lee", "email": "sam@example.com" },
                "newsletter": true
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Submission received");
    }

    #[tokio::test]
    async fn test_lead_succeeds_when_crm_is_unreachable() {
        let response = post_json(
            unreachable_delivery_app(),
            "/api/leads",
            json!({
                "firstName": "Dana",
                "lastName": "Reyes",
                "email": "dana@example.com",
                "phone": "404-555-0100",
                "dropCount": "1-10",
                "facilityType": "Office"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["routing"]["tag"], "Small_Business_Lead");
    }

    #[tokio::test]
    async fn test_planner_succeeds_when_relay_is_unreachable() {
        let response = post_json(
            unreachable_delivery_app(),
            "/api/planner/submit",
            json!({
                "project": { "projectType": "Warehouse retrofit" },
                "contact": { "firstName": "Sam", "lastName": "Lee", "email": "sam@example.com" }
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Submission received");
    }

    #[tokio::test]
    async fn test_city_page() {
        let response = get_path(test_app(), "/api/v1/cities/georgia/atlanta-network-cabling").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["city"]["name"], "Atlanta");
        assert_eq!(json["nearbyCities"].as_array().unwrap().len(), 4);
        assert_eq!(json["schema"]["@type"], "ProfessionalService");
        assert!(json.get("mapUrl").is_none());
        assert!(json["content"]["introduction"]
            .as_str()
            .unwrap()
            .contains("Atlanta"));
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let response = get_path(test_app(), "/api/v1/cities/georgia/macon").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_service_page() {
        let response = get_path(
            test_app(),
            "/api/v1/cities/new-york/new-york/fiber-optic-cabling-installation",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["content"]["headline"], "Fiber Optics: New York");
        assert_eq!(json["schema"]["@type"], "Service");
        assert!(json["nearbyCities"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_service_is_not_found() {
        let response = get_path(test_app(), "/api/v1/cities/georgia/atlanta/roofing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_state_hub_accepts_legacy_suffix() {
        let response = get_path(test_app(), "/api/v1/states/georgia-network-cabling").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["abbreviation"], "GA");
        assert_eq!(json["cities"].as_array().unwrap().len(), 5);
        assert_eq!(json["services"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_state_cities_by_population() {
        let response = get_path(test_app(), "/api/v1/states/ga/cities").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names[0], "Atlanta");
        assert_eq!(names.len(), 5);

        let missing = get_path(test_app(), "/api/v1/states/oregon/cities").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_params() {
        let response = get_path(test_app(), "/api/v1/static-params").await;
        let json = body_json(response).await;
        assert_eq!(json["states"].as_array().unwrap().len(), 6);
        assert_eq!(json["services"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_sitemap_index_is_xml() {
        let response = get_path(test_app(), "/sitemap-index.xml").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/xml"
        );
        let xml = body_text(response).await;
        assert_eq!(xml.matches("<sitemap>").count(), 7);
        assert!(xml.contains("<loc>https://jbtech.com/sitemaps/georgia.xml</loc>"));
    }

    #[tokio::test]
    async fn test_state_sitemap() {
        let response = get_path(test_app(), "/sitemaps/georgia.xml").await;
        assert_eq!(response.status(), StatusCode::OK);
        let xml = body_text(response).await;
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains("<loc>https://jbtech.com/georgia/savannah-network-cabling</loc>"));
    }

    #[tokio::test]
    async fn test_unknown_state_sitemap_is_not_found() {
        let response = get_path(test_app(), "/sitemaps/oregon.xml").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Sitemap not found");
    }

    #[tokio::test]
    async fn test_flat_sitemap() {
        let response = get_path(test_app(), "/sitemap.xml").await;
        assert_eq!(response.status(), StatusCode::OK);
        let xml = body_text(response).await;
        assert_eq!(xml.matches("<url>").count(), 1 + 6 + 10);
    }
}
