pub mod admin;
pub mod auth;
pub mod deliveries;
pub mod me;
pub mod roles;

use axum::{routing::{get, patch, post}, Router};
use crate::db::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/auth/sign-up", post(auth::sign_up))
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/api/auth/session", get(auth::get_session))
        // Roles
        .route("/api/users/{user_id}/role", get(roles::get_user_role))
        // Admin
        .route("/api/admin/stats", get(admin::get_stats))
        .route("/api/admin/customers", get(admin::list_customers).post(admin::add_customer))
        .route("/api/admin/customers/{id}/subscription", patch(admin::update_subscription))
        .route("/api/admin/deliveries", post(admin::schedule_delivery))
        // Delivery partner
        .route("/api/partner/customers", get(deliveries::list_partner_customers))
        .route("/api/customers/{id}/deliveries", get(deliveries::list_customer_deliveries))
        .route("/api/deliveries/{id}/outcome", patch(deliveries::record_outcome))
        // Customer
        .route("/api/me/subscription", get(me::get_my_subscription))
}
