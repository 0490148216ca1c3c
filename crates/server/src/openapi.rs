use axum::Router;
use shared_types::{
    AdminStats, AppError, AppErrorKind, AuthResponse, CreateCustomerRequest, CreateDeliveryRequest,
    Customer, CustomerOverview, CustomerSummary, Delivery, DeliveryOutcome, DeliveryStatus,
    RecordOutcomeRequest, Role, RoleRow, Session, SessionUser, SignInRequest, SignUpRequest,
    SubscriptionPlan, SubscriptionStatus, UpdateSubscriptionRequest,
};
use sqlx::{Pool, Postgres};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
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

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        rest::auth::sign_up,
        rest::auth::sign_in,
        rest::auth::sign_out,
        rest::auth::get_session,
        // Roles
        rest::roles::get_user_role,
        // Admin
        rest::admin::get_stats,
        rest::admin::list_customers,
        rest::admin::add_customer,
        rest::admin::update_subscription,
        rest::admin::schedule_delivery,
        // Deliveries
        rest::deliveries::list_partner_customers,
        rest::deliveries::list_customer_deliveries,
        rest::deliveries::record_outcome,
        // Customers
        rest::me::get_my_subscription,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        Session, SessionUser, SignInRequest, SignUpRequest, AuthResponse,
        Role, RoleRow,
        AdminStats,
        Customer, CustomerSummary, CustomerOverview, CreateCustomerRequest,
        UpdateSubscriptionRequest, SubscriptionPlan, SubscriptionStatus,
        Delivery, DeliveryStatus, DeliveryOutcome, CreateDeliveryRequest, RecordOutcomeRequest,
        health::HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Sign-in, sign-up and sessions"),
        (name = "roles", description = "Dashboard role lookup"),
        (name = "admin", description = "Customer and delivery management"),
        (name = "deliveries", description = "Delivery partner operations"),
        (name = "customers", description = "The signed-in customer's subscription"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "The Fruit Union API",
        description = "Fruit subscription deliveries: customers, schedules and outcomes",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;

/// REST routes, `/health` and the Scalar docs at `/docs`.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    let state = AppState { pool };

    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
