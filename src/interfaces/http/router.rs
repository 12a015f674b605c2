//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{
    BillingLedger, FrontDeskService, SharedRoomInventoryIndex,
};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{front_desk, health, metrics, reservations, rooms};

use front_desk::FrontDeskAppState;
use health::HealthState;
use metrics::MetricsState;
use reservations::ReservationAppState;
use rooms::RoomAppState;

/// Unified state for every /api/v1 route. Axum extracts the specific
/// handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub front_desk: Arc<FrontDeskService>,
    pub billing: Arc<BillingLedger>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for FrontDeskAppState {
    fn from_ref(s: &ApiState) -> Self {
        FrontDeskAppState {
            service: Arc::clone(&s.front_desk),
        }
    }
}

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            repos: Arc::clone(&s.repos),
            front_desk: Arc::clone(&s.front_desk),
            billing: Arc::clone(&s.billing),
        }
    }
}

impl FromRef<ApiState> for RoomAppState {
    fn from_ref(s: &ApiState) -> Self {
        RoomAppState {
            repos: Arc::clone(&s.repos),
            front_desk: Arc::clone(&s.front_desk),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Front desk
        front_desk::handlers::check_in,
        front_desk::handlers::check_out,
        front_desk::handlers::express_check_out,
        front_desk::handlers::transfer_room,
        front_desk::handlers::apply_stay_adjustment,
        // Reservations
        reservations::handlers::create_reservation,
        reservations::handlers::list_reservations,
        reservations::handlers::get_reservation,
        reservations::handlers::get_reservation_by_confirmation,
        reservations::handlers::cancel_reservation,
        reservations::handlers::get_ledger,
        reservations::handlers::append_ledger_entry,
        // Rooms
        rooms::handlers::list_rooms,
        rooms::handlers::available_rooms,
        rooms::handlers::create_room,
        rooms::handlers::update_room_status,
        rooms::handlers::list_room_types,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
            // Front desk
            front_desk::dto::CheckInRequest,
            front_desk::dto::CheckOutRequest,
            front_desk::dto::TransferRoomRequest,
            front_desk::dto::StayAdjustmentRequest,
            // Reservations
            reservations::dto::CreateReservationRequest,
            reservations::dto::CancelReservationRequest,
            reservations::dto::AppendLedgerEntryRequest,
            reservations::dto::ReservationDto,
            reservations::dto::LedgerEntryDto,
            reservations::dto::LedgerSummaryDto,
            // Rooms
            rooms::dto::CreateRoomRequest,
            rooms::dto::UpdateRoomStatusRequest,
            rooms::dto::RoomDto,
            rooms::dto::RoomTypeDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Front Desk", description = "Guest lifecycle: check-in, check-out, transfers, stay adjustments"),
        (name = "Reservations", description = "Reservation CRUD, cancellation, and folio ledger"),
        (name = "Rooms", description = "Room inventory and room-type reference data"),
    ),
    info(
        title = "Front Desk Operations API",
        version = "1.0.0",
        description = "REST API for hotel reservation lifecycle and room inventory",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    front_desk_service: Arc<FrontDeskService>,
    billing: Arc<BillingLedger>,
    inventory: SharedRoomInventoryIndex,
    prometheus: PrometheusHandle,
) -> Router {
    let api_state = ApiState {
        repos: Arc::clone(&repos),
        front_desk: Arc::clone(&front_desk_service),
        billing,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Front-desk lifecycle routes
    let front_desk_routes = Router::new()
        .route("/check-in", post(front_desk::handlers::check_in))
        .route("/check-out", post(front_desk::handlers::check_out))
        .route(
            "/express-check-out",
            post(front_desk::handlers::express_check_out),
        )
        .route("/transfers", post(front_desk::handlers::transfer_room))
        .route(
            "/stay-adjustments",
            post(front_desk::handlers::apply_stay_adjustment),
        )
        .with_state(api_state.clone());

    // Reservation routes
    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::handlers::list_reservations)
                .post(reservations::handlers::create_reservation),
        )
        .route("/{id}", get(reservations::handlers::get_reservation))
        .route(
            "/by-confirmation/{number}",
            get(reservations::handlers::get_reservation_by_confirmation),
        )
        .route(
            "/{id}/cancel",
            post(reservations::handlers::cancel_reservation),
        )
        .route(
            "/{id}/ledger",
            get(reservations::handlers::get_ledger)
                .post(reservations::handlers::append_ledger_entry),
        )
        .with_state(api_state.clone());

    // Room routes
    let room_routes = Router::new()
        .route(
            "/",
            get(rooms::handlers::list_rooms).post(rooms::handlers::create_room),
        )
        .route("/available", get(rooms::handlers::available_rooms))
        .route(
            "/{id}/status",
            patch(rooms::handlers::update_room_status),
        )
        .with_state(api_state.clone());

    let room_type_routes = Router::new()
        .route("/", get(rooms::handlers::list_room_types))
        .with_state(api_state);

    let health_state = HealthState {
        repos,
        inventory,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = MetricsState { handle: prometheus };

    let health_routes = Router::new()
        .route("/health", get(health::handlers::health_check))
        .with_state(health_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::handlers::prometheus_metrics))
        .with_state(metrics_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .merge(health_routes)
        // Metrics
        .merge(metrics_routes)
        // Front desk
        .nest("/api/v1/front-desk", front_desk_routes)
        // Reservations
        .nest("/api/v1/reservations", reservation_routes)
        // Rooms
        .nest("/api/v1/rooms", room_routes)
        .nest("/api/v1/room-types", room_type_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
