//! Route dispatch for the Eventify site.
//!
//! Routes are matched on `(method, path)` and dispatched to per-route
//! handlers. Protected routes go through [`require_login`], which sends
//! anonymous clients back to the login page with a 303.

use eventify_core::auth::AuthError;
use eventify_core::bookings::{BookingError, NewBooking};
use eventify_core::{catalog, BookingRecorder, CredentialManager, Identity, RecordStore, SessionStore};
use serde_json::json;

use crate::http::{HttpRequest, HttpResponse, Method};
use crate::pages;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "sid";

/// Shared application state handed to every request.
#[derive(Debug)]
pub struct App {
    pub credentials: CredentialManager,
    pub bookings: BookingRecorder,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        Self {
            credentials: CredentialManager::new(store.clone()),
            bookings: BookingRecorder::new(store),
            sessions: SessionStore::new(),
        }
    }
}

/// Dispatch one request.
pub fn handle(app: &App, req: &HttpRequest) -> HttpResponse {
    let resp = route(app, req);
    tracing::info!("{:?} {} -> {}", req.method, req.path, resp.status);
    resp
}

fn route(app: &App, req: &HttpRequest) -> HttpResponse {
    match (req.method, req.path.as_str()) {
        // Content pages
        (Method::Get, "/") => HttpResponse::html(200, pages::home()),
        (Method::Get, "/login") => HttpResponse::html(200, pages::login()),
        (Method::Get, "/categories") => HttpResponse::html(200, pages::categories()),
        (Method::Get, path) if path.starts_with("/categories/") => category_detail(path),
        (Method::Get, "/events/previous") => HttpResponse::html(200, pages::previous_events()),
        (Method::Get, "/events/upcoming") => HttpResponse::html(200, pages::upcoming_events()),
        (Method::Get, "/payment") => HttpResponse::html(200, pages::payment()),
        (Method::Post, "/submit-payment") => submit_payment(req),
        (Method::Get, "/feedback") => HttpResponse::html(200, pages::feedback()),
        (Method::Post, "/submit-feedback") => submit_feedback(req),

        // Auth
        (Method::Post, "/signup") => signup(app, req),
        (Method::Post, "/login") => login(app, req),
        (Method::Get, "/logout") => logout(app, req),
        (Method::Get, "/api/session") => api_session(app, req),

        // Protected
        (Method::Get, "/api/events") => match require_login(app, req) {
            Ok(_) => api_events(),
            Err(resp) => resp,
        },
        (Method::Post, "/save-booking") => match require_login(app, req) {
            Ok(_) => save_booking(app, req),
            Err(resp) => resp,
        },
        (Method::Get, "/api/bookings") => match require_login(app, req) {
            Ok(_) => api_bookings(app),
            Err(resp) => resp,
        },

        _ => not_found("Page not found"),
    }
}

/// Resolve the session identity or bounce to the login page.
fn require_login(app: &App, req: &HttpRequest) -> Result<Identity, HttpResponse> {
    req.cookie(SESSION_COOKIE)
        .and_then(|token| app.sessions.identity(token))
        .ok_or_else(|| HttpResponse::redirect("/login"))
}

fn category_detail(path: &str) -> HttpResponse {
    let id = path.trim_start_matches("/categories/");
    match catalog::category(id) {
        Some(cat) => HttpResponse::html(200, pages::category_detail(cat)),
        None => not_found("Category not found"),
    }
}

fn signup(app: &App, req: &HttpRequest) -> HttpResponse {
    let form = req.form();
    let field = |name: &str| form.get(name).map(String::as_str).unwrap_or("");

    match app
        .credentials
        .signup(field("name"), field("email"), field("password"))
    {
        Ok(()) => HttpResponse::redirect("/login"),
        Err(e @ (AuthError::MissingField(_) | AuthError::DuplicateEmail)) => {
            HttpResponse::html(400, pages::message("Signup", "Signup failed", &e.to_string()))
        }
        Err(e) => internal_error("signup", &e),
    }
}

fn login(app: &App, req: &HttpRequest) -> HttpResponse {
    let form = req.form();
    let field = |name: &str| form.get(name).map(String::as_str).unwrap_or("");

    match app.credentials.login(field("email"), field("password")) {
        Ok(identity) => {
            let token = app.sessions.insert(identity);
            HttpResponse::redirect("/categories")
                .with_set_cookie(format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly"))
        }
        Err(e @ AuthError::InvalidCredentials) => {
            HttpResponse::html(401, pages::message("Login", "Login failed", &e.to_string()))
        }
        Err(e) => internal_error("login", &e),
    }
}

fn logout(app: &App, req: &HttpRequest) -> HttpResponse {
    if let Some(token) = req.cookie(SESSION_COOKIE) {
        app.sessions.destroy(token);
    }
    HttpResponse::redirect("/")
        .with_set_cookie(format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0"))
}

fn api_session(app: &App, req: &HttpRequest) -> HttpResponse {
    let user = req
        .cookie(SESSION_COOKIE)
        .and_then(|token| app.sessions.identity(token));
    HttpResponse::json(200, &json!({ "user": user }))
}

fn api_events() -> HttpResponse {
    match serde_json::to_value(catalog::event_catalog()) {
        Ok(value) => HttpResponse::json(200, &value),
        Err(e) => internal_error("api_events", &e),
    }
}

fn save_booking(app: &App, req: &HttpRequest) -> HttpResponse {
    let form = req.form();
    let field = |name: &str| form.get(name).cloned().unwrap_or_default();
    // Absent or blank means zero; a present value must parse.
    let guests = match form.get("guests").map(String::as_str) {
        None | Some("") => 0,
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                return HttpResponse::json(
                    400,
                    &json!({ "success": false, "message": "guests must be a number" }),
                );
            }
        },
    };

    let input = NewBooking {
        event_name: field("eventName"),
        customer_name: field("customerName"),
        venue: field("venue"),
        guests,
        theme: field("theme"),
        requests: field("requests"),
    };

    match app.bookings.create(input) {
        Ok(booking) => HttpResponse::json(
            200,
            &json!({
                "success": true,
                "message": format!("Booking confirmed for {}", booking.event_name),
                "id": booking.id,
            }),
        ),
        Err(e @ BookingError::MissingField(_)) => HttpResponse::json(
            400,
            &json!({ "success": false, "message": e.to_string() }),
        ),
        Err(e) => internal_error("save_booking", &e),
    }
}

fn api_bookings(app: &App) -> HttpResponse {
    match serde_json::to_value(app.bookings.list()) {
        Ok(value) => HttpResponse::json(200, &value),
        Err(e) => internal_error("api_bookings", &e),
    }
}

fn submit_payment(req: &HttpRequest) -> HttpResponse {
    let form = req.form();
    let field = |name: &str| form.get(name).map(String::as_str).unwrap_or("").to_string();
    HttpResponse::html(
        200,
        pages::payment_success(
            &field("name"),
            &field("event"),
            &field("amount"),
            &field("method"),
        ),
    )
}

fn submit_feedback(req: &HttpRequest) -> HttpResponse {
    let form = req.form();
    let field = |name: &str| form.get(name).map(String::as_str).unwrap_or("").to_string();
    HttpResponse::html(
        200,
        pages::feedback_thanks(&field("name"), &field("feedback"), &field("rating")),
    )
}

fn not_found(detail: &str) -> HttpResponse {
    HttpResponse::html(404, pages::message("Not Found", "Not found", detail))
}

fn internal_error(context: &str, e: &dyn std::error::Error) -> HttpResponse {
    tracing::error!("{context}: {e}");
    HttpResponse::html(
        500,
        pages::message("Error", "Something went wrong", "Please try again later."),
    )
}
