//! `eventify-core` — domain layer for the Eventify event-management site.
//!
//! Holds everything below the HTTP surface:
//!
//! - [`store`]: flat-file JSON record store (one file per collection)
//! - [`password`]: salted one-way password hashing
//! - [`auth`]: user registration and credential verification
//! - [`session`]: opaque-token session gate for protected operations
//! - [`bookings`]: append-only booking records with durable ids
//! - [`catalog`]: the static category/event catalog
//!
//! The crate has no knowledge of HTTP; the server crate wires these
//! components into routes.

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod password;
pub mod session;
pub mod store;

pub use auth::{AuthError, CredentialManager, Identity, User};
pub use bookings::{Booking, BookingError, BookingRecorder};
pub use session::SessionStore;
pub use store::{RecordStore, StoreError};
