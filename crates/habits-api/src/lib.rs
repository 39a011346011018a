//! JSON REST API for the habit tracker.
//!
//! Exposes an axum [`Router`] backed by any [`habits_core::store::HabitStore`].
//! CORS, content-type and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", habits_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod habits;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use habits_core::store::HabitStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: HabitStore + 'static,
{
  Router::new()
    // Habits
    .route("/habitos", get(habits::list::<S>).post(habits::create::<S>))
    .route("/habitos/{id}", put(habits::update::<S>).delete(habits::delete_one::<S>))
    // Records
    .route("/registros", get(records::list::<S>).post(records::create::<S>))
    .route("/registros/{id}", put(records::update::<S>).delete(records::delete_one::<S>))
    .with_state(store)
}
