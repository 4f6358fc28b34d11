//! Request handlers.
//!
//! Handlers stay thin: they pull collaborators out of [`AppState`], run the
//! core pipeline and map errors via [`AppError`].
//!
//! [`AppState`]: crate::state::AppState
//! [`AppError`]: crate::error::AppError

pub mod orders;
