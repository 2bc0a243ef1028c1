//! # Tictac Fetch
//!
//! Async, name-keyed data fetching with a small status machine.
//!
//! A [`FetchController`] follows one name at a time. Each new name moves the
//! status from `Idle` to `Pending`, and the fetch settles into `Resolved` or
//! `Rejected`. Results for a name that has since been replaced are dropped.
//! After a rejection, [`FetchController::reset`] clears the name so the user
//! can try again.
//!
//! ## Components
//!
//! - [`Fetcher`] - the async data source
//! - [`FetchStatus`] - `Idle | Pending | Resolved | Rejected`
//! - [`FetchController`] - supersession, reset and status notifications
//! - [`FetchError`] - cloneable rejection reasons

pub mod controller;
pub mod error;
pub mod fetcher;
pub mod status;

pub use controller::FetchController;
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use status::FetchStatus;
