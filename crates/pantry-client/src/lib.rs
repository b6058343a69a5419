//! Client side of the pantry server: a typed API wrapper and the
//! view-state controller a UI drives.

pub mod api;
pub mod controller;

pub use api::{ClientError, ListApi};
pub use controller::{AppController, SearchState, View};
