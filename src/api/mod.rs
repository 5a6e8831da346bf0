//! Networking service API access
//!
//! Resource commands never talk HTTP directly: they build an [`ApiRequest`]
//! and hand it to a [`RequestExecutor`]. [`NeutronClient`] is the `reqwest`
//! backed executor used by the binary; [`RecordingExecutor`] keeps requests
//! in memory for tests.

pub mod client;
pub mod constants;
pub mod executor;
pub mod request;

pub use client::NeutronClient;
pub use executor::{RecordingExecutor, RequestExecutor};
pub use request::{ApiRequest, HttpMethod};
