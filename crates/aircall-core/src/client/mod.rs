//! Rate-limited Aircall REST client
//!
//! [`CallCenterApi`] is the seam the tools are written against;
//! [`AircallClient`] implements it over HTTP and passes every request
//! through the shared [`crate::rate_limiter::RateLimiter`] first.

mod api;
mod http;
mod types;

pub use api::CallCenterApi;
pub use http::AircallClient;
pub use types::{
    Call, CallDirection, CallPage, ListCallsQuery, NamedRef, PageMeta, Summary, Tag, Transcript,
    Utterance,
};
