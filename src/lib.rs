//! Edge service that mints short-lived, scope-restricted Mapbox tokens so the private
//! credential never reaches the browser.
//!
//! The crate exposes one route, `GET /api/token`, which forwards a single mint request to the
//! Mapbox Tokens API for the configured account and relays the token plus its expiry. A CORS
//! decorator and pre-flight responder cover everything under `/api/`.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod issue;
pub mod obs;
pub mod provider;
pub mod server;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
// Binary-only dependencies.
use {color_eyre as _, tracing_subscriber as _};
#[cfg(test)] use {httpmock as _, tower as _};
