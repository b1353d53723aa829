// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: credentials, source fetching, graph sinks

pub mod credentials;
pub mod fetch;
mod http;
pub mod sink;
pub mod traced;

pub use credentials::{
    CredentialError, CredentialProvider, NoCredentials, OAuthClientCredentials, OAuthSettings,
    StaticToken,
};
pub use fetch::{FetchError, FileFetcher, HttpFetcher, RecordFetcher, SourceFetcher};
pub use sink::{CypherHttpSink, GraphSink, LogSink, SinkError, WriteSummary};
pub use traced::{TracedFetcher, TracedSink};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use credentials::FakeCredentials;
#[cfg(any(test, feature = "test-support"))]
pub use fetch::{FakeFetcher, FetchCall};
#[cfg(any(test, feature = "test-support"))]
pub use sink::{FakeSink, SinkCall};
