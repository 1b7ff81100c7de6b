//! HTTP API for claiming subdomains.
//!
//! All request and response bodies are JSON. Failed requests return an error status and a body
//! of the form `{"error": "<message>"}`:
//!
//! | Status | Cause |
//! |--------|-------|
//! | 400    | Missing or malformed input, or malformed JSON. The DNS provider is not contacted. |
//! | 404    | The parent domain is not configured with the DNS provider. |
//! | 415    | The request is missing a `Content-Type: application/json` header. |
//! | 422    | The DNS provider rejected a record as a duplicate or as invalid. |
//! | 500    | Any other DNS provider failure. |
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/api/check-availability` (POST)
//!
//!   Expects a JSON request body of the form:
//!
//!   ```json
//!   { "subdomain": "app" }
//!   ```
//!
//!   The subdomain is trimmed and lowercased before validation. Returns HTTP 200 (OK) and:
//!
//!   ```json
//!   { "available": true, "subdomain": "app.sher.dev" }
//!   ```
//!
//!   A label is unavailable when the parent domain already has an `A` or `TXT` record with the
//!   same name.
//!
//! ## `/api/create-records` (POST)
//!
//!   Expects a JSON request body of the form:
//!
//!   ```json
//!   { "subdomain": "app", "txtValue": "replit-verify=abc", "aValue": "35.1.2.3" }
//!   ```
//!
//!   Creates a `TXT` record then an `A` record for the subdomain, each with a TTL of one hour.
//!   Returns HTTP 200 (OK) and:
//!
//!   ```json
//!   {
//!     "success": true,
//!     "subdomain": "app.sher.dev",
//!     "url": "https://app.sher.dev",
//!     "records": { "txt": { "id": 1, "type": "TXT", ... }, "a": { "id": 2, "type": "A", ... } }
//!   }
//!   ```
//!
//!   Where `records` holds the records as returned by the DNS provider. If the `A` record is
//!   rejected after the `TXT` record was created, the error for the `A` record is returned and
//!   the `TXT` record is not removed.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
