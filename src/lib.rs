//! MCP server for the AMap web service API.
//!
//! Exposes geocoding, reverse geocoding, POI search, driving directions and
//! weather lookups as MCP tools, served over HTTP (`/mcp`) or JSON-RPC 2.0
//! stdio. Each tool validates its arguments, issues one provider request
//! (two for weather) and returns the normalized result as a text block.

pub mod amap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod observability;
pub mod protocol;
pub mod server;
pub mod tools;

pub mod schema;
