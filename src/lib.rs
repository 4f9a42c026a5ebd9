//! # ArchLens
//!
//! Gemini-backed project architect and ecosystem trend digest.
//!
//! ## Features
//!
//! - **Structured Architecture**: Returns typed `ArchitectureSpec` structs, shape-enforced by a
//!   response schema sent with the request
//! - **Grounded Trends**: Google Search grounded digests with every cited web source
//! - **Pluggable Transport**: The HTTP boundary is a trait, so callers and tests can swap it

pub mod agent;
pub mod architecture;
pub mod config;
pub mod transport;
pub mod trends;

pub use agent::{AgentError, ArchLens, ErrorKind};
pub use architecture::{ArchitectureSpec, KeyComponent};
pub use config::Config;
pub use transport::{HttpTransport, Transport, TransportError};
pub use trends::{Source, TrendDigest};
