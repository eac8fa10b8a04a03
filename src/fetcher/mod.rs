pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{HttpSource, PageSource, fetch};
pub use errors::{FailureKind, FetchError};
pub use pipeline::{decode, decode_document, resolve_encoding};
pub use types::{
    DecodedDocument, FetchProfile, FetchSettings, RawDocument, ResolvedEncoding,
};
