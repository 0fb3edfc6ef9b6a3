//! Threshold splitting of secrets such as private keys.
//!
//! A secret is cut into chunks, each chunk is written as lowercase hex text,
//! that text is read as an integer over the printable alphabet and shared
//! with Shamir's scheme over a standard prime field, and the shares are
//! regrouped so that every holder receives one `ShareBox` with one share per
//! chunk. Any `threshold` boxes rebuild the secret.
//!
//! Combining fewer boxes than the threshold, or corrupted boxes, is not
//! detected. It yields wrong chunk values, which usually fail to decode as
//! hex text and otherwise come back as wrong bytes. Plain Shamir sharing
//! cannot tell either case from a correct combination.

pub mod chunker;
pub mod codec;
mod config;
mod error;
pub mod io;
mod polynomial;
pub mod prime;
mod share;
mod sharebox;
mod sss;
mod util;

pub use config::{SharingConfig, DEFAULT_CHUNK_SIZE, DEFAULT_SHARES, DEFAULT_THRESHOLD};
pub use error::{Error, Result};
pub use share::Share;
pub use sharebox::{DistributionShareBox, ShareBox};
pub use sss::{combine_chunk, split_chunk, FIELD_FLOOR, SSS};

/// Splits `secret` with the given parameters into one box per holder.
pub fn split_secret(secret: &[u8], config: SharingConfig) -> Result<Vec<ShareBox>> {
    SSS::new(config).split(secret)
}

/// Rebuilds a secret from share boxes.
pub fn combine_secret(artifacts: &[ShareBox]) -> Result<Vec<u8>> {
    SSS::default().combine(artifacts)
}
