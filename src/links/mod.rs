//! Link and image URL normalization
//!
//! Product pages and listings reference images and products with
//! protocol-relative (`//cdn/...`), root-relative (`/dp/...`) and absolute
//! URLs. These helpers turn them into absolute `https` URLs.

mod normalize;

pub use normalize::{absolutize, origin_of, resolve_href};
