//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area.

mod health;
mod page;
mod upload;

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by route registration.

pub use health::health;
pub use page::{index, upload_form};
pub use upload::upload_json;
