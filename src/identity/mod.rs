pub mod normalizer;

pub use normalizer::normalize;
pub use crate::types::identifiers::{CanonicalIdentity, IdentityError};
