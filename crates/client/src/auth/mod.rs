//! Authentication: token store, authenticator, and the provider seam.

mod authenticator;
mod token_store;

pub use authenticator::{Authenticator, TokenProvider};
pub use token_store::TokenStore;
