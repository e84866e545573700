//! Public derivation API

pub mod dispatch;
pub mod pbkdf2_builder;

pub use dispatch::{default_executor, pbkdf2, pbkdf2_sync, pbkdf2_with_callback};
pub use pbkdf2_builder::{Pbkdf2, Pbkdf2Builder};
