//! Auth-domain identifiers, secrets, and the typed results of provider calls.

pub mod grant;
pub mod id;
pub mod identity;
pub mod profile;
pub mod secret;
pub mod state;

pub use grant::*;
pub use id::*;
pub use identity::*;
pub use profile::*;
pub use secret::*;
pub use state::*;
