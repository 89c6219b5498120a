/// Server services
pub mod assets;
pub mod hasher;
pub mod identity;
pub mod tokens;

pub use assets::AssetService;
pub use hasher::CredentialHasher;
pub use identity::{IdentityService, LoginGrant, Registration};
pub use tokens::{Claims, TokenIssuer};
