mod asset;
mod ids;
mod user;

pub use asset::{Asset, NewAsset};
pub use ids::{AssetId, UserId};
pub use user::{
    merge_profile, NewUser, ProfileFields, PublicUser, UniqueField, User, UserPatch,
};
