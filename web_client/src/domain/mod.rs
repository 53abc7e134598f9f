pub mod gate;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use gate::{AuthDecision, GateRequest, IdentityLookup, UserIdentity};
pub use ports::{
    HairSwapError, HairSwapRequest, HairSwapper, IdentityError, IdentityProvider, ImageUpload,
    SwappedImage,
};
