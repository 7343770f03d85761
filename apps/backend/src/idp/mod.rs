//! Identity provider management API.

pub mod management;

pub use management::{
    Auth0ManagementClient, ManagementApi, ManagementApiError, ManagementToken, RemoteProfile,
    RemoteProfilePatch, RemoteProfileUpdated,
};
