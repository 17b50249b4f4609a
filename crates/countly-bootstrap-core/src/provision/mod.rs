//! MongoDB user provisioning
//!
//! `DatabaseProvisioner` validates its inputs and hands one
//! `DatabaseUserSpec` per sibling database to a `UserAdmin` backend.

mod user;
mod admin;
mod memory_admin;
mod mongosh;
mod provisioner;

pub use user::{DatabaseUserSpec, Role};
pub use admin::{AdminError, AdminResult, UserAdmin};
pub use memory_admin::MemoryUserAdmin;
pub use mongosh::{MongoshUserAdmin, DEFAULT_MONGODB_URI, DEFAULT_MONGOSH};
pub use provisioner::{
    DatabaseProvisioner, ProvisionError, ProvisionReport, DATABASE_ENV, SIBLING_SUFFIXES,
};
