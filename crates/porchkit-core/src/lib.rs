//! Porchkit Core - package resource map engine
//!
//! This crate provides the building blocks for editing configuration packages
//! whose files hold many Kubernetes-style YAML documents:
//! - `codec`: Split and join multi-document YAML without reformatting
//! - `ResourceMap`: Immutable package snapshots with add/update/remove edits
//! - `PackageResource`: Individually addressable resources with stable ids
//! - `DiffEngine`: Id-based comparison of two snapshots with line counts
//! - `PackageLayout`: Manifest, resource-file and annotation conventions
//! - `revision`: Package revision records of the package store

pub mod codec;
pub mod diff;
pub mod error;
pub mod layout;
pub mod query;
pub mod resource;
pub mod resource_map;
pub mod revision;

pub use codec::{join_documents, split_documents};
pub use diff::{
    DiffEngine, DiffLine, DiffStatus, DiffSummary, LineChange, PackageResourceDiff, ResourceTextDiff,
};
pub use error::{CoreError, Result};
pub use layout::{PackageLayout, LAYOUT_FILENAME};
pub use query::{deployable_resources, root_manifest};
pub use resource::PackageResource;
pub use resource_map::ResourceMap;
pub use revision::{PackageRevision, PackageRevisionLifecycle, PackageRevisionResources};
