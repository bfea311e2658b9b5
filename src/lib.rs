//! Corporate ownership & hierarchy engine
//!
//! Turns a subsidiary's capital contributions (its own paid-up capital plus
//! corporate and individual shareholders) into ownership percentages, decides
//! which contributor is the main parent, and exposes the resulting company
//! tree for authorization-scope and navigation queries.
//!
//! The pipeline is pure: normalize contributions, compute shares, determine
//! the parent. The [`service::OwnershipService`] facade wires it to an
//! external [`repository::CompanyRepository`]; persistence, HTTP routing,
//! and rendering belong to the surrounding application.
//!
//! ## Quick Start
//!
//! ```rust
//! use ownership_engine::{Company, HierarchyIndex};
//!
//! let root = Company::new("Holding", "HLD");
//! let subsidiary = Company::new("Subsidiary", "SUB").with_parent(root.id.clone());
//! let index = HierarchyIndex::build([root.clone(), subsidiary.clone()]);
//!
//! let path = index.breadcrumb(&subsidiary.id).unwrap();
//! assert_eq!(path.len(), 2);
//! assert_eq!(path[0].id, root.id);
//! ```

// Core error handling
pub mod error;

// Domain models
pub mod model;

// Ownership computation pipeline
pub mod ownership;

// Company tree queries
pub mod hierarchy;

// Authorization scope resolution
pub mod scope;

// External repository seam and service facade
pub mod repository;
pub mod service;

// Essential error types
pub use error::{HierarchyError, HierarchyResult, OwnershipError, OwnershipResult, ReferenceFault};

// Core domain types
pub use model::{
    Company, Contribution, ContributorId, OwnershipShare, ParentDecision, ShareholderEntry,
    ShareholderKind, DEFAULT_CURRENCY,
};

// Pipeline stages
pub use ownership::{
    apply_main_parent, compute_shares, determine_parent, normalize, DISPLAY_PERCENT_SCALE,
    SHARE_PERCENT_SCALE,
};

// Hierarchy and scope
pub use hierarchy::{HierarchyIndex, MAX_HIERARCHY_DEPTH};
pub use scope::{resolve_scope, CompanyScope, Principal, RoleScope};

// Service surface
pub use repository::{CompanyRepository, InMemoryCompanyRepository};
pub use service::{OwnershipComputation, OwnershipService};
