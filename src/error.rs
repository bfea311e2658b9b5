//! Error handling for the ownership and hierarchy engine
//!
//! This module provides idiomatic Rust error types using thiserror. Hierarchy
//! traversal faults are a separate enum so read-only consumers (scope
//! resolution, breadcrumb endpoints) can match on them without pulling in the
//! full ownership error surface.

use std::fmt;

use thiserror::Error;

/// Faults raised while querying or traversing the company hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("company '{id}' not found")]
    NotFound { id: String },

    /// The parent graph contains a cycle. This is a data-integrity fault and
    /// is never auto-repaired: a truncated path would corrupt authorization
    /// scope computation downstream.
    #[error("cycle detected in company hierarchy at '{id}'")]
    CycleDetected { id: String },
}

/// Why a corporate shareholder reference failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFault {
    Missing,
    Inactive,
}

impl fmt::Display for ReferenceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFault::Missing => write!(f, "a missing"),
            ReferenceFault::Inactive => write!(f, "an inactive"),
        }
    }
}

/// Main error type for ownership computation and the service facade.
#[derive(Error, Debug)]
pub enum OwnershipError {
    /// A corporate shareholder points at a company that does not exist or is
    /// no longer active. The company save is rejected, not retried.
    #[error("shareholder '{shareholder}' references {fault} company '{company_id}'")]
    InvalidShareholderReference {
        shareholder: String,
        company_id: String,
        fault: ReferenceFault,
    },

    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// Failure in the external company repository collaborator.
    #[error("repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

/// Result type aliases for convenience
pub type HierarchyResult<T> = Result<T, HierarchyError>;
pub type OwnershipResult<T> = Result<T, OwnershipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let not_found = HierarchyError::NotFound {
            id: "abc".to_string(),
        };
        let err = OwnershipError::from(not_found);
        assert!(matches!(
            err,
            OwnershipError::Hierarchy(HierarchyError::NotFound { .. })
        ));
    }

    #[test]
    fn test_reference_fault_display() {
        let err = OwnershipError::InvalidShareholderReference {
            shareholder: "PT Investor".to_string(),
            company_id: "c-1".to_string(),
            fault: ReferenceFault::Inactive,
        };
        assert_eq!(
            err.to_string(),
            "shareholder 'PT Investor' references an inactive company 'c-1'"
        );
    }

    #[test]
    fn test_cycle_display() {
        let err = HierarchyError::CycleDetected {
            id: "c-2".to_string(),
        };
        assert_eq!(err.to_string(), "cycle detected in company hierarchy at 'c-2'");
    }
}
