//! Authorization scope resolution
//!
//! Computes the set of company ids a principal may see, consumed by the
//! audit-log, notification, and report listing filters as a `company_id IN
//! (...)` allow-list. Resolution fails closed: a principal whose scope
//! requires a company assignment but has none sees nothing, never everything.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::HierarchyResult;
use crate::hierarchy::HierarchyIndex;

/// Breadth of companies a principal's role permits them to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleScope {
    Global,
    Company,
    SubCompany,
}

impl RoleScope {
    /// Scope implied by the depth of the principal's assigned company, as
    /// encoded in the application's auth tokens: the holding root sees
    /// everything, a first-level company sees itself, anything deeper sees
    /// its own subtree.
    pub fn for_company_level(level: usize) -> Self {
        match level {
            0 => RoleScope::Global,
            1 => RoleScope::Company,
            _ => RoleScope::SubCompany,
        }
    }
}

/// A principal whose visibility is being resolved. `company_id` may only be
/// absent for `Global` scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub scope: RoleScope,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, company_id: Option<String>, scope: RoleScope) -> Self {
        Self {
            user_id: user_id.into(),
            company_id,
            scope,
        }
    }
}

/// Allow-list of visible company ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyScope {
    /// Every company is visible; callers apply no filter.
    All,
    Ids(HashSet<String>),
}

impl CompanyScope {
    pub fn permits(&self, company_id: &str) -> bool {
        match self {
            CompanyScope::All => true,
            CompanyScope::Ids(ids) => ids.contains(company_id),
        }
    }

    /// True when the principal sees no companies at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, CompanyScope::Ids(ids) if ids.is_empty())
    }
}

/// Compute the effective visible-company set for a principal.
///
/// Pure given an already-built index. Propagates `NotFound` for a
/// sub-company principal assigned to a company missing from the snapshot and
/// `CycleDetected` for corrupted parent data.
pub fn resolve_scope(
    principal: &Principal,
    index: &HierarchyIndex,
) -> HierarchyResult<CompanyScope> {
    match principal.scope {
        RoleScope::Global => Ok(CompanyScope::All),
        RoleScope::Company => match &principal.company_id {
            Some(company_id) => Ok(CompanyScope::Ids(HashSet::from([company_id.clone()]))),
            None => Ok(denied(principal)),
        },
        RoleScope::SubCompany => match &principal.company_id {
            Some(company_id) => {
                let mut ids: HashSet<String> = HashSet::from([company_id.clone()]);
                for company in index.descendants_of(company_id)? {
                    ids.insert(company.id.clone());
                }
                Ok(CompanyScope::Ids(ids))
            }
            None => Ok(denied(principal)),
        },
    }
}

fn denied(principal: &Principal) -> CompanyScope {
    warn!(
        user_id = %principal.user_id,
        scope = ?principal.scope,
        "principal has no company assignment, denying all visibility"
    );
    CompanyScope::Ids(HashSet::new())
}
