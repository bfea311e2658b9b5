//! Service facade
//!
//! Wires the pure ownership pipeline and hierarchy queries to the company
//! repository. Each call loads a fresh registry snapshot, computes, and
//! discards it — the stateless-per-request model. Persisting the returned
//! `parent_id` and shares is the caller's responsibility.

use std::collections::HashMap;

use tracing::info;

use crate::error::OwnershipResult;
use crate::hierarchy::HierarchyIndex;
use crate::model::{Company, OwnershipShare, ParentDecision};
use crate::ownership::{apply_main_parent, compute_shares, determine_parent, normalize};
use crate::repository::CompanyRepository;
use crate::scope::{resolve_scope, CompanyScope, Principal};

/// Result of recomputing a company's ownership on save.
#[derive(Debug, Clone)]
pub struct OwnershipComputation {
    pub shares: Vec<OwnershipShare>,
    /// The derived parent edge, ready to be written to `Company.parent_id`.
    pub parent_id: Option<String>,
    pub decision: ParentDecision,
}

pub struct OwnershipService<R> {
    repo: R,
}

impl<R: CompanyRepository> OwnershipService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Recompute ownership shares and the main-parent decision for a
    /// subsidiary. Invoked whenever its shareholder list or capital figures
    /// change; a save referencing a missing or inactive shareholder company
    /// is rejected.
    pub async fn recompute_ownership(
        &self,
        company_id: &str,
    ) -> OwnershipResult<OwnershipComputation> {
        let subsidiary = self.repo.get_company(company_id).await?;
        let shareholders = self.repo.get_shareholders(company_id).await?;
        let companies_by_id: HashMap<String, Company> = self
            .repo
            .list_all_companies()
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let contributions = normalize(&subsidiary, &shareholders, &companies_by_id)?;
        let mut shares = compute_shares(&contributions);
        let decision = determine_parent(&shares, &shareholders);
        apply_main_parent(&mut shares, &decision);

        info!(
            company_id,
            parent_id = ?decision.parent_id,
            overridden = decision.overridden,
            shares = shares.len(),
            "recomputed ownership"
        );

        Ok(OwnershipComputation {
            parent_id: decision.parent_id.clone(),
            shares,
            decision,
        })
    }

    /// Ancestors of a company, root-first.
    pub async fn get_ancestors(&self, company_id: &str) -> OwnershipResult<Vec<Company>> {
        let index = self.build_index().await?;
        Ok(index.ancestors_of(company_id)?.into_iter().cloned().collect())
    }

    /// Every company below `company_id` in the tree.
    pub async fn get_descendants(&self, company_id: &str) -> OwnershipResult<Vec<Company>> {
        let index = self.build_index().await?;
        Ok(index
            .descendants_of(company_id)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Navigation path from the root down to and including `company_id`.
    pub async fn get_breadcrumb(&self, company_id: &str) -> OwnershipResult<Vec<Company>> {
        let index = self.build_index().await?;
        Ok(index.breadcrumb(company_id)?.into_iter().cloned().collect())
    }

    /// Direct children of `company_id`.
    pub async fn get_children(&self, company_id: &str) -> OwnershipResult<Vec<Company>> {
        let index = self.build_index().await?;
        Ok(index.children(company_id)?.into_iter().cloned().collect())
    }

    /// Effective visible-company set for a principal.
    pub async fn resolve_scope(&self, principal: &Principal) -> OwnershipResult<CompanyScope> {
        let index = self.build_index().await?;
        Ok(resolve_scope(principal, &index)?)
    }

    /// Whether a user assigned to `user_company_id` may access
    /// `target_company_id`: the same company, or one of its descendants.
    pub async fn validate_company_access(
        &self,
        user_company_id: &str,
        target_company_id: &str,
    ) -> OwnershipResult<bool> {
        if user_company_id == target_company_id {
            return Ok(true);
        }
        let index = self.build_index().await?;
        Ok(index.is_descendant_of(target_company_id, user_company_id)?)
    }

    async fn build_index(&self) -> OwnershipResult<HierarchyIndex> {
        Ok(HierarchyIndex::build(self.repo.list_all_companies().await?))
    }
}
