//! Company repository seam
//!
//! The engine consumes company and shareholder records through this trait;
//! the surrounding application supplies a storage-backed implementation.
//! [`InMemoryCompanyRepository`] is provided for tests and embedded use.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{HierarchyError, OwnershipResult};
use crate::model::{Company, ShareholderEntry};

/// External collaborator supplying the company/shareholder graph.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Fetch a company by id. Fails with `NotFound` when the company is
    /// absent or soft-deleted.
    async fn get_company(&self, id: &str) -> OwnershipResult<Company>;

    /// Shareholder entries of a subsidiary, in submission order.
    async fn get_shareholders(&self, company_id: &str) -> OwnershipResult<Vec<ShareholderEntry>>;

    /// Full registry snapshot for hierarchy index construction and
    /// shareholder reference resolution. Includes inactive companies so
    /// callers can distinguish missing from deactivated references.
    async fn list_all_companies(&self) -> OwnershipResult<Vec<Company>>;
}

#[derive(Default)]
struct Store {
    companies: Vec<Company>,
    shareholders: HashMap<String, Vec<ShareholderEntry>>,
}

/// In-memory repository backed by a `RwLock`, preserving insertion order.
#[derive(Default)]
pub struct InMemoryCompanyRepository {
    store: RwLock<Store>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_company(&self, company: Company) {
        let mut store = self.write();
        if let Some(existing) = store.companies.iter_mut().find(|c| c.id == company.id) {
            *existing = company;
        } else {
            store.companies.push(company);
        }
    }

    pub fn set_shareholders(&self, company_id: impl Into<String>, entries: Vec<ShareholderEntry>) {
        self.write().shareholders.insert(company_id.into(), entries);
    }

    /// Persist a parent decision onto the stored company record.
    pub fn set_parent(&self, company_id: &str, parent_id: Option<String>) {
        let mut store = self.write();
        if let Some(company) = store.companies.iter_mut().find(|c| c.id == company_id) {
            company.parent_id = parent_id;
        }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn get_company(&self, id: &str) -> OwnershipResult<Company> {
        self.read()
            .companies
            .iter()
            .find(|c| c.id == id && c.is_active)
            .cloned()
            .ok_or_else(|| HierarchyError::NotFound { id: id.to_string() }.into())
    }

    async fn get_shareholders(&self, company_id: &str) -> OwnershipResult<Vec<ShareholderEntry>> {
        Ok(self
            .read()
            .shareholders
            .get(company_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_all_companies(&self) -> OwnershipResult<Vec<Company>> {
        Ok(self.read().companies.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OwnershipError;

    #[tokio::test]
    async fn test_get_company_excludes_soft_deleted() {
        let repo = InMemoryCompanyRepository::new();
        let mut company = Company::new("PT Anak", "ANK");
        company.is_active = false;
        let id = company.id.clone();
        repo.insert_company(company);

        let err = repo.get_company(&id).await.unwrap_err();
        assert!(matches!(
            err,
            OwnershipError::Hierarchy(HierarchyError::NotFound { .. })
        ));
        // But the registry snapshot still lists it.
        assert_eq!(repo.list_all_companies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_company_replaces_by_id() {
        let repo = InMemoryCompanyRepository::new();
        let company = Company::new("PT Anak", "ANK");
        let id = company.id.clone();
        repo.insert_company(company.clone());

        let mut renamed = company;
        renamed.name = "PT Anak Baru".to_string();
        repo.insert_company(renamed);

        let fetched = repo.get_company(&id).await.unwrap();
        assert_eq!(fetched.name, "PT Anak Baru");
        assert_eq!(repo.list_all_companies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_parent_updates_the_record() {
        let repo = InMemoryCompanyRepository::new();
        let parent = Company::new("Holding", "HLD");
        let child = Company::new("PT Anak", "ANK");
        let (parent_id, child_id) = (parent.id.clone(), child.id.clone());
        repo.insert_company(parent);
        repo.insert_company(child);

        repo.set_parent(&child_id, Some(parent_id.clone()));
        let fetched = repo.get_company(&child_id).await.unwrap();
        assert_eq!(fetched.parent_id, Some(parent_id));
    }
}
