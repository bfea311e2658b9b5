//! Company hierarchy index
//!
//! Builds and queries the parent/child forest implied by `Company.parent_id`
//! edges: ancestors, descendants, breadcrumb paths, direct children. All
//! traversals are iterative with an explicit queue and visited set — the
//! graph is data-error-influenced, so a cycle must surface as
//! [`HierarchyError::CycleDetected`] rather than unbounded recursion or a
//! silently truncated path.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::warn;

use crate::error::{HierarchyError, HierarchyResult};
use crate::model::Company;

/// Depth cap applied when reporting a company's level. Trees deeper than
/// this indicate corrupted parent data upstream.
pub const MAX_HIERARCHY_DEPTH: usize = 10;

/// Read-only index over a snapshot of the company registry.
///
/// Intended lifecycle is stateless-per-request: build from a fresh snapshot,
/// query, discard. A cached index must be rebuilt whenever any company's
/// parent changes, since a stale hierarchy corrupts scope resolution.
#[derive(Debug, Default)]
pub struct HierarchyIndex {
    companies: HashMap<String, Company>,
    child_ids: HashMap<String, Vec<String>>,
    order: Vec<String>,
}

impl HierarchyIndex {
    /// Build the index, constructing the reverse (child) adjacency map once.
    pub fn build<I>(companies: I) -> Self
    where
        I: IntoIterator<Item = Company>,
    {
        let mut index = Self::default();
        for company in companies {
            if let Some(parent_id) = &company.parent_id {
                index
                    .child_ids
                    .entry(parent_id.clone())
                    .or_default()
                    .push(company.id.clone());
            }
            index.order.push(company.id.clone());
            index.companies.insert(company.id.clone(), company);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.companies.contains_key(id)
    }

    pub fn get(&self, id: &str) -> HierarchyResult<&Company> {
        self.companies
            .get(id)
            .ok_or_else(|| HierarchyError::NotFound { id: id.to_string() })
    }

    /// Companies without a parent edge, in build order.
    pub fn roots(&self) -> Vec<&Company> {
        self.order
            .iter()
            .filter_map(|id| self.companies.get(id))
            .filter(|c| c.parent_id.is_none())
            .collect()
    }

    /// Ancestors of `id`, ordered root-first down to the immediate parent.
    ///
    /// A parent reference pointing outside the index ends the walk, matching
    /// the join semantics of the recursive ancestor query this replaces.
    pub fn ancestors_of(&self, id: &str) -> HierarchyResult<Vec<&Company>> {
        let start = self.get(id)?;

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(start.id.as_str());

        let mut chain: Vec<&Company> = Vec::new();
        let mut cursor = start.parent_id.as_deref();
        while let Some(parent_id) = cursor {
            if !visited.insert(parent_id) {
                return Err(HierarchyError::CycleDetected {
                    id: parent_id.to_string(),
                });
            }
            let Some(parent) = self.companies.get(parent_id) else {
                break;
            };
            chain.push(parent);
            cursor = parent.parent_id.as_deref();
        }

        chain.reverse();
        Ok(chain)
    }

    /// All companies reachable by following child edges from `id`,
    /// breadth-first. Excludes `id` itself.
    pub fn descendants_of(&self, id: &str) -> HierarchyResult<Vec<&Company>> {
        self.get(id)?;

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(id);

        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(id);

        let mut result: Vec<&Company> = Vec::new();
        while let Some(current) = queue.pop_front() {
            for child_id in self.child_ids.get(current).into_iter().flatten() {
                if !visited.insert(child_id.as_str()) {
                    return Err(HierarchyError::CycleDetected {
                        id: child_id.clone(),
                    });
                }
                if let Some(child) = self.companies.get(child_id.as_str()) {
                    result.push(child);
                }
                queue.push_back(child_id);
            }
        }

        Ok(result)
    }

    /// Ancestors of `id` followed by `id` itself: the navigation path shown
    /// in breadcrumb UIs.
    pub fn breadcrumb(&self, id: &str) -> HierarchyResult<Vec<&Company>> {
        let mut path = self.ancestors_of(id)?;
        path.push(self.get(id)?);
        Ok(path)
    }

    /// Direct children of `id`, one hop only.
    pub fn children(&self, id: &str) -> HierarchyResult<Vec<&Company>> {
        self.get(id)?;
        Ok(self
            .child_ids
            .get(id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|child_id| self.companies.get(child_id.as_str()))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Depth of `id` in its tree (roots are depth 0), capped at
    /// [`MAX_HIERARCHY_DEPTH`].
    pub fn depth_of(&self, id: &str) -> HierarchyResult<usize> {
        let depth = self.ancestors_of(id)?.len();
        if depth > MAX_HIERARCHY_DEPTH {
            warn!(id, depth, cap = MAX_HIERARCHY_DEPTH, "company depth exceeds cap");
            return Ok(MAX_HIERARCHY_DEPTH);
        }
        Ok(depth)
    }

    /// Whether `child_id` is reachable from `parent_id` by child edges.
    pub fn is_descendant_of(&self, child_id: &str, parent_id: &str) -> HierarchyResult<bool> {
        Ok(self
            .descendants_of(parent_id)?
            .iter()
            .any(|c| c.id == child_id))
    }
}
