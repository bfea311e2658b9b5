//! Domain models: companies, shareholder entries, and computed ownership
//!
//! `Company` and `ShareholderEntry` mirror the records owned by the
//! surrounding application's company registry. `Contribution`,
//! `OwnershipShare`, and `ParentDecision` are derived views produced by the
//! ownership pipeline; they are recomputed on every save and never
//! independently persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ownership::calculator::DISPLAY_PERCENT_SCALE;

/// Default reporting currency of the surrounding application. Informational
/// only; percentage math is currency-agnostic.
pub const DEFAULT_CURRENCY: &str = "IDR";

/// A company in the registry. `parent_id` is derived by parent determination
/// and recomputed whenever the shareholder list or capital figures change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub authorized_capital: Decimal,
    pub paid_up_capital: Decimal,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Create an active company with a fresh id and zero capital figures.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            code: code.into(),
            parent_id: None,
            authorized_capital: Decimal::ZERO,
            paid_up_capital: Decimal::ZERO,
            currency: DEFAULT_CURRENCY.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_capital(mut self, authorized: Decimal, paid_up: Decimal) -> Self {
        self.authorized_capital = authorized;
        self.paid_up_capital = paid_up;
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// A shareholder record belonging to exactly one subsidiary.
///
/// `is_main_parent` is the explicit override flag: when set, this shareholder
/// wins parent determination unconditionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareholderEntry {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ShareholderKind,
    #[serde(default)]
    pub is_main_parent: bool,
}

/// The two shareholder variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShareholderKind {
    /// Another company in the registry; its capital contribution is that
    /// company's paid-up capital.
    Company { company_id: String },
    /// A natural person carrying their own capital figures.
    Individual {
        identity_number: String,
        type_label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        authorized_capital: Option<Decimal>,
        #[serde(skip_serializing_if = "Option::is_none")]
        paid_up_capital: Option<Decimal>,
    },
}

impl ShareholderEntry {
    pub fn corporate(name: impl Into<String>, company_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: ShareholderKind::Company {
                company_id: company_id.into(),
            },
            is_main_parent: false,
        }
    }

    pub fn individual(name: impl Into<String>, identity_number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind: ShareholderKind::Individual {
                identity_number: identity_number.into(),
                type_label: "Individu".to_string(),
                authorized_capital: None,
                paid_up_capital: None,
            },
            is_main_parent: false,
        }
    }

    /// Set capital figures on an individual entry; no effect on corporate
    /// entries, whose contribution always comes from the referenced company.
    pub fn with_individual_capital(mut self, authorized: Decimal, paid_up: Decimal) -> Self {
        if let ShareholderKind::Individual {
            authorized_capital,
            paid_up_capital,
            ..
        } = &mut self.kind
        {
            *authorized_capital = Some(authorized);
            *paid_up_capital = Some(paid_up);
        }
        self
    }

    pub fn as_main_parent(mut self) -> Self {
        self.is_main_parent = true;
        self
    }

    /// The contributor identity this entry maps to in the share list.
    pub fn contributor_id(&self) -> ContributorId {
        match &self.kind {
            ShareholderKind::Company { company_id } => ContributorId::Company(company_id.clone()),
            ShareholderKind::Individual {
                identity_number, ..
            } => ContributorId::Individual(identity_number.clone()),
        }
    }
}

/// Identity of a capital contributor.
///
/// Canonical string forms: `self` for the subsidiary's own retained capital,
/// the company id for corporate shareholders, `individual:<identity>` for
/// individuals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContributorId {
    Subsidiary,
    Company(String),
    Individual(String),
}

const INDIVIDUAL_PREFIX: &str = "individual:";
const SELF_ID: &str = "self";

impl ContributorId {
    /// The backing company id, if this contributor is a company.
    pub fn as_company(&self) -> Option<&str> {
        match self {
            ContributorId::Company(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributorId::Subsidiary => write!(f, "{SELF_ID}"),
            ContributorId::Company(id) => write!(f, "{id}"),
            ContributorId::Individual(identity) => write!(f, "{INDIVIDUAL_PREFIX}{identity}"),
        }
    }
}

impl From<ContributorId> for String {
    fn from(id: ContributorId) -> Self {
        id.to_string()
    }
}

impl From<String> for ContributorId {
    fn from(raw: String) -> Self {
        if raw == SELF_ID {
            ContributorId::Subsidiary
        } else if let Some(identity) = raw.strip_prefix(INDIVIDUAL_PREFIX) {
            ContributorId::Individual(identity.to_string())
        } else {
            ContributorId::Company(raw)
        }
    }
}

/// One normalized capital contribution, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub contributor: ContributorId,
    pub amount: Decimal,
}

/// A computed ownership share. Derived view, not persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipShare {
    pub contributor: ContributorId,
    pub capital_amount: Decimal,
    pub ownership_percent: Decimal,
    pub is_main_parent: bool,
}

impl OwnershipShare {
    /// Percentage as surfaced for display. The subsidiary's own share is
    /// shown at 2 decimal places while shareholder shares keep the full
    /// 10-place precision; both roundings exist in the upstream contract and
    /// are preserved here rather than unified.
    pub fn display_percent(&self) -> Decimal {
        match self.contributor {
            ContributorId::Subsidiary => self
                .ownership_percent
                .round_dp_with_strategy(DISPLAY_PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero),
            _ => self.ownership_percent,
        }
    }
}

/// Outcome of parent determination.
///
/// `winner` is the contributor selected by the decision rules; `parent_id`
/// is the company-tree edge it implies. An individual winner yields no edge
/// because the tree links companies only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentDecision {
    pub parent_id: Option<String>,
    pub winner: Option<ContributorId>,
    pub overridden: bool,
}

impl ParentDecision {
    /// No parent: the subsidiary stays a root in the company tree.
    pub fn none() -> Self {
        Self {
            parent_id: None,
            winner: None,
            overridden: false,
        }
    }
}
