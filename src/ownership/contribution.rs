//! Capital contribution normalizer
//!
//! Turns the subsidiary's own paid-up capital plus its shareholder records
//! into a uniform, insertion-ordered contribution list. Corporate shareholder
//! references are resolved against a snapshot of the company registry; a
//! reference to a missing or inactive company rejects the whole save.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{OwnershipError, OwnershipResult, ReferenceFault};
use crate::model::{Company, Contribution, ContributorId, ShareholderEntry, ShareholderKind};

/// Normalize a subsidiary and its shareholder list into contributions.
///
/// The subsidiary's own capital always comes first, then one contribution per
/// shareholder in list order. Order is load-bearing: parent determination
/// breaks percentage ties by first occurrence.
pub fn normalize(
    subsidiary: &Company,
    shareholders: &[ShareholderEntry],
    companies_by_id: &HashMap<String, Company>,
) -> OwnershipResult<Vec<Contribution>> {
    let mut contributions = Vec::with_capacity(shareholders.len() + 1);
    contributions.push(Contribution {
        contributor: ContributorId::Subsidiary,
        amount: subsidiary.paid_up_capital,
    });

    for entry in shareholders {
        let amount = match &entry.kind {
            ShareholderKind::Company { company_id } => {
                let company = companies_by_id.get(company_id).ok_or_else(|| {
                    OwnershipError::InvalidShareholderReference {
                        shareholder: entry.name.clone(),
                        company_id: company_id.clone(),
                        fault: ReferenceFault::Missing,
                    }
                })?;
                if !company.is_active {
                    return Err(OwnershipError::InvalidShareholderReference {
                        shareholder: entry.name.clone(),
                        company_id: company_id.clone(),
                        fault: ReferenceFault::Inactive,
                    });
                }
                company.paid_up_capital
            }
            ShareholderKind::Individual {
                paid_up_capital, ..
            } => paid_up_capital.unwrap_or(Decimal::ZERO),
        };
        contributions.push(Contribution {
            contributor: entry.contributor_id(),
            amount,
        });
    }

    Ok(contributions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(companies: &[Company]) -> HashMap<String, Company> {
        companies
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect()
    }

    #[test]
    fn test_subsidiary_capital_comes_first() {
        let investor =
            Company::new("PT Investor", "INV").with_capital(Decimal::ZERO, Decimal::from(2_000));
        let subsidiary =
            Company::new("PT Anak", "ANK").with_capital(Decimal::ZERO, Decimal::from(1_000));
        let shareholders = vec![ShareholderEntry::corporate("PT Investor", investor.id.clone())];

        let contributions =
            normalize(&subsidiary, &shareholders, &registry(&[investor.clone()])).unwrap();

        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[0].contributor, ContributorId::Subsidiary);
        assert_eq!(contributions[0].amount, Decimal::from(1_000));
        assert_eq!(
            contributions[1].contributor,
            ContributorId::Company(investor.id)
        );
        assert_eq!(contributions[1].amount, Decimal::from(2_000));
    }

    #[test]
    fn test_individual_capital_defaults_to_zero() {
        let subsidiary = Company::new("PT Anak", "ANK");
        let shareholders = vec![ShareholderEntry::individual("John Doe", "3174000000000001")];

        let contributions = normalize(&subsidiary, &shareholders, &HashMap::new()).unwrap();

        assert_eq!(contributions[1].amount, Decimal::ZERO);
        assert_eq!(
            contributions[1].contributor,
            ContributorId::Individual("3174000000000001".to_string())
        );
    }

    #[test]
    fn test_missing_company_reference_is_rejected() {
        let subsidiary = Company::new("PT Anak", "ANK");
        let shareholders = vec![ShareholderEntry::corporate("PT Hilang", "no-such-id")];

        let err = normalize(&subsidiary, &shareholders, &HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            OwnershipError::InvalidShareholderReference {
                fault: ReferenceFault::Missing,
                ..
            }
        ));
    }

    #[test]
    fn test_inactive_company_reference_is_rejected() {
        let mut investor = Company::new("PT Nonaktif", "OFF");
        investor.is_active = false;
        let subsidiary = Company::new("PT Anak", "ANK");
        let shareholders = vec![ShareholderEntry::corporate(
            "PT Nonaktif",
            investor.id.clone(),
        )];

        let err = normalize(&subsidiary, &shareholders, &registry(&[investor])).unwrap_err();
        assert!(matches!(
            err,
            OwnershipError::InvalidShareholderReference {
                fault: ReferenceFault::Inactive,
                ..
            }
        ));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let a = Company::new("A", "A").with_capital(Decimal::ZERO, Decimal::from(1));
        let b = Company::new("B", "B").with_capital(Decimal::ZERO, Decimal::from(2));
        let subsidiary = Company::new("PT Anak", "ANK");
        let shareholders = vec![
            ShareholderEntry::corporate("A", a.id.clone()),
            ShareholderEntry::individual("P", "x-1"),
            ShareholderEntry::corporate("B", b.id.clone()),
        ];

        let contributions =
            normalize(&subsidiary, &shareholders, &registry(&[a.clone(), b.clone()])).unwrap();
        let order: Vec<String> = contributions
            .iter()
            .map(|c| c.contributor.to_string())
            .collect();
        let expected = vec![
            "self".to_string(),
            a.id.clone(),
            "individual:x-1".to_string(),
            b.id.clone(),
        ];
        assert_eq!(order, expected);
    }
}
