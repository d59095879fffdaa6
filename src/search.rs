use rust_decimal::Decimal;

use crate::account::Account;

/// Filters `accounts` by an arbitrary predicate, preserving input order.
/// Every named search below goes through this entry point.
pub fn search<P>(accounts: &[Account], predicate: P) -> Vec<&Account>
where
    P: Fn(&Account) -> bool,
{
    accounts.iter().filter(|acc| predicate(acc)).collect()
}

/// Exact match on the account number.
pub fn by_account_number<'a>(accounts: &'a [Account], number: &str) -> Vec<&'a Account> {
    search(accounts, |acc| acc.number() == number)
}

/// Exact match on the BIK.
pub fn by_bik<'a>(accounts: &'a [Account], bik: &str) -> Vec<&'a Account> {
    search(accounts, |acc| acc.bik() == bik)
}

/// Exact match on the KPP.
pub fn by_kpp<'a>(accounts: &'a [Account], kpp: &str) -> Vec<&'a Account> {
    search(accounts, |acc| acc.kpp() == kpp)
}

/// Case-insensitive substring match on the owner name.
pub fn by_owner_name<'a>(accounts: &'a [Account], owner_name: &str) -> Vec<&'a Account> {
    let needle = owner_name.to_lowercase();
    search(accounts, |acc| {
        acc.owner_name().to_lowercase().contains(&needle)
    })
}

/// Exact match on the tax id, where an absent query value matches accounts
/// with an absent tax id. Absent is a comparable value here, not "no filter".
pub fn by_tax_id<'a>(accounts: &'a [Account], tax_id: Option<&str>) -> Vec<&'a Account> {
    search(accounts, |acc| acc.tax_id() == tax_id)
}

/// Inclusive balance range, `min <= balance <= max`.
pub fn by_balance_range(accounts: &[Account], min: Decimal, max: Decimal) -> Vec<&Account> {
    search(accounts, |acc| acc.balance() >= min && acc.balance() <= max)
}

/// Multi-field conjunction filter for [`advanced_search`]. A `None` or empty
/// field imposes no constraint. Unlike the single-field searches above,
/// `account_number`, `bik` and `kpp` match by SUBSTRING containment here,
/// which is intentional: the combined search is a drill-down over partial
/// requisites, the single-field searches are lookups.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub account_number: Option<String>,
    pub bik: Option<String>,
    pub kpp: Option<String>,
    pub owner_name: Option<String>,
}

impl AccountFilter {
    fn matches(&self, acc: &Account) -> bool {
        fn constrained(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|v| !v.is_empty())
        }

        if let Some(number) = constrained(&self.account_number) {
            if !acc.number().contains(number) {
                return false;
            }
        }
        if let Some(bik) = constrained(&self.bik) {
            if !acc.bik().contains(bik) {
                return false;
            }
        }
        if let Some(kpp) = constrained(&self.kpp) {
            if !acc.kpp().contains(kpp) {
                return false;
            }
        }
        if let Some(owner) = constrained(&self.owner_name) {
            let needle = owner.to_lowercase();
            if !acc.owner_name().to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Conjunction of the per-field filters in `filter`; with no fields set,
/// every account passes, in input order.
pub fn advanced_search<'a>(accounts: &'a [Account], filter: &AccountFilter) -> Vec<&'a Account> {
    search(accounts, |acc| filter.matches(acc))
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;
    use crate::account::OpenAccount;

    fn account(
        number: &str,
        bik: &str,
        owner: &str,
        tax_id: Option<&str>,
        balance: u32,
    ) -> Account {
        Account::open(OpenAccount {
            number: number.to_string(),
            bik: bik.to_string(),
            kpp: "770101001".to_string(),
            correspondent_account: None,
            tax_id: tax_id.map(ToOwned::to_owned),
            owner_name: owner.to_string(),
            initial_balance: Decimal::from_u32(balance).unwrap(),
        })
        .unwrap()
    }

    fn fixture() -> Vec<Account> {
        vec![
            account(
                "12345678901234567890",
                "044525225",
                "Ivan Petrov",
                Some("7707083893"),
                100,
            ),
            account(
                "12345678900000000000",
                "044525593",
                "Maria Ivanova",
                None,
                250,
            ),
            account(
                "99999999999999999999",
                "044525225",
                "Petr Sidorov",
                Some("5003052454"),
                500,
            ),
        ]
    }

    #[test]
    fn account_number_is_exact_match() {
        let accounts = fixture();
        let found = by_account_number(&accounts, "12345678901234567890");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner_name(), "Ivan Petrov");
        // partial digit overlap with the second account must not match
        assert!(by_account_number(&accounts, "1234567890").is_empty());
    }

    #[test]
    fn bik_and_kpp_are_exact_match() {
        let accounts = fixture();
        let found = by_bik(&accounts, "044525225");
        assert_eq!(found.len(), 2);
        assert!(by_bik(&accounts, "044525").is_empty());

        let found = by_kpp(&accounts, "770101001");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn owner_name_is_case_insensitive_substring() {
        let accounts = fixture();
        let found = by_owner_name(&accounts, "ivan");
        // matches "Ivan Petrov" and "Maria Ivanova"
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].owner_name(), "Ivan Petrov");
        assert_eq!(found[1].owner_name(), "Maria Ivanova");

        assert_eq!(by_owner_name(&accounts, "PETROV").len(), 1);
        assert!(by_owner_name(&accounts, "nobody").is_empty());
    }

    #[test]
    fn tax_id_absent_matches_absent() {
        let accounts = fixture();
        let found = by_tax_id(&accounts, Some("7707083893"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner_name(), "Ivan Petrov");

        // an absent query selects the accounts with no tax id, it is not a
        // wildcard like the advanced_search pass-through
        let found = by_tax_id(&accounts, None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner_name(), "Maria Ivanova");
    }

    #[test]
    fn balance_range_bounds_are_inclusive() {
        let accounts = fixture();
        let min = Decimal::from_u32(100).unwrap();
        let max = Decimal::from_u32(500).unwrap();
        let found = by_balance_range(&accounts, min, max);
        assert_eq!(found.len(), 3);

        let found = by_balance_range(
            &accounts,
            "99.99".parse().unwrap(),
            "499.99".parse().unwrap(),
        );
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|acc| acc.balance() < max));

        let found = by_balance_range(
            &accounts,
            "100.01".parse().unwrap(),
            "500.01".parse().unwrap(),
        );
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|acc| acc.balance() > min));
    }

    #[test]
    fn advanced_search_with_no_fields_passes_everything_through() {
        let accounts = fixture();
        let found = advanced_search(&accounts, &AccountFilter::default());
        assert_eq!(found.len(), 3);
        // input order preserved
        let numbers: Vec<_> = found.iter().map(|acc| acc.number()).collect();
        let expected: Vec<_> = accounts.iter().map(|acc| acc.number()).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn advanced_search_uses_substring_containment() {
        let accounts = fixture();
        // the same partial number that the exact search rejects
        let found = advanced_search(
            &accounts,
            &AccountFilter {
                account_number: Some("1234567890".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(found.len(), 2);

        let found = advanced_search(
            &accounts,
            &AccountFilter {
                bik: Some("044525".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn advanced_search_conjunction() {
        let accounts = fixture();
        let found = advanced_search(
            &accounts,
            &AccountFilter {
                bik: Some("044525225".to_string()),
                owner_name: Some("petrov".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner_name(), "Ivan Petrov");

        // empty strings impose no constraint, same as None
        let found = advanced_search(
            &accounts,
            &AccountFilter {
                account_number: Some(String::new()),
                owner_name: Some("ivan".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn search_never_mutates_and_keeps_order() {
        let accounts = fixture();
        let all = search(&accounts, |_| true);
        assert_eq!(all.len(), accounts.len());
        for (found, original) in all.iter().zip(accounts.iter()) {
            assert_eq!(found.number(), original.number());
        }
    }
}
