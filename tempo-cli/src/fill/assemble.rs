//! Join Jira issues with Tempo accounts
//!
//! An issue contributes an entry only when it carries an account
//! reference and that reference resolves against the fetched accounts.
//! Issues without one, and references to unknown accounts, are skipped
//! without diagnostics.

use std::collections::HashMap;

use crate::api::jira::Issue;
use crate::api::tempo::Account;

/// Issue key to resolved Tempo account
pub type AccountIndex = HashMap<String, Account>;

/// Build the issue-to-account index from the two API responses
pub fn assemble_account_index(issues: &[Issue], accounts: &[Account]) -> AccountIndex {
    let mut index = AccountIndex::with_capacity(issues.len());

    for issue in issues {
        let reference = match issue.fields.as_ref().and_then(|f| f.tempo_account.as_ref()) {
            Some(reference) => reference,
            None => continue, // no account set on the issue
        };
        // linear scan, first match wins
        let account = match accounts.iter().find(|a| a.id == reference.id) {
            Some(account) => account,
            None => continue,
        };
        let previous = index.insert(issue.key.clone(), account.clone());
        assert!(
            previous.is_none(),
            "duplicate issue key in search results: {}",
            issue.key
        );
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::jira::{AccountReference, IssueFields};

    fn issue(key: &str, account_id: Option<i64>) -> Issue {
        Issue {
            key: key.to_string(),
            fields: Some(IssueFields {
                tempo_account: account_id.map(|id| AccountReference { id }),
            }),
        }
    }

    fn account(id: i64, key: &str) -> Account {
        Account {
            id,
            key: key.to_string(),
            name: format!("Account {}", key),
        }
    }

    #[test]
    fn test_assemble_matches_reference_ids() {
        let issues = vec![issue("PROJ-1", Some(7)), issue("PROJ-2", Some(9))];
        let accounts = vec![account(7, "ACC-X"), account(9, "ACC-Y")];

        let index = assemble_account_index(&issues, &accounts);
        assert_eq!(index.len(), 2);
        assert_eq!(index["PROJ-1"].key, "ACC-X");
        assert_eq!(index["PROJ-2"].key, "ACC-Y");
    }

    #[test]
    fn test_assemble_skips_issues_without_account() {
        let issues = vec![
            issue("PROJ-1", Some(7)),
            issue("PROJ-2", None),
            Issue {
                key: "PROJ-3".to_string(),
                fields: None,
            },
        ];
        let accounts = vec![account(7, "ACC-X")];

        let index = assemble_account_index(&issues, &accounts);
        assert_eq!(index.len(), 1);
        assert!(index.contains_key("PROJ-1"));
    }

    #[test]
    fn test_assemble_skips_unknown_account_ids() {
        let issues = vec![issue("PROJ-1", Some(404))];
        let accounts = vec![account(7, "ACC-X")];

        assert!(assemble_account_index(&issues, &accounts).is_empty());
    }

    #[test]
    fn test_assemble_first_account_match_wins() {
        let issues = vec![issue("PROJ-1", Some(7))];
        let accounts = vec![account(7, "ACC-FIRST"), account(7, "ACC-SECOND")];

        let index = assemble_account_index(&issues, &accounts);
        assert_eq!(index["PROJ-1"].key, "ACC-FIRST");
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let issues = vec![issue("PROJ-1", Some(7)), issue("PROJ-2", Some(7))];
        let accounts = vec![account(7, "ACC-X")];

        let first = assemble_account_index(&issues, &accounts);
        let second = assemble_account_index(&issues, &accounts);
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "duplicate issue key")]
    fn test_assemble_panics_on_duplicate_issue_key() {
        let issues = vec![issue("PROJ-1", Some(7)), issue("PROJ-1", Some(7))];
        let accounts = vec![account(7, "ACC-X")];

        assemble_account_index(&issues, &accounts);
    }
}
