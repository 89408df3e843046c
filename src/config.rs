/// Per-branch key holding the review server base URL.
pub const SERVER_KEY: &str = "rietveldserver";

/// Per-branch key holding the issue id on the review server.
pub const ISSUE_KEY: &str = "rietveldissue";

/// Exit status of `git config --get` when the key is not set.
pub const CONFIG_KEY_NOT_FOUND: i32 = 1;

/// Namespace under which `git for-each-ref` reports local branches.
pub const LOCAL_BRANCH_PREFIX: &str = "refs/heads/";

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn branch_key(branch: &str, name: &str) -> String {
    format!("branch.{}.{}", branch, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_key() {
        assert_eq!(branch_key("feature-1", SERVER_KEY), "branch.feature-1.rietveldserver");
        assert_eq!(branch_key("fix/typo", ISSUE_KEY), "branch.fix/typo.rietveldissue");
    }
}
