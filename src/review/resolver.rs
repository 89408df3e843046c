use crate::config::{branch_key, ISSUE_KEY, SERVER_KEY};
use crate::errors::Result;
use crate::git::GitCli;

/// Where a branch's review lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub server: String,
    pub issue: String,
}

impl IssueRef {
    /// Read the review reference of `branch` from git config.
    ///
    /// Returns `Ok(None)` when either key is unset; the issue key is not looked up when the
    /// server key is missing.
    pub fn lookup<G: GitCli + ?Sized>(git: &G, branch: &str) -> Result<Option<Self>> {
        let Some(server) = git.get_config(&branch_key(branch, SERVER_KEY))? else {
            return Ok(None);
        };
        let Some(issue) = git.get_config(&branch_key(branch, ISSUE_KEY))? else {
            return Ok(None);
        };
        Ok(Some(Self { server, issue }))
    }

    /// The status endpoint. Plain concatenation, nothing is escaped.
    pub fn url(&self) -> String {
        format!("{}/api/{}", self.server, self.issue)
    }
}

pub fn issue_url<G: GitCli + ?Sized>(git: &G, branch: &str) -> Result<Option<String>> {
    Ok(IssueRef::lookup(git, branch)?.map(|issue| issue.url()))
}
