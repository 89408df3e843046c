use crate::config::{CONFIG_KEY_NOT_FOUND, LOCAL_BRANCH_PREFIX};
use crate::errors::{ClosedBranchesError, Result};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Read-only access to the repository the tool runs in.
pub trait GitCli {
    /// Look up a configuration key. `Ok(None)` means the key is not set.
    fn get_config(&self, key: &str) -> Result<Option<String>>;

    /// Names of all local branches, in the order git reports them.
    fn branches(&self) -> Result<Vec<String>>;
}

/// Runs the `git` binary, either in the current directory or in `work_dir`.
#[derive(Debug, Clone, Default)]
pub struct GitCliImpl {
    work_dir: Option<PathBuf>,
}

impl GitCliImpl {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(work_dir.into()),
        }
    }

    fn run_command(&self, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.work_dir {
            cmd.arg("-C").arg(dir);
        }
        cmd.args(args);
        cmd.stdin(Stdio::null());

        cmd.output().map_err(|source| ClosedBranchesError::GitExec {
            command: args.join(" "),
            source,
        })
    }
}

fn command_failed(args: &[&str], output: &Output) -> ClosedBranchesError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    ClosedBranchesError::Git(format!(
        "`git {}` exited with {}: {}",
        args.join(" "),
        output.status,
        stderr.trim()
    ))
}

/// Strip git's line terminator from a single-value output.
pub fn trim_line(stdout: &[u8]) -> String {
    let out = String::from_utf8_lossy(stdout);
    out.strip_suffix('\n').unwrap_or(&out).to_string()
}

/// Turn `for-each-ref --format=%(refname)` output into bare branch names.
pub fn parse_branches(stdout: &str) -> Vec<String> {
    stdout
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix(LOCAL_BRANCH_PREFIX).unwrap_or(line).to_string())
        .collect()
}

impl GitCli for GitCliImpl {
    fn get_config(&self, key: &str) -> Result<Option<String>> {
        let args = ["config", "--get", key];
        let output = self.run_command(&args)?;

        if output.status.code() == Some(CONFIG_KEY_NOT_FOUND) {
            log::debug!("config key {} is not set", key);
            return Ok(None);
        }
        if !output.status.success() {
            return Err(command_failed(&args, &output));
        }

        Ok(Some(trim_line(&output.stdout)))
    }

    fn branches(&self) -> Result<Vec<String>> {
        let args = ["for-each-ref", "--format=%(refname)", LOCAL_BRANCH_PREFIX];
        let output = self.run_command(&args)?;

        if !output.status.success() {
            return Err(command_failed(&args, &output));
        }

        let branches = parse_branches(&String::from_utf8_lossy(&output.stdout));
        log::debug!("found {} local branches", branches.len());
        Ok(branches)
    }
}

#[cfg(test)]
pub struct MockGitCli {
    pub branches: Vec<String>,
    pub config: std::collections::HashMap<String, String>,
    pub broken_keys: Vec<String>,
    pub lookups: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockGitCli {
    pub fn new() -> Self {
        Self {
            branches: Vec::new(),
            config: std::collections::HashMap::new(),
            broken_keys: Vec::new(),
            lookups: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_branches(mut self, branches: &[&str]) -> Self {
        self.branches = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    /// Make lookups of `key` fail the way a broken repository would.
    pub fn with_broken_key(mut self, key: &str) -> Self {
        self.broken_keys.push(key.to_string());
        self
    }

    pub fn get_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl GitCli for MockGitCli {
    fn get_config(&self, key: &str) -> Result<Option<String>> {
        self.lookups.lock().unwrap().push(key.to_string());
        if self.broken_keys.iter().any(|k| k == key) {
            return Err(ClosedBranchesError::Git(format!("cannot read {}", key)));
        }
        Ok(self.config.get(key).cloned())
    }

    fn branches(&self) -> Result<Vec<String>> {
        Ok(self.branches.clone())
    }
}
