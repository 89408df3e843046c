use crate::{
    errors::{ClosedBranchesError, FetchError, Result},
    git::GitCli,
    review::{issue_url, StatusSource},
};
use std::io::Write;
use std::sync::{mpsc, Arc};

/// Check one branch against its review server.
///
/// Returns the branch name when its issue is closed. Branches without a review, and branches
/// whose status cannot be fetched, yield `Ok(None)`; only git failures are errors.
pub fn check_branch<G, S>(git: &G, source: &S, branch: &str) -> Result<Option<String>>
where
    G: GitCli + ?Sized,
    S: StatusSource + ?Sized,
{
    let Some(url) = issue_url(git, branch)? else {
        log::debug!("branch {:?} has no review configured", branch);
        return Ok(None);
    };

    match source.fetch(&url) {
        Ok(status) if status.closed => Ok(Some(branch.to_string())),
        Ok(_) => Ok(None),
        Err(FetchError::Request(err)) => {
            log::warn!("error fetching {:?} for branch {:?}: {}", url, branch, err);
            Ok(None)
        }
        Err(FetchError::Status(status)) => {
            log::warn!(
                "unexpected status code fetching {:?} for branch {:?}: {}",
                url,
                branch,
                status
            );
            Ok(None)
        }
        Err(err) => {
            log::warn!("json decoding error for branch {:?}: {}", branch, err);
            Ok(None)
        }
    }
}

/// Check every local branch concurrently and write the closed ones to `out`, one per line.
///
/// Each branch gets its own thread. Lines are written as results arrive, so their order is not
/// fixed. The first git failure aborts the run without waiting for the remaining checks.
pub fn run<G, S>(git: Arc<G>, source: Arc<S>, out: &mut dyn Write) -> Result<Vec<String>>
where
    G: GitCli + Send + Sync + 'static,
    S: StatusSource + Send + Sync + 'static,
{
    let branches = git.branches()?;
    let (tx, rx) = mpsc::channel();

    for branch in &branches {
        let tx = tx.clone();
        let git = Arc::clone(&git);
        let source = Arc::clone(&source);
        let branch = branch.clone();

        std::thread::Builder::new()
            .name(format!("check {}", branch))
            .spawn(move || {
                let outcome = check_branch(git.as_ref(), source.as_ref(), &branch);
                // The receiver is gone only once the run has already failed.
                let _ = tx.send((branch, outcome));
            })?;
    }
    drop(tx);

    let mut closed = Vec::new();
    let mut received = 0;
    for (branch, outcome) in rx {
        received += 1;
        log::debug!("branch {:?} checked", branch);
        if let Some(branch) = outcome? {
            writeln!(out, "{}", branch)?;
            closed.push(branch);
        }
    }

    if received != branches.len() {
        return Err(ClosedBranchesError::WorkerLost {
            expected: branches.len(),
            received,
        });
    }

    Ok(closed)
}
