//! End-to-end release runs against real temporary git repositories.
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use relcut::{
    command::SystemRunner,
    config::ReleaseConfig,
    confirm::Confirm,
    orchestrator::{Orchestrator, Outcome},
    result::Result,
    version::ReleaseVersion,
};

const CHANGELOG: &str = "\
# demo

See /tree/master/docs and /blob/master/demo.py on the master branch.

**1.x.x (2024-xx-xx)**

- pending change

**1.1.0 (2024-01-15)**

- earlier change
";

/// Answers the confirmation prompt with a fixed decision.
struct Scripted(bool);

impl Confirm for Scripted {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

struct TestContext {
    origin: TempDir,
    work: TempDir,
}

impl TestContext {
    /// A work repository on master with a release branch, both pushed to a
    /// bare origin.
    fn new() -> Self {
        let origin = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();

        git(origin.path(), &["init", "--bare", "."]);
        git(origin.path(), &["symbolic-ref", "HEAD", "refs/heads/master"]);

        git(work.path(), &["init", "."]);
        git(work.path(), &["symbolic-ref", "HEAD", "refs/heads/master"]);
        git(work.path(), &["config", "user.name", "Test"]);
        git(work.path(), &["config", "user.email", "test@example.com"]);
        git(work.path(), &["config", "commit.gpgsign", "false"]);

        fs::write(work.path().join("README.md"), CHANGELOG).unwrap();
        git(work.path(), &["add", "README.md"]);
        git(work.path(), &["commit", "-m", "initial"]);
        git(work.path(), &["branch", "release"]);

        let origin_path = origin.path().to_str().unwrap().to_string();
        git(work.path(), &["remote", "add", "origin", &origin_path]);
        git(work.path(), &["push", "origin", "master", "release"]);

        Self { origin, work }
    }

    fn config(&self) -> ReleaseConfig {
        ReleaseConfig {
            version: ReleaseVersion::parse("1.2.3").unwrap(),
            app_name: "demo".to_string(),
            root: self.work.path().to_path_buf(),
            changelog: "README.md".to_string(),
            main_branch: "master".to_string(),
            release_branch: "release".to_string(),
            remote: "origin".to_string(),
            // something guaranteed non-interactive stands in for gitk
            viewer: vec!["git".to_string(), "--version".to_string()],
            release_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn run(&self, approve: bool) -> Result<Outcome> {
        let config = self.config();
        let runner = SystemRunner::new(config.root.clone());
        let mut confirm = Scripted(approve);
        Orchestrator::new(&config, &runner, &mut confirm).execute()
    }

    fn work_rev(&self, reference: &str) -> String {
        git(self.work.path(), &["rev-parse", reference])
            .trim()
            .to_string()
    }

    fn origin_rev(&self, reference: &str) -> String {
        git(self.origin.path(), &["rev-parse", reference])
            .trim()
            .to_string()
    }

    fn readme(&self) -> String {
        fs::read_to_string(self.work.path().join("README.md")).unwrap()
    }
}

#[test_log::test]
fn confirmed_run_publishes_branches_and_tag() {
    let ctx = TestContext::new();

    let outcome = ctx.run(true).unwrap();
    assert_eq!(outcome, Outcome::Pushed);

    // both branches and the tag arrived at the origin
    assert_eq!(ctx.origin_rev("master"), ctx.work_rev("master"));
    assert_eq!(ctx.origin_rev("release"), ctx.work_rev("release"));
    assert_eq!(
        ctx.origin_rev("refs/tags/demo-1.2.3"),
        ctx.work_rev("release")
    );

    // the release branch carries the dated, tag-pinned document
    let released =
        git(ctx.work.path(), &["show", "release:README.md"]);
    assert!(released.contains("**1.2.3 (2024-05-01)**"));
    assert!(released.contains("/tree/demo-1.2.3/docs"));
    assert!(released.contains("/blob/demo-1.2.3/demo.py"));
    assert!(!released.contains("**1.x.x (2024-xx-xx)**"));

    // master moved on to the next iteration with original URLs
    let next = ctx.readme();
    assert!(next.contains("**1.x.x (2024-xx-xx)**\n\n- ...\n\n"));
    assert!(next.contains("**1.2.3 (2024-05-01)**"));
    assert!(next.contains("/tree/master/docs"));

    // master is exactly two commits ahead of the tagged release commit
    assert_eq!(ctx.work_rev("master~2"), ctx.work_rev("release~1"));
}

#[test_log::test]
fn declined_run_restores_local_state() {
    let ctx = TestContext::new();

    let master_before = ctx.work_rev("master");
    let release_before = ctx.work_rev("release");

    let outcome = ctx.run(false).unwrap();
    assert_eq!(outcome, Outcome::RolledBack);

    assert_eq!(ctx.work_rev("master"), master_before);
    assert_eq!(ctx.work_rev("release"), release_before);
    assert_eq!(ctx.readme(), CHANGELOG);

    let tags = git(ctx.work.path(), &["tag", "-l"]);
    assert_eq!(tags.trim(), "");

    // the run ends back on the main branch
    let branch = git(ctx.work.path(), &["branch", "--show-current"]);
    assert_eq!(branch.trim(), "master");
}

#[test_log::test]
fn wrong_branch_fails_without_side_effects() {
    let ctx = TestContext::new();
    git(ctx.work.path(), &["checkout", "-b", "feature"]);

    let master_before = ctx.work_rev("master");

    let result = ctx.run(false);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("feature"));

    assert_eq!(ctx.work_rev("master"), master_before);
    assert_eq!(ctx.readme(), CHANGELOG);
    let tags = git(ctx.work.path(), &["tag", "-l"]);
    assert_eq!(tags.trim(), "");
}

#[test_log::test]
fn diverged_release_branch_fails_the_merge() {
    let ctx = TestContext::new();

    // move the release branch off the master history
    git(ctx.work.path(), &["checkout", "release"]);
    fs::write(ctx.work.path().join("other.txt"), "divergence").unwrap();
    git(ctx.work.path(), &["add", "other.txt"]);
    git(ctx.work.path(), &["commit", "-m", "diverge"]);
    git(ctx.work.path(), &["checkout", "master"]);

    let result = ctx.run(true);
    assert!(result.is_err());
}
