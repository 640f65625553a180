//! Throwaway repositories with hand-shaped histories
#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature};
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }
        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit whose tree only records `message`
    pub fn commit(&self, message: &str, parents: &[Oid]) -> Oid {
        let blob = self.repo.blob(message.as_bytes()).unwrap();
        let mut builder = self.repo.treebuilder(None).unwrap();
        builder.insert("history.txt", blob, 0o100644).unwrap();
        let tree = self.repo.find_tree(builder.write().unwrap()).unwrap();

        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let parents: Vec<Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).unwrap())
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Linear commits on top of `base`, returning the tip
    pub fn chain(&self, base: Oid, messages: &[&str]) -> Oid {
        messages
            .iter()
            .fold(base, |parent, message| self.commit(message, &[parent]))
    }

    pub fn tag(&self, name: &str, id: Oid) {
        let object = self.repo.find_object(id, None).unwrap();
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn branch(&self, name: &str, id: Oid) {
        let commit = self.repo.find_commit(id).unwrap();
        self.repo
            .branch(name, &commit, true)
            .expect("Could not create branch");
    }

    pub fn remote_branch(&self, name: &str, id: Oid) {
        self.repo
            .reference(&format!("refs/remotes/{}", name), id, true, "test setup")
            .expect("Could not create remote-tracking branch");
    }

    pub fn checkout(&self, branch: &str) {
        self.repo
            .set_head(&format!("refs/heads/{}", branch))
            .expect("Could not set HEAD");
    }
}

/// Commits of the feature-branch history
pub struct FeatureHistory {
    pub root: Oid,
    pub tag: Oid,
    pub merged: Oid,
    pub m1: Oid,
    pub m2: Oid,
    pub topic: Oid,
}

/// Release on main, two merges, then a five-commit topic branch
///
/// ```text
/// root - t(gmic-3.2.0) ---- M1 ---- M2   (main)
///          \               /  \    /  \
///           f1 ------------    g1      x1 - x2 - x3 - x4 - x5   (topic)
/// ```
pub fn feature_history(repo: &TestRepo) -> FeatureHistory {
    let root = repo.commit("root", &[]);
    repo.tag("versioning-start", root);
    let tag = repo.commit("release 3.2.0", &[root]);
    repo.tag("gmic-3.2.0", tag);

    let merged = repo.commit("f1", &[tag]);
    let m1 = repo.commit("Merge f1", &[tag, merged]);
    let g1 = repo.commit("g1", &[m1]);
    let m2 = repo.commit("Merge g1", &[m1, g1]);
    let topic = repo.chain(m2, &["x1", "x2", "x3", "x4", "x5"]);

    repo.branch("main", m2);
    repo.branch("topic", topic);
    repo.checkout("topic");

    FeatureHistory {
        root,
        tag,
        merged,
        m1,
        m2,
        topic,
    }
}

/// Release cut on a side branch and merged into main
///
/// ```text
/// root - p1 ---- M1   (main)
///    \          /
///     r1 - t(gmic-3.2.0)
/// ```
pub fn release_branch_history(repo: &TestRepo) -> Oid {
    let root = repo.commit("root", &[]);
    repo.tag("versioning-start", root);
    let p1 = repo.commit("p1", &[root]);
    let tag = repo.chain(root, &["r1", "release 3.2.0"]);
    repo.tag("gmic-3.2.0", tag);
    let m1 = repo.commit("Merge release", &[p1, tag]);
    repo.branch("main", m1);
    repo.checkout("main");
    m1
}

/// Release tagged on a branch that never reached main
///
/// ```text
/// root - p1                       (main)
///    \
///     a1(gmic-3.2.0) - b1 - c1 - d1   (abandoned)
///                 \        /
///                  y1 ----
/// ```
pub fn abandoned_release_history(repo: &TestRepo) -> Oid {
    let root = repo.commit("root", &[]);
    repo.tag("versioning-start", root);
    let p1 = repo.commit("p1", &[root]);
    let tag = repo.commit("release 3.2.0", &[root]);
    repo.tag("gmic-3.2.0", tag);
    let b1 = repo.commit("b1", &[tag]);
    let y1 = repo.commit("y1", &[tag]);
    let c1 = repo.commit("Merge y1", &[b1, y1]);
    let d1 = repo.commit("d1", &[c1]);
    repo.branch("main", p1);
    repo.branch("abandoned", d1);
    repo.checkout("abandoned");
    d1
}
