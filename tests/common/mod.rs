//! Common test utilities for taxtree integration tests
//!
//! Writes small NCBI-style dump files into a temporary directory that lives
//! as long as the fixture.
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TaxonomyFixture {
    dir: TempDir,
    pub nodes: PathBuf,
    pub names: PathBuf,
}

impl TaxonomyFixture {
    pub fn new(nodes: &str, names: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let nodes_path = dir.path().join("nodes.dmp");
        let names_path = dir.path().join("names.dmp");
        std::fs::write(&nodes_path, nodes).expect("Failed to write nodes.dmp");
        std::fs::write(&names_path, names).expect("Failed to write names.dmp");

        Self {
            dir,
            nodes: nodes_path,
            names: names_path,
        }
    }

    /// Path for an extra file inside the fixture directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Root (1) -> genus Pinus (10) -> species Pinus taeda (100) and
    /// Pinus strobus (101)
    pub fn pinus() -> Self {
        Self::new(PINUS_NODES, PINUS_NAMES)
    }
}

/// The `taxtree` binary with no taxonomy paths inherited from the environment
pub fn taxtree_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taxtree").unwrap();
    cmd.env_remove("TAXTREE_NODES")
        .env_remove("TAXTREE_NAMES")
        .env_remove("RUST_LOG")
        .env("TAXTREE_LOG", "warn");
    cmd
}

pub const PINUS_NODES: &str = "\
1\t|\t1\t|\tno rank\t|\t\t|\t8\t|
10\t|\t1\t|\tgenus\t|\t\t|\t4\t|
100\t|\t10\t|\tspecies\t|\tPT\t|\t4\t|
101\t|\t10\t|\tspecies\t|\tPS\t|\t4\t|
";

pub const PINUS_NAMES: &str = "\
1\t|\troot\t|\t\t|\tscientific name\t|
10\t|\tPinus\t|\t\t|\tscientific name\t|
10\t|\tpines\t|\t\t|\tgenbank common name\t|
100\t|\tPinus taeda\t|\t\t|\tscientific name\t|
100\t|\tloblolly pine\t|\t\t|\tgenbank common name\t|
100\t|\tPinus taeda L.\t|\t\t|\tauthority\t|
101\t|\tPinus strobus\t|\t\t|\tscientific name\t|
101\t|\teastern white pine\t|\t\t|\tcommon name\t|
";
