#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the agent-readiness binary.
#[macro_export]
macro_rules! agent_readiness {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("agent-readiness"))
    };
}

/// A temporary repository to scan.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file, and any missing parent directories, in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".agent-readiness.toml", content);
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    /// A small Python project with linting, tests, CI and docs in place.
    pub fn python_project(&self) {
        self.create_file(
            "README.md",
            "# Demo\n\n## Installation\n\n```bash\npip install -e .\n```\n\n\
             ## Usage\n\nRun `demo --help`.\n\n## Testing\n\nRun `pytest`.\n",
        );
        self.create_file(
            "pyproject.toml",
            "[project]\nname = \"demo\"\nversion = \"0.1.0\"\n\n\
             [tool.ruff]\nline-length = 100\n\n[tool.mypy]\nstrict = true\n\n\
             [tool.pytest.ini_options]\ntestpaths = [\"tests\"]\n",
        );
        self.create_file(".pre-commit-config.yaml", "repos: []\n");
        self.create_file(
            ".github/workflows/ci.yml",
            "on: push\njobs:\n  test:\n    steps:\n      - run: pytest\n",
        );
        self.create_file(
            "demo/__init__.py",
            "import logging\nlogger = logging.getLogger(__name__)\n",
        );
        self.create_file("tests/test_demo.py", "def test_ok():\n    assert True\n");
        self.create_file("AGENTS.md", "# Agents\n\nRun `pytest` before committing.\n");
    }
}

/// Parse a JSON report printed on stdout.
pub fn json_report(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout should be JSON")
}
