use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway npm project with an isolated HOME.
pub struct Project {
    _tmp: TempDir,
    pub root: PathBuf,
    home: PathBuf,
}

impl Project {
    pub fn new(manifest: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("app");
        let home = tmp.path().join("home");
        fs::create_dir_all(root.join("node_modules")).expect("create node_modules");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::write(root.join("package.json"), manifest).expect("write manifest");
        Self {
            _tmp: tmp,
            root,
            home,
        }
    }

    /// Write `files` into `node_modules/<name>/`.
    pub fn install(&self, name: &str, files: &[(&str, &str)]) -> &Self {
        let dir = self.root.join("node_modules").join(name);
        fs::create_dir_all(&dir).expect("create package dir");
        for (file, content) in files {
            write(&dir.join(file), content);
        }
        self
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("license-scribe").expect("binary exists");
        cmd.env("HOME", &self.home).env_remove("RUST_LOG").arg(&self.root);
        cmd
    }

    pub fn read(&self, file: &str) -> String {
        fs::read_to_string(self.root.join(file)).expect("read report")
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    fs::write(path, content).expect("write file");
}
