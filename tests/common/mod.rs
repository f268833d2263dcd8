//! Common test utilities for family-loader integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A working directory for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the working directory
    pub path: PathBuf,
    /// Empty global configuration directory, isolating runs from the user's config
    config_home: TempDir,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let config_home = TempDir::new().expect("Failed to create config directory");
        Self {
            temp,
            path,
            config_home,
        }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write a resource package holding one definition with the given variants
    pub fn write_package(&self, path: &str, definition: &str, variants: &[&str]) {
        let mut yaml = format!(
            "format_version: 1\nkind: definition\ndefinition:\n  name: {definition}\n  category: Furniture\n  variants:\n"
        );
        for variant in variants {
            yaml.push_str(&format!(
                "    - name: \"{variant}\"\n      parameters: {{ width: 1.2, depth: 0.6 }}\n"
            ));
        }
        self.write_file(path, &yaml);
    }

    /// Write the global configuration file seen by commands from [`Self::cmd`]
    pub fn write_global_config(&self, content: &str) {
        std::fs::write(self.config_home.path().join("config.yaml"), content)
            .expect("Failed to write global config");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Read and parse a JSON artifact
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(path)).expect("Failed to parse artifact")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Get path to the family-loader binary
    pub fn family_loader_bin() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_family-loader"))
    }

    /// Command running the binary in this workspace, with an isolated global config
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(Self::family_loader_bin());
        cmd.current_dir(&self.path)
            .env("FAMILY_LOADER_CONFIG_DIR", self.config_home.path())
            .env_remove("RUST_LOG");
        cmd
    }
}
