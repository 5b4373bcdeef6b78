//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A credvault command isolated to this test's home and registry.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("credvault").expect("failed to find credvault binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("CREDVAULT_REGISTRY_DIR", self.registry_dir());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("CREDVAULT_PROFILE");
        cmd.env_remove("CREDVAULT_LOG");
        cmd.current_dir(self.home.path());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .unwrap_or_else(|e| panic!("failed to run credvault {:?}: {e}", args))
    }

    /// Shortcut for `credvault create EMAIL PASSWORD`.
    pub fn create(&self, email: &str, password: &str) -> Output {
        self.run(&["create", email, password])
    }

    /// Shortcut for `credvault create` with extra arguments.
    pub fn create_with(&self, email: &str, password: &str, extra: &[&str]) -> Output {
        let mut args = vec!["create", email, password];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    /// Shortcut for `credvault create --stdin`.
    pub fn create_stdin(&self, json: &str) -> Output {
        self.cmd()
            .args(["create", "--stdin"])
            .write_stdin(json)
            .output()
            .expect("failed to run credvault create --stdin")
    }

    pub fn show(&self, extra: &[&str]) -> Output {
        let mut args = vec!["show"];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    pub fn get(&self, field: &str) -> Output {
        self.run(&["get", field])
    }

    pub fn verify(&self, email: &str, password: &str) -> Output {
        self.run(&["verify", email, password])
    }

    pub fn check(&self) -> Output {
        self.run(&["check"])
    }

    pub fn check_json(&self) -> Output {
        self.run(&["check", "--json"])
    }

    pub fn check_binary(&self) -> Output {
        self.run(&["check", "--binary"])
    }

    /// Shortcut for `credvault profile ...`.
    pub fn profile(&self, args: &[&str]) -> Output {
        let mut full = vec!["profile"];
        full.extend_from_slice(args);
        self.run(&full)
    }

    /// Run any command against a registered profile.
    pub fn with_profile(&self, name: &str, args: &[&str]) -> Output {
        let mut full = vec!["--profile", name];
        full.extend_from_slice(args);
        self.run(&full)
    }
}
