//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then `use common::prelude::*;`.

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::xml;
    pub use super::TestFixture;
}

/// XML documents shaped like the server files.
#[allow(dead_code)]
pub mod xml {
    /// Vanilla types with zombie loot and food.
    pub const VANILLA_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>
<types>
    <type name="ZmbfSkull">
        <nominal>0</nominal>
        <lifetime>3600</lifetime>
        <restock>0</restock>
    </type>
    <type name="ZmbfBone">
        <nominal>0</nominal>
        <lifetime>7200</lifetime>
    </type>
    <type name="Apple">
        <nominal>20</nominal>
        <lifetime>900</lifetime>
    </type>
</types>
"#;

    /// Modded types: one zombie item lacks lifetime, one is overridden.
    pub const MODDED_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>
<types>
    <!-- zombie loot -->
    <type name="ZmbfSkull">
        <nominal>5</nominal>
        <restock>0</restock>
    </type>
    <type name="ZmbfBone">
        <nominal>5</nominal>
        <lifetime>60</lifetime>
    </type>
    <type name="Apple">
        <nominal>40</nominal>
        <lifetime>10</lifetime>
    </type>
</types>
"#;

    pub const GROUP_POSITIONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map>
    <group name="Land_Barn_Brick1" pos="1 2 3" rpy="0 0 0" a="0"/>
    <group name="Land_Shed_M1" pos="4 5 6" rpy="0 0 0" a="0"/>
</map>
"#;

    pub const GROUP_PROTO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<prototype>
    <group name="Land_Barn_Brick1" lootmax="6">
        <usage name="Farm"/>
        <container name="lootFloor" lootmax="4"/>
    </group>
    <group name="Land_Shed_M1" lootmax="2">
        <container name="lootFloor" lootmax="2"/>
    </group>
    <group name="Land_House_1W01" lootmax="3">
        <usage name="Town"/>
    </group>
</prototype>
"#;
}

/// A temporary directory populated with XML files.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Names of the files in the fixture directory, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path())
            .expect("Failed to list fixture")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// A command running in this fixture, isolated from the user's profiles.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("xml-keysync");
        cmd.current_dir(self.path())
            .env("XML_KEYSYNC_PROFILE_DIR", self.path().join("profiles"))
            .env_remove("XML_KEYSYNC_PROFILE")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
