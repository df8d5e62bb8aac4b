//! Compiler-wide configuration: build mode, output target, and the source
//! search path used to resolve `use` imports to files on disk.
//!
//! This is driver-level configuration, not something the resolver or TIR
//! layers read from a global: callers build one [`CompilerConfig`] and pass
//! it by reference to whatever needs it (module source resolution today;
//! the target directory once a bytecode emitter exists to write into it).

use std::path::{Path, PathBuf};

/// Build mode, selecting default source directories and the target subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerMode {
    Debug,
    Release,
    Test,
}

impl CompilerMode {
    /// Subdirectory name this mode contributes under the target root, e.g. `./build/debug`.
    pub fn target_subdir(&self) -> &'static str {
        match self {
            CompilerMode::Debug => "debug",
            CompilerMode::Release => "release",
            CompilerMode::Test => "test",
        }
    }
}

impl Default for CompilerMode {
    fn default() -> Self {
        CompilerMode::Debug
    }
}

impl std::str::FromStr for CompilerMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "debug" => Ok(CompilerMode::Debug),
            "release" => Ok(CompilerMode::Release),
            "test" => Ok(CompilerMode::Test),
            other => Err(format!("unknown mode '{other}', expected debug, release or test")),
        }
    }
}

/// Configuration recognized by the driver: build mode, bytecode output root,
/// and the ordered list of directories searched for imported module sources.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    pub mode: CompilerMode,
    pub target: PathBuf,
    pub include: Vec<PathBuf>,
}

impl CompilerConfig {
    /// Builds a config with the default target (`./build/<mode>`) and no search path.
    pub fn new(mode: CompilerMode) -> Self {
        let target = PathBuf::from("./build").join(mode.target_subdir());
        Self { mode, target, include: Vec::new() }
    }

    /// Adds a directory to the end of the import search path. Earlier entries
    /// shadow later ones, so directories should be added in priority order.
    pub fn add_include_dir(&mut self, dir: impl Into<PathBuf>) {
        self.include.push(dir.into());
    }

    /// Ensures the target directory tree exists, creating it if necessary.
    pub fn create_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.target)
    }

    /// Searches `include` in order for the source file backing a qualified
    /// module name such as `std.hash_map`, returning the first match.
    ///
    /// A qualified name's components are joined into a relative path
    /// (`std/hash_map.inko`) and resolved against each search directory.
    pub fn resolve_module_source(&self, qualified_name: &[&str]) -> Option<PathBuf> {
        if qualified_name.is_empty() {
            return None;
        }

        let mut relative = PathBuf::new();
        for component in qualified_name {
            relative.push(component);
        }
        relative.set_extension("inko");

        self.include
            .iter()
            .map(|dir| dir.join(&relative))
            .find(|candidate| candidate.is_file())
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new(CompilerMode::default())
    }
}

/// Splits a qualified module name (`std.hash_map`) into its path components.
pub fn qualified_name_components(qualified_name: &str) -> Vec<&str> {
    qualified_name.split('.').collect()
}

/// Joins path components back into the dotted qualified-name form used by
/// the module graph (`a/b/c` on disk, `a.b.c` as a qualified name).
pub fn path_to_qualified_name(path: &Path) -> String {
    path.iter()
        .map(|component| component.to_string_lossy())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_follows_mode() {
        let config = CompilerConfig::new(CompilerMode::Release);
        assert_eq!(config.target, PathBuf::from("./build/release"));
    }

    #[test]
    fn mode_parses_from_str() {
        assert_eq!("debug".parse::<CompilerMode>().unwrap(), CompilerMode::Debug);
        assert_eq!("release".parse::<CompilerMode>().unwrap(), CompilerMode::Release);
        assert_eq!("test".parse::<CompilerMode>().unwrap(), CompilerMode::Test);
        assert!("bogus".parse::<CompilerMode>().is_err());
    }

    #[test]
    fn resolve_module_source_searches_in_order() {
        let dir = std::env::temp_dir().join(format!("libinko-config-test-{}", std::process::id()));
        let shadowed = dir.join("shadowed");
        let winner = dir.join("winner");
        std::fs::create_dir_all(&shadowed).unwrap();
        std::fs::create_dir_all(&winner).unwrap();
        std::fs::write(shadowed.join("hash_map.inko"), "").unwrap();
        std::fs::write(winner.join("hash_map.inko"), "").unwrap();

        let mut config = CompilerConfig::default();
        config.add_include_dir(&winner);
        config.add_include_dir(&shadowed);

        let resolved = config.resolve_module_source(&["hash_map"]).unwrap();
        assert_eq!(resolved, winner.join("hash_map.inko"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn resolve_module_source_none_when_missing() {
        let config = CompilerConfig::default();
        assert!(config.resolve_module_source(&["does_not_exist"]).is_none());
    }
}
