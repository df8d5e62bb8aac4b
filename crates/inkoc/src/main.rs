//! Inko Language Compiler Executable
//!
//! This is the main executable for the Inko programming language compiler.
//! It demonstrates the compilation pipeline by processing example Inko code
//! through parsing and type checking stages.
//!
//! # Current Implementation
//!
//! The current implementation serves as a test harness and demonstration of
//! the compiler's capabilities. It:
//!
//! 1. Sets up logging for error reporting
//! 2. Defines sample Inko code for two modules (`lib` and `main`)
//! 3. Parses both modules into ASTs
//! 4. Performs type checking and builds the TIR
//! 5. Reports any compilation errors with detailed diagnostics
//!
//! # Sample Code
//!
//! The compiler processes a multi-module example that demonstrates:
//! - Interface definitions
//! - Class implementations
//! - Function definitions
//! - Module imports and usage
//! - Cross-module type references
//!
//! # Error Reporting
//!
//! All compilation errors are displayed using rich diagnostic output
//! via the [`CodeSpanReportGenerator`] which provides:
//! - Source code location highlighting
//! - Error context and suggestions
//! - Color-coded terminal output
//!
//! # Future Development
//!
//! This executable will evolve to:
//! - Accept command-line arguments for input files
//! - Support various output formats
//! - Provide compilation options and flags
//! - Generate target code or bytecode

use std::{collections::HashSet, process::exit};

use libinko::{
    ast::{FileAst, FileStatementAst},
    config::{CompilerConfig, CompilerMode},
    error::{CodeSpanReportGenerator, ReportGenerator},
    file::SourceFile,
    nom_tools::State,
    process_ast,
    process_code,
    tir::{generator::{self, CodeObject}, TirError},
};
use log::LevelFilter;
use simplelog::{
    ColorChoice,
    CombinedLogger,
    ConfigBuilder,
    LevelPadding,
    TermLogger,
    TerminalMode,
    ThreadLogMode
};

/// Main entry point for the Inko compiler.
///
/// Processes Inko source files from command line arguments and demonstrates the
/// complete compilation pipeline from source code to type-checked TIR.
///
/// # Process Flow
///
/// 1. **Logging Setup**: Configure error-level logging with color output
/// 2. **Argument Processing**: Read source files and options from command line arguments
/// 3. **Discovery**: Follow `use` imports into the configured search path
/// 4. **Parsing**: Convert source code to ASTs for all modules
/// 5. **Type Checking**: Build TIR with cross-module type resolution
/// 6. **Error Handling**: Display rich diagnostics for any compilation errors
///
/// # Error Handling
///
/// The compiler exits with status code 1 if any compilation errors occur.
/// All errors are displayed with detailed source location information.
///
/// # Usage
///
/// ```
/// inkoc [--mode debug|release|test] [--target DIR] [--include DIR]... file1.inko file2.inko ...
/// ```
///
/// # Returns
///
/// * `Ok(())` - Compilation completed successfully
/// * `Err(TirError)` - Should not occur as errors are handled internally
fn main() -> Result<(), TirError> {
    // Configure logging for error reporting
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Error)
        .set_thread_mode(ThreadLogMode::Both)
        .set_level_padding(LevelPadding::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Error,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto
    )]).unwrap();

    // Get command line arguments
    let args: Vec<String> = std::env::args().collect();

    let (config, entry_files) = parse_args(&args);

    if entry_files.is_empty() {
        eprintln!("Usage: {} [--mode debug|release|test] [--target DIR] [--include DIR]... file1.inko file2.inko ...", args[0]);
        exit(1);
    }

    let include_dirs: Vec<String> = config.include.iter().map(|dir| dir.to_string_lossy().into_owned()).collect();
    let target_dir = config.target.to_string_lossy().into_owned();

    for entry_file in &entry_files {
        let output = compile_main(entry_file, config.mode, Some(&target_dir), &include_dirs);

        if output.diagnostics.is_empty() {
            println!("Compilation successful!");
        } else {
            for diagnostic in output.diagnostics {
                CodeSpanReportGenerator::generate(diagnostic);
            }
            exit(1);
        }
    }

    Ok(())
}

/// The result of compiling a single entry file and every module it
/// transitively imports: the generated code object for the entry module
/// (`None` if compilation failed at any stage) and the diagnostics
/// collected along the way (empty on success).
pub struct CompileOutput {
    pub module: Option<CodeObject>,
    pub diagnostics: Vec<TirError>,
}

/// Runs the full compilation pipeline for `path`: import discovery, parsing,
/// type resolution, and TIR code generation. Mirrors the CLI's own pipeline
/// so both the binary and embedders (tests, tooling) share one entry point.
pub fn compile_main(path: &str, mode: CompilerMode, target_dir: Option<&str>, include_dirs: &[String]) -> CompileOutput {
    let mut config = CompilerConfig::new(mode);
    if let Some(target_dir) = target_dir {
        config.target = target_dir.into();
    }
    for dir in include_dirs {
        config.add_include_dir(dir.clone());
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        let parent = if parent.as_os_str().is_empty() { std::path::Path::new(".") } else { parent };
        config.add_include_dir(parent);
    }

    let mut file_paths: Vec<String> = Vec::new();
    let mut seen_modules: HashSet<String> = HashSet::new();
    discover_file(path, &config, &mut seen_modules, &mut file_paths);

    let mut states = Vec::with_capacity(file_paths.len());
    for file_path in &file_paths {
        let module_name = module_name_from_path(file_path);
        let content = match std::fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(_) => return CompileOutput { module: None, diagnostics: vec![TirError::TemporaryError] },
        };
        states.push(State::new(SourceFile::new(vec![module_name], content)));
    }

    let mut asts = Vec::with_capacity(states.len());
    for state in &states {
        match process_code(state) {
            Ok(ast) => asts.push(ast.into()),
            Err(error) => return CompileOutput { module: None, diagnostics: vec![error] },
        }
    }

    let entry_module = module_name_from_path(path);

    let context = match process_ast(asts) {
        Ok(context) => context,
        Err(error) => return CompileOutput { module: None, diagnostics: flatten_diagnostics(error) },
    };

    match generator::generate_module(&context, &entry_module) {
        Ok(module) => CompileOutput { module: Some(module), diagnostics: Vec::new() },
        Err(error) => CompileOutput { module: None, diagnostics: flatten_diagnostics(error) },
    }
}

/// Expands a possible `TirError::ErrorCollection` into its individual
/// diagnostics; any other error becomes a single-element list.
fn flatten_diagnostics(error: TirError) -> Vec<TirError> {
    match error {
        TirError::ErrorCollection(collection) => collection.errors,
        other => vec![other],
    }
}

/// Splits argv into a [`CompilerConfig`] (`--mode`, `--target`, repeatable
/// `--include`) and the remaining positional source file paths.
fn parse_args(args: &[String]) -> (CompilerConfig, Vec<String>) {
    let mut mode = CompilerMode::default();
    let mut target = None;
    let mut include_dirs = Vec::new();
    let mut entry_files = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--mode" => {
                let value = iter.next().unwrap_or_else(|| {
                    eprintln!("--mode requires a value (debug, release, or test)");
                    exit(1);
                });
                mode = value.parse().unwrap_or_else(|error| {
                    eprintln!("{error}");
                    exit(1);
                });
            }
            "--target" => {
                let value = iter.next().unwrap_or_else(|| {
                    eprintln!("--target requires a directory path");
                    exit(1);
                });
                target = Some(value.clone());
            }
            "--include" => {
                let value = iter.next().unwrap_or_else(|| {
                    eprintln!("--include requires a directory path");
                    exit(1);
                });
                include_dirs.push(value.clone());
            }
            other => entry_files.push(other.to_string()),
        }
    }

    let mut config = CompilerConfig::new(mode);
    if let Some(target) = target {
        config.target = target.into();
    }
    for dir in include_dirs {
        config.add_include_dir(dir);
    }
    // The directory each entry file lives in is always searched, so sibling
    // modules resolve without requiring an explicit `--include`.
    for entry_file in &entry_files {
        if let Some(parent) = std::path::Path::new(entry_file).parent() {
            let parent = if parent.as_os_str().is_empty() { std::path::Path::new(".") } else { parent };
            config.add_include_dir(parent);
        }
    }

    (config, entry_files)
}

/// Recursively walks a file's `use` imports, resolving each referenced
/// module against `config`'s search path and visiting it first, so that
/// `file_paths` ends up in dependency-first (topological) order — every
/// module appears only after the modules it imports.
fn discover_file(file_path: &str, config: &CompilerConfig, seen_modules: &mut HashSet<String>, file_paths: &mut Vec<String>) {
    let module_name = module_name_from_path(file_path);
    if !seen_modules.insert(module_name.clone()) {
        return;
    }

    let content = match std::fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("Error reading file {file_path}: {error}");
            exit(1);
        }
    };

    // Parsed here purely to read its imports; re-parsed once the full file
    // list (and thus a non-reallocating `states` vector) is known.
    let discovery_state = State::new(SourceFile::new(vec![module_name], content));
    if let Ok(ast) = process_code(&discovery_state) {
        for module in imported_module_names(&ast) {
            if seen_modules.contains(&module) {
                continue;
            }
            let components: Vec<&str> = module.split('.').collect();
            if let Some(source_path) = config.resolve_module_source(&components) {
                discover_file(&source_path.to_string_lossy(), config, seen_modules, file_paths);
            }
        }
    }

    file_paths.push(file_path.to_string());
}

/// Derives a module name from a source file path by stripping the `.inko`
/// extension and any directory components.
fn module_name_from_path(file_path: &str) -> String {
    file_path.strip_suffix(".inko")
        .or_else(|| file_path.strip_suffix("/"))
        .unwrap_or(file_path)
        .split('/')
        .next_back()
        .unwrap_or(file_path)
        .to_string()
}

/// Collects the qualified module name referenced by every `use` statement in
/// a parsed file, for driver-level module-source discovery (`SPEC_FULL.md`
/// §6). A qualified name is every path component except the last (the
/// imported item); a single-component `use module;` import names the module
/// itself.
fn imported_module_names(ast: &FileAst<'_>) -> Vec<String> {
    ast.statements
        .iter()
        .filter_map(|statement| match statement {
            FileStatementAst::Use(use_ast) => {
                let components: Vec<&str> = use_ast.import.paths.iter().map(|span| span.text).collect();
                let module_components = if components.len() > 1 {
                    &components[..components.len() - 1]
                } else {
                    &components[..]
                };
                if module_components.is_empty() {
                    None
                } else {
                    Some(module_components.join("."))
                }
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use libinko::{file::SourceFile, process_code};

    #[test]
    fn module_name_from_path_strips_directory_and_extension() {
        assert_eq!(module_name_from_path("lang/testlib.inko"), "testlib");
        assert_eq!(module_name_from_path("testlib.inko"), "testlib");
        assert_eq!(module_name_from_path("a/b/c.inko"), "c");
    }

    #[test]
    fn parse_args_splits_flags_from_files() {
        let args = vec![
            "inkoc".to_string(),
            "--mode".to_string(),
            "release".to_string(),
            "--include".to_string(),
            "lib".to_string(),
            "main.inko".to_string(),
        ];
        let (config, entry_files) = parse_args(&args);
        assert_eq!(config.mode, CompilerMode::Release);
        assert_eq!(entry_files, vec!["main.inko".to_string()]);
        // The entry file's own directory is always added alongside explicit includes.
        assert!(config.include.iter().any(|dir| dir == std::path::Path::new("lib")));
    }

    #[test]
    fn parse_args_defaults_to_debug_mode_with_no_flags() {
        let args = vec!["inkoc".to_string(), "main.inko".to_string()];
        let (config, entry_files) = parse_args(&args);
        assert_eq!(config.mode, CompilerMode::Debug);
        assert_eq!(entry_files, vec!["main.inko".to_string()]);
    }

    #[test]
    fn compile_main_generates_entry_module_code_object() {
        let dir = std::env::temp_dir().join("inkoc_compile_main_success");
        std::fs::create_dir_all(&dir).unwrap();
        let entry_path = dir.join("main.inko");
        std::fs::write(&entry_path, "func main(): string {}").unwrap();

        let output = compile_main(entry_path.to_str().unwrap(), CompilerMode::Debug, None, &[]);

        assert!(output.diagnostics.is_empty());
        let module = output.module.expect("expected a generated code object");
        assert!(module.children.iter().any(|child| child.name == "main"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn compile_main_reports_diagnostics_for_undefined_method() {
        let dir = std::env::temp_dir().join("inkoc_compile_main_failure");
        std::fs::create_dir_all(&dir).unwrap();
        let entry_path = dir.join("main.inko");
        std::fs::write(&entry_path, "func main(): string { does_not_exist(); }").unwrap();

        let output = compile_main(entry_path.to_str().unwrap(), CompilerMode::Debug, None, &[]);

        assert!(output.module.is_none());
        assert!(!output.diagnostics.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn imported_module_names_extracts_module_prefix() {
        let state = State::new(SourceFile::new(
            vec!["main".into()],
            "use testlib.PublicClass;\nuse testlib.publicFunction;\nuse otherlib;\n".to_string(),
        ));
        let ast = process_code(&state).unwrap();
        let mut modules = imported_module_names(&ast);
        modules.sort();
        assert_eq!(modules, vec!["otherlib".to_string(), "testlib".to_string(), "testlib".to_string()]);
    }
}
