//! Repository layout checks: every source file has a mirrored unit-test file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Entry points and module declaration files carry no logic of their own
    fn is_exempt(relative: &str) -> bool {
        matches!(relative, "lib.rs" | "main.rs") || relative.ends_with("mod.rs")
    }

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_| io::Error::other("path outside base directory"))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    fn mirrored(dir: &str) -> BTreeSet<String> {
        let base = Path::new(dir);
        let mut found = BTreeSet::new();
        rust_files(base, base, &mut found)
            .unwrap_or_else(|error| panic!("failed to scan {dir}: {error}"));
        found.into_iter().filter(|path| !is_exempt(path)).collect()
    }

    // Tests that each src file has tests/unit counterpart
    // Verified by adding an untested src/spatial file
    #[test]
    fn test_every_source_file_has_unit_tests() {
        let tests = mirrored(UNIT_DIR);
        let missing: Vec<String> = mirrored(SRC_DIR)
            .into_iter()
            .filter(|path| !tests.contains(path))
            .map(|path| format!("  - src/{path} -> {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests that no unit test file outlives its source file
    // Verified by adding tests/unit/spatial/orphan.rs
    #[test]
    fn test_every_unit_test_has_source_file() {
        let sources = mirrored(SRC_DIR);
        let orphaned: Vec<String> = mirrored(UNIT_DIR)
            .into_iter()
            .filter(|path| !sources.contains(path))
            .map(|path| format!("  - {UNIT_DIR}/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source file:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests that test files outside the exempt set contain at least one test
    // Verified by emptying tests/unit/io/configuration.rs
    #[test]
    fn test_all_test_files_contain_tests() {
        let base = Path::new("tests");
        let mut files = BTreeSet::new();
        rust_files(base, base, &mut files)
            .unwrap_or_else(|error| panic!("failed to scan tests: {error}"));

        let empty: Vec<String> = files
            .into_iter()
            .filter(|path| !is_exempt(path))
            .filter(|path| {
                fs::read_to_string(base.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
