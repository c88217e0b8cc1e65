//! Checks that the unit test tree mirrors `src` and that every test file is wired up

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Files that organise modules or act as harness roots
    fn is_structural(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    /// Relative paths of every `.rs` file below `dir`
    fn rust_files(dir: &Path, base: &Path) -> io::Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files.extend(rust_files(&path, base)?);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_| io::Error::other("path outside base"))?;
                files.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(files)
    }

    fn mirrored_files(dir: &str) -> BTreeSet<String> {
        let root = Path::new(dir);
        rust_files(root, root)
            .unwrap_or_else(|error| unreachable!("Failed to read {dir}: {error}"))
            .into_iter()
            .filter(|relative| !is_structural(relative))
            .collect()
    }

    // Tests that every source module has a unit test file and vice versa
    #[test]
    fn test_unit_tests_mirror_src() {
        let sources = mirrored_files(SRC_DIR);
        let units = mirrored_files(UNIT_DIR);

        let missing: Vec<&String> = sources.difference(&units).collect();
        let orphaned: Vec<&String> = units.difference(&sources).collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests: {missing:?}"
        );
        assert!(
            orphaned.is_empty(),
            "Unit test files without a source file: {orphaned:?}"
        );
    }

    // Tests that each unit test directory declares all of its files
    #[test]
    fn test_unit_modules_declared() {
        let mut undeclared = Vec::new();

        for relative in mirrored_files(UNIT_DIR) {
            let path = Path::new(UNIT_DIR).join(&relative);
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let parent = path.parent().unwrap_or_else(|| Path::new(UNIT_DIR));
            let declaring = if parent == Path::new(UNIT_DIR) {
                parent.join("main.rs")
            } else {
                parent.join("mod.rs")
            };

            let declarations = fs::read_to_string(&declaring).unwrap_or_default();
            if !declarations.contains(&format!("mod {stem};")) {
                undeclared.push(relative);
            }
        }

        assert!(
            undeclared.is_empty(),
            "Unit test files not declared by their parent module: {undeclared:?}"
        );
    }

    // Tests that every non-structural test file contains at least one test
    #[test]
    fn test_all_test_files_contain_tests() {
        let root = Path::new("tests");
        let files = rust_files(root, root)
            .unwrap_or_else(|error| unreachable!("Failed to scan tests: {error}"));

        let empty: Vec<String> = files
            .into_iter()
            .filter(|relative| {
                let name = relative.rsplit('/').next().unwrap_or(relative);
                name != "main.rs" && name != "mod.rs"
            })
            .filter(|relative| {
                !fs::read_to_string(root.join(relative))
                    .is_ok_and(|content| content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function: {empty:?}"
        );
    }
}
