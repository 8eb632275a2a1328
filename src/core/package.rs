//! On-disk form of a single target.
//!
//! A package is a directory named after the target holding a `BUILD`
//! descriptor and a number of stub Java sources.

use std::collections::BTreeSet;

use super::name::TargetName;

/// Descriptor file name inside every package.
pub const BUILD_FILE: &str = "BUILD";

/// Marker file at the workspace root.
pub const WORKSPACE_FILE: &str = "WORKSPACE";

/// Extension of generated stub sources.
pub const SOURCE_EXTENSION: &str = "java";

/// How the descriptor lists its sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SrcsStyle {
    /// `glob(["*.java"])`
    #[default]
    Glob,
    /// Every stub file by name.
    Explicit,
}

/// A stub source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubSource {
    /// Class name, also the file stem.
    pub unit: String,
}

impl StubSource {
    pub fn new(target: &TargetName, index: usize) -> Self {
        StubSource {
            unit: format!("Lib_{}_{}", target, index),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.unit, SOURCE_EXTENSION)
    }

    pub fn render(&self) -> String {
        format!("public class {} {{}}\n", self.unit)
    }
}

/// Everything needed to write one package.
#[derive(Debug, Clone)]
pub struct BuildPackage<'a> {
    pub name: &'a TargetName,
    pub deps: &'a BTreeSet<TargetName>,
    pub sources: Vec<StubSource>,
    pub srcs_style: SrcsStyle,
}

impl<'a> BuildPackage<'a> {
    pub fn new(
        name: &'a TargetName,
        deps: &'a BTreeSet<TargetName>,
        sources_per_target: usize,
        srcs_style: SrcsStyle,
    ) -> Self {
        let sources = (0..sources_per_target)
            .map(|i| StubSource::new(name, i))
            .collect();
        BuildPackage {
            name,
            deps,
            sources,
            srcs_style,
        }
    }

    /// Render the `BUILD` descriptor.
    pub fn render_descriptor(&self) -> String {
        let srcs = match self.srcs_style {
            SrcsStyle::Glob => format!("glob([\"*.{}\"])", SOURCE_EXTENSION),
            SrcsStyle::Explicit => string_list(self.sources.iter().map(|s| s.file_name())),
        };
        let deps = string_list(self.deps.iter().map(|d| d.label()));

        format!(
            r#"java_library(
    name = "{name}",
    srcs = {srcs},
    visibility = ["//visibility:public"],
    deps = {deps},
)
"#,
            name = self.name,
        )
    }
}

/// Format strings as a Starlark list, one element per line.
fn string_list(items: impl IntoIterator<Item = String>) -> String {
    let items: Vec<String> = items.into_iter().collect();
    if items.is_empty() {
        return "[]".to_string();
    }

    let mut out = String::from("[\n");
    for item in items {
        out.push_str(&format!("        \"{}\",\n", item));
    }
    out.push_str("    ]");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_source() {
        let stub = StubSource::new(&TargetName::from("abc"), 2);
        assert_eq!(stub.file_name(), "Lib_abc_2.java");
        assert_eq!(stub.render(), "public class Lib_abc_2 {}\n");
    }

    #[test]
    fn test_descriptor_without_deps() {
        let name = TargetName::from("abc");
        let deps = BTreeSet::new();
        let pkg = BuildPackage::new(&name, &deps, 1, SrcsStyle::Glob);

        let expected = r#"java_library(
    name = "abc",
    srcs = glob(["*.java"]),
    visibility = ["//visibility:public"],
    deps = [],
)
"#;
        assert_eq!(pkg.render_descriptor(), expected);
    }

    #[test]
    fn test_descriptor_with_deps_and_explicit_srcs() {
        let name = TargetName::from("abc");
        let deps = BTreeSet::from([TargetName::from("xyz"), TargetName::from("def")]);
        let pkg = BuildPackage::new(&name, &deps, 2, SrcsStyle::Explicit);

        let expected = r#"java_library(
    name = "abc",
    srcs = [
        "Lib_abc_0.java",
        "Lib_abc_1.java",
    ],
    visibility = ["//visibility:public"],
    deps = [
        "//def:def",
        "//xyz:xyz",
    ],
)
"#;
        assert_eq!(pkg.render_descriptor(), expected);
    }
}
