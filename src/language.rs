//! Language detection and comment syntax profiles
//!
//! This module provides a centralized Language enum, an extension-to-language
//! mapping, and the static comment marker table used by the scanner and the
//! rewriter. The table is baked into the binary and never mutated at runtime.

use std::path::Path;

/// Comment marker profile for one language family.
///
/// `block_start[i]` pairs with `block_end[i]`. When a start index has no
/// matching end entry, the first end marker is used instead; the positional
/// pairing exists for languages with heterogeneous pairs like Python's
/// `"""`/`'''`. Any of the lists may be empty.
#[derive(Debug, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Markers that introduce a comment running to end of line.
    pub single_line: &'static [&'static str],
    /// Markers that open a block comment.
    pub block_start: &'static [&'static str],
    /// Markers that close a block comment, paired with `block_start` by index.
    pub block_end: &'static [&'static str],
}

impl CommentSyntax {
    /// The end marker paired with the start marker at `start_idx`.
    ///
    /// Falls back to the first end marker when the start index has no
    /// positional partner. Returns `None` only when the language defines no
    /// end markers at all.
    pub fn paired_end(&self, start_idx: usize) -> Option<&'static str> {
        self.block_end
            .get(start_idx)
            .or_else(|| self.block_end.first())
            .copied()
    }

    /// Whether this profile can open a block comment.
    pub fn has_block_markers(&self) -> bool {
        !self.block_start.is_empty() && !self.block_end.is_empty()
    }
}

const C_STYLE: CommentSyntax = CommentSyntax {
    single_line: &["//"],
    block_start: &["/*"],
    block_end: &["*/"],
};

const PYTHON: CommentSyntax = CommentSyntax {
    single_line: &["#"],
    block_start: &["\"\"\"", "'''"],
    block_end: &["\"\"\"", "'''"],
};

const RUBY: CommentSyntax = CommentSyntax {
    single_line: &["#"],
    block_start: &["=begin"],
    block_end: &["=end"],
};

const SHELL: CommentSyntax = CommentSyntax {
    single_line: &["#"],
    block_start: &[],
    block_end: &[],
};

const PERL: CommentSyntax = CommentSyntax {
    single_line: &["#"],
    block_start: &["=pod"],
    block_end: &["=cut"],
};

const PHP: CommentSyntax = CommentSyntax {
    single_line: &["//", "#"],
    block_start: &["/*"],
    block_end: &["*/"],
};

const SQL: CommentSyntax = CommentSyntax {
    single_line: &["--"],
    block_start: &["/*"],
    block_end: &["*/"],
};

const HTML: CommentSyntax = CommentSyntax {
    single_line: &[],
    block_start: &["<!--"],
    block_end: &["-->"],
};

const CSS: CommentSyntax = CommentSyntax {
    single_line: &[],
    block_start: &["/*"],
    block_end: &["*/"],
};

const YAML: CommentSyntax = CommentSyntax {
    single_line: &["#"],
    block_start: &[],
    block_end: &[],
};

const R: CommentSyntax = CommentSyntax {
    single_line: &["#"],
    block_start: &[],
    block_end: &[],
};

const LUA: CommentSyntax = CommentSyntax {
    single_line: &["--"],
    block_start: &["--[["],
    block_end: &["]]"],
};

const VIM: CommentSyntax = CommentSyntax {
    single_line: &["\""],
    block_start: &[],
    block_end: &[],
};

/// Language families with distinct comment syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// C, C++, Java, JS/TS, Go, Rust, C#, Kotlin, Swift, Scala, Obj-C
    CStyle,
    Python,
    Ruby,
    Shell,
    Perl,
    Php,
    Sql,
    /// HTML and XML share `<!-- -->`
    Html,
    Css,
    Yaml,
    R,
    Lua,
    Vim,
}

impl Language {
    /// Detect language from a file extension.
    ///
    /// Matching is case-insensitive (so `.R` resolves like `.r`). Returns
    /// `None` for unrecognized extensions; absence of a mapping is a normal
    /// outcome, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use shears::language::Language;
    ///
    /// assert_eq!(Language::from_extension("rs"), Some(Language::CStyle));
    /// assert_eq!(Language::from_extension("py"), Some(Language::Python));
    /// assert_eq!(Language::from_extension("unknown"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "c" | "h" | "cpp" | "hpp" | "cc" | "cxx" | "java" | "js" | "jsx" | "ts" | "tsx"
            | "go" | "rs" | "cs" | "kt" | "swift" | "scala" | "m" | "mm" => Some(Language::CStyle),
            "py" => Some(Language::Python),
            "rb" => Some(Language::Ruby),
            "sh" | "bash" | "zsh" | "fish" => Some(Language::Shell),
            "pl" | "pm" => Some(Language::Perl),
            "php" => Some(Language::Php),
            "sql" => Some(Language::Sql),
            "html" | "htm" | "xml" => Some(Language::Html),
            "css" | "scss" | "sass" | "less" => Some(Language::Css),
            "yaml" | "yml" => Some(Language::Yaml),
            "r" => Some(Language::R),
            "lua" => Some(Language::Lua),
            "vim" => Some(Language::Vim),
            _ => None,
        }
    }

    /// Detect language from a file path.
    ///
    /// Extensionless files (`Makefile`, `LICENSE`) resolve to `None` and are
    /// never scanned.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use shears::language::Language;
    ///
    /// assert_eq!(Language::from_path(Path::new("main.go")), Some(Language::CStyle));
    /// assert_eq!(Language::from_path(Path::new("README.md")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// The comment marker profile for this language family.
    pub fn comment_syntax(&self) -> &'static CommentSyntax {
        match self {
            Language::CStyle => &C_STYLE,
            Language::Python => &PYTHON,
            Language::Ruby => &RUBY,
            Language::Shell => &SHELL,
            Language::Perl => &PERL,
            Language::Php => &PHP,
            Language::Sql => &SQL,
            Language::Html => &HTML,
            Language::Css => &CSS,
            Language::Yaml => &YAML,
            Language::R => &R,
            Language::Lua => &LUA,
            Language::Vim => &VIM,
        }
    }

    /// Returns the human-readable name of the language family.
    pub fn name(&self) -> &'static str {
        match self {
            Language::CStyle => "C-style",
            Language::Python => "Python",
            Language::Ruby => "Ruby",
            Language::Shell => "Shell",
            Language::Perl => "Perl",
            Language::Php => "PHP",
            Language::Sql => "SQL",
            Language::Html => "HTML/XML",
            Language::Css => "CSS",
            Language::Yaml => "YAML",
            Language::R => "R",
            Language::Lua => "Lua",
            Language::Vim => "Vimscript",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_basic() {
        assert_eq!(Language::from_extension("c"), Some(Language::CStyle));
        assert_eq!(Language::from_extension("rs"), Some(Language::CStyle));
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension("rb"), Some(Language::Ruby));
        assert_eq!(Language::from_extension("sql"), Some(Language::Sql));
        assert_eq!(Language::from_extension("lua"), Some(Language::Lua));
    }

    #[test]
    fn test_from_extension_case_insensitive() {
        assert_eq!(Language::from_extension("R"), Some(Language::R));
        assert_eq!(Language::from_extension("PY"), Some(Language::Python));
        assert_eq!(Language::from_extension("Html"), Some(Language::Html));
    }

    #[test]
    fn test_from_extension_variants() {
        // C-style covers many families
        assert_eq!(Language::from_extension("tsx"), Some(Language::CStyle));
        assert_eq!(Language::from_extension("kt"), Some(Language::CStyle));
        assert_eq!(Language::from_extension("mm"), Some(Language::CStyle));

        // Shell variants
        assert_eq!(Language::from_extension("bash"), Some(Language::Shell));
        assert_eq!(Language::from_extension("fish"), Some(Language::Shell));

        // Markup and styles
        assert_eq!(Language::from_extension("xml"), Some(Language::Html));
        assert_eq!(Language::from_extension("scss"), Some(Language::Css));
        assert_eq!(Language::from_extension("yml"), Some(Language::Yaml));
    }

    #[test]
    fn test_from_extension_unknown() {
        assert_eq!(Language::from_extension("txt"), None);
        assert_eq!(Language::from_extension("md"), None);
        assert_eq!(Language::from_extension("json"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            Language::from_path(Path::new("src/main.rs")),
            Some(Language::CStyle)
        );
        assert_eq!(
            Language::from_path(Path::new("script.py")),
            Some(Language::Python)
        );
        assert_eq!(Language::from_path(Path::new("README.md")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_profiles_match_family() {
        assert_eq!(Language::CStyle.comment_syntax().single_line, &["//"]);
        assert_eq!(Language::Php.comment_syntax().single_line, &["//", "#"]);
        assert_eq!(Language::Html.comment_syntax().single_line.len(), 0);
        assert_eq!(Language::Shell.comment_syntax().block_start.len(), 0);
        assert_eq!(Language::Lua.comment_syntax().block_start, &["--[["]);
    }

    #[test]
    fn test_paired_end_positional() {
        let python = Language::Python.comment_syntax();
        assert_eq!(python.paired_end(0), Some("\"\"\""));
        assert_eq!(python.paired_end(1), Some("'''"));
        // Out-of-range start index falls back to the first end marker
        assert_eq!(python.paired_end(7), Some("\"\"\""));

        let shell = Language::Shell.comment_syntax();
        assert_eq!(shell.paired_end(0), None);
    }

    #[test]
    fn test_name() {
        assert_eq!(Language::CStyle.name(), "C-style");
        assert_eq!(Language::Vim.name(), "Vimscript");
    }
}
