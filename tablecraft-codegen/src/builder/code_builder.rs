//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for loops over table data.
///
/// # Example
///
/// ```
/// use tablecraft_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::php()
///     .braced("public function index()", "}", |b| {
///         b.line("return User::paginate();")
///     })
///     .build();
///
/// assert_eq!(
///     code,
///     "public function index()\n{\n    return User::paginate();\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn php() -> Self {
        Self::new(Indent::PHP)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add several lines, each at the current indentation (mutable).
    ///
    /// Relative indentation inside `text` is kept.
    pub fn push_lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.push_blank();
            } else {
                self.push_line(line);
            }
        }
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline (mutable).
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a PHP docblock (mutable). Empty lines become a bare ` *`.
    pub fn push_docblock(&mut self, lines: &[&str]) -> &mut Self {
        self.push_line("/**");
        for line in lines {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line));
            }
        }
        self.push_line(" */")
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a PHP docblock.
    pub fn docblock(mut self, lines: &[&str]) -> Self {
        self.push_docblock(lines);
        self
    }

    /// Add a block with automatic indentation.
    pub fn block<F>(self, header: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent()
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a PSR-12 style brace block: header, `{` on its own line, body, `}`.
    pub fn braced<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).line("{").indent();
        f(builder).dedent().line(close)
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Hand the builder to a closure using the mutable API.
    pub fn with<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        f(&mut self);
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::php()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::php().line("$x = 1;").build();
        assert_eq!(code, "$x = 1;\n");
    }

    #[test]
    fn test_indentation() {
        let code = CodeBuilder::php()
            .line("if ($x) {")
            .indent()
            .line("return 1;")
            .dedent()
            .line("}")
            .build();

        assert_eq!(code, "if ($x) {\n    return 1;\n}\n");
    }

    #[test]
    fn test_braced() {
        let code = CodeBuilder::php()
            .braced("class User extends Model", "}", |b| b.line("use HasFactory;"))
            .build();

        assert_eq!(code, "class User extends Model\n{\n    use HasFactory;\n}\n");
    }

    #[test]
    fn test_docblock() {
        let code = CodeBuilder::php()
            .indent()
            .docblock(&["The table associated with the model.", "", "@var string"])
            .build();

        assert_eq!(
            code,
            "    /**\n     * The table associated with the model.\n     *\n     * @var string\n     */\n"
        );
    }

    #[test]
    fn test_push_lines_keeps_relative_indent() {
        let mut builder = CodeBuilder::php();
        builder.push_indent().push_lines("a {\n    b;\n\n}");
        assert_eq!(builder.build(), "    a {\n        b;\n\n    }\n");
    }

    #[test]
    fn test_conditional_and_each() {
        let code = CodeBuilder::php()
            .when(false, |b| b.line("never"))
            .each(["'a',", "'b',"], |b, item| b.line(item))
            .build();

        assert_eq!(code, "'a',\n'b',\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let code = CodeBuilder::php().dedent().line("x").build();
        assert_eq!(code, "x\n");
    }
}
