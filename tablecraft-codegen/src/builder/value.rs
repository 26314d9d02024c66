//! PHP literals, method chains and array literals.

use super::CodeBuilder;

/// A PHP expression used as a call argument or array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhpValue {
    /// Single-quoted string literal
    Str(String),
    Int(i64),
    /// Emitted verbatim (e.g. `User::class`)
    Raw(String),
    /// Inline list literal
    List(Vec<PhpValue>),
}

impl PhpValue {
    pub fn str(s: impl Into<String>) -> Self {
        PhpValue::Str(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        PhpValue::Raw(s.into())
    }

    pub fn render(&self) -> String {
        match self {
            PhpValue::Str(s) => quote(s),
            PhpValue::Int(i) => i.to_string(),
            PhpValue::Raw(s) => s.clone(),
            PhpValue::List(items) => format!(
                "[{}]",
                items
                    .iter()
                    .map(PhpValue::render)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Single-quote a string for PHP, escaping `\` and `'`.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// A single method call in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub name: String,
    pub args: Vec<PhpValue>,
}

impl MethodCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: PhpValue) -> Self {
        self.args.push(value);
        self
    }
}

/// `$receiver->a(...)->b(...)` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodChain {
    receiver: String,
    calls: Vec<MethodCall>,
}

impl MethodChain {
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            calls: Vec::new(),
        }
    }

    /// Append a call.
    pub fn call(mut self, call: MethodCall) -> Self {
        self.calls.push(call);
        self
    }

    /// Append an argument-less call, e.g. `->nullable()`.
    pub fn then(self, name: &str) -> Self {
        self.call(MethodCall::new(name))
    }

    /// Append an argument-less call when `condition` holds.
    pub fn then_if(self, condition: bool, name: &str) -> Self {
        if condition { self.then(name) } else { self }
    }

    /// Render as a statement, terminated with `;`.
    pub fn render(&self) -> String {
        let mut out = self.receiver.clone();
        for call in &self.calls {
            let args: Vec<String> = call.args.iter().map(PhpValue::render).collect();
            out.push_str(&format!("->{}({})", call.name, args.join(", ")));
        }
        out.push(';');
        out
    }
}

/// An array literal written one element per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhpArray {
    entries: Vec<(Option<PhpValue>, PhpValue)>,
}

impl PhpArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list of string literals.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut array = Self::new();
        for item in items {
            array.push(PhpValue::str(item.as_ref()));
        }
        array
    }

    /// A string-keyed map of string literals.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut array = Self::new();
        for (key, value) in entries {
            array.insert(PhpValue::str(key.as_ref()), PhpValue::str(value.as_ref()));
        }
        array
    }

    pub fn push(&mut self, value: PhpValue) {
        self.entries.push((None, value));
    }

    pub fn insert(&mut self, key: PhpValue, value: PhpValue) {
        self.entries.push((Some(key), value));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write `{prefix}[...]{suffix}`; empty arrays stay on one line.
    ///
    /// ```
    /// use tablecraft_codegen::builder::{CodeBuilder, PhpArray};
    ///
    /// let mut b = CodeBuilder::php();
    /// PhpArray::list(["name", "email"]).write(&mut b, "protected $fillable = ", ";");
    /// assert_eq!(
    ///     b.build(),
    ///     "protected $fillable = [\n    'name',\n    'email',\n];\n"
    /// );
    /// ```
    pub fn write(&self, builder: &mut CodeBuilder, prefix: &str, suffix: &str) {
        if self.entries.is_empty() {
            builder.push_line(&format!("{}[]{}", prefix, suffix));
            return;
        }

        builder.push_line(&format!("{}[", prefix)).push_indent();
        for (key, value) in &self.entries {
            match key {
                Some(key) => builder.push_line(&format!("{} => {},", key.render(), value.render())),
                None => builder.push_line(&format!("{},", value.render())),
            };
        }
        builder.push_dedent().push_line(&format!("]{}", suffix));
    }
}
