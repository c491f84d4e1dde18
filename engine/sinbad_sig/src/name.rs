use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of a constructible target type, e.g. `ClassA` or `geo.Point`.
///
/// Cheap to clone; compared and hashed by contents.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TypeName(Arc<str>);

impl TypeName {
    pub fn new(name: impl AsRef<str>) -> Self {
        TypeName(Arc::from(name.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName(Arc::from(name))
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A name as written in a signature literal.
///
/// Names that don't lex as an identifier are wrapped in backticks, with
/// `` ` `` and `\` escaped. With `keyword_safe` unset, primitive kind names
/// are quoted too, so a type called `int` doesn't print as the primitive.
pub(crate) struct Literal<'a> {
    pub name: &'a str,
    pub keyword_safe: bool,
}

impl Literal<'_> {
    fn is_bare(&self) -> bool {
        is_identifier(self.name)
            && (self.keyword_safe || crate::PrimKind::from_name(self.name).is_none())
    }
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return f.write_str(self.name);
        }
        f.write_str("`")?;
        for c in self.name.chars() {
            if matches!(c, '`' | '\\') {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("`")
    }
}

/// Whether `name` matches the identifier token: dot-separated segments of
/// `[A-Za-z][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(name: &str) -> bool {
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// Inverse of the quoting in [`Literal`]: strip the backticks and escapes.
pub(crate) fn unquote(quoted: &str) -> String {
    let inner = quoted
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
        .unwrap_or(quoted);
    let mut name = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => name.extend(chars.next()),
            c => name.push(c),
        }
    }
    name
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({:?})", &*self.0)
    }
}
