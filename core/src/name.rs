//! Qualified names for elements, attributes and namespace declarations.

use crate::{NodeError, NodeResult};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn ncname() -> &'static Regex {
    static NCNAME: OnceLock<Regex> = OnceLock::new();
    NCNAME.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid NCName pattern"))
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_numeric() || matches!(c, '.' | '-' | '\u{B7}')
}

/// ASCII names go through the NCName pattern; anything else is checked per
/// character with Unicode letter and digit classes.
fn check_ncname(part: &str) -> NodeResult<()> {
    let valid = if part.is_ascii() {
        ncname().is_match(part)
    } else {
        let mut chars = part.chars();
        chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
    };
    if valid {
        Ok(())
    } else {
        Err(NodeError::invalid_name(part))
    }
}

/// A namespace-qualified name.
///
/// Namespace declarations reuse this type with an empty local name; the
/// declared prefix is then the identifying part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    namespace_uri: String,
    prefix: String,
    local_name: String,
}

impl QName {
    /// Create an unprefixed name in no namespace.
    pub fn new(local_name: impl Into<String>) -> NodeResult<Self> {
        Self::with_namespace("", "", local_name)
    }

    /// Create a name with an explicit namespace URI and prefix.
    pub fn with_namespace(
        namespace_uri: impl Into<String>,
        prefix: impl Into<String>,
        local_name: impl Into<String>,
    ) -> NodeResult<Self> {
        let prefix = prefix.into();
        let local_name = local_name.into();
        if !prefix.is_empty() {
            check_ncname(&prefix)?;
        }
        check_ncname(&local_name)?;
        Ok(Self {
            namespace_uri: namespace_uri.into(),
            prefix,
            local_name,
        })
    }

    /// Create the name of a namespace declaration binding `prefix` to `uri`.
    /// An empty prefix declares the default namespace.
    pub fn namespace_decl(prefix: impl Into<String>, uri: impl Into<String>) -> NodeResult<Self> {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            check_ncname(&prefix)?;
        }
        Ok(Self {
            namespace_uri: uri.into(),
            prefix,
            local_name: String::new(),
        })
    }

    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns true if this names a namespace declaration.
    pub fn is_namespace_decl(&self) -> bool {
        self.local_name.is_empty()
    }

    /// Attribute identity: same namespace URI and local name, prefix ignored.
    pub fn matches(&self, other: &QName) -> bool {
        self.namespace_uri == other.namespace_uri && self.local_name == other.local_name
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_namespace_decl(), self.prefix.is_empty()) {
            (true, true) => f.write_str("xmlns"),
            (true, false) => write!(f, "xmlns:{}", self.prefix),
            (false, true) => f.write_str(&self.local_name),
            (false, false) => write!(f, "{}:{}", self.prefix, self.local_name),
        }
    }
}
