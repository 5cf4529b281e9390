use std::fmt;

use crate::record::AttributeSource;

/// Attribute keys the rule chain consults. No other attribute influences
/// the outcome.
pub const ATTR_AUTHENTICATED: &str = "azure.authenticated";
pub const ATTR_ROLE: &str = "azure.role";
pub const ATTR_DEPARTMENT: &str = "azure.department";
pub const ATTR_GROUPS: &str = "azure.groups";
pub const ATTR_EMAIL: &str = "azure.email";

/// The binary outcome of evaluating one attribute record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Authorized,
    Unauthorized,
}

impl Verdict {
    /// The exact token emitted on the output stream.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::Unauthorized => "unauthorized",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates the fixed rule chain against one set of request attributes.
///
/// Rules run in order and the first match wins. All comparisons are exact
/// and case sensitive. A lookup miss sees `""`, so an absent attribute and
/// a present but empty one are equivalent everywhere below.
pub fn evaluate<A: AttributeSource + ?Sized>(attributes: &A) -> Verdict {
    // Gate: every grant below presumes an authenticated caller.
    if attributes.value(ATTR_AUTHENTICATED) != "true" {
        return Verdict::Unauthorized;
    }

    let role = attributes.value(ATTR_ROLE);

    if role == "admin" {
        return Verdict::Authorized;
    }

    // Engineering staff in a developers group. Substring containment on the
    // groups value, not token equality.
    if attributes.value(ATTR_DEPARTMENT) == "Engineering"
        && attributes.value(ATTR_GROUPS).contains("developers")
    {
        return Verdict::Authorized;
    }

    // Plain users on the corporate mail domain. Literal tail match only.
    if attributes.value(ATTR_EMAIL).ends_with("@example.com") && role == "user" {
        return Verdict::Authorized;
    }

    Verdict::Unauthorized
}
