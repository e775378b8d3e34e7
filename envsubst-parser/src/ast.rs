//! Defines the expression tree produced by parsing a substitution string.

/// A parsed substitution string. Immutable once constructed; may be evaluated
/// any number of times.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub(crate) const fn new(root: Node) -> Self {
        Self { root }
    }

    /// Returns the root node of the tree.
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Consumes the tree, returning its root node.
    pub fn into_root(self) -> Node {
        self.root
    }
}

/// An element of the expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Literal text, emitted verbatim.
    Text(String),
    /// A substitution expression (`${...}` or `$name`).
    Function(FunctionNode),
    /// An ordered sequence of two or more sibling nodes.
    List(Vec<Self>),
}

impl Node {
    /// Builds a node from a run of sibling pieces. Adjacent text pieces are merged;
    /// a run that ends up with a single piece collapses to that piece, and an empty
    /// run collapses to empty text.
    pub(crate) fn from_pieces(pieces: Vec<Self>) -> Self {
        let mut nodes: Vec<Self> = Vec::with_capacity(pieces.len());

        for piece in pieces {
            if let Self::Text(next) = &piece {
                if next.is_empty() {
                    continue;
                }
                if let Some(Self::Text(prev)) = nodes.last_mut() {
                    prev.push_str(next);
                    continue;
                }
            }
            nodes.push(piece);
        }

        match nodes.len() {
            0 => Self::Text(String::new()),
            1 => nodes.pop().unwrap_or_else(|| Self::Text(String::new())),
            _ => Self::List(nodes),
        }
    }

    /// Returns whether this node is empty literal text.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

/// A substitution expression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionNode {
    /// Name of the referenced variable.
    pub parameter: String,
    /// The operator applied to the variable; `None` for a bare reference.
    pub operator: Option<Operator>,
    /// Argument sub-trees, in source order.
    pub args: Vec<Node>,
    /// How many substitutions enclose this one; zero at the top level.
    pub nesting: usize,
    /// The exact source text this expression was parsed from.
    pub source: String,
}

/// Which condition a default-value operator tests for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterTestType {
    /// The variable is unset (`${v-word}` style, without a colon).
    Unset,
    /// The variable is unset or empty (`${v:-word}` style, with a colon).
    UnsetOrNull,
}

/// Where a replace operator is allowed to match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubstringMatchKind {
    /// Match only at the start of the value (`/#`).
    Prefix,
    /// Match only at the end of the value (`/%`).
    Suffix,
    /// Replace the first match (`/`).
    FirstOccurrence,
    /// Replace every non-overlapping match (`//`).
    Anywhere,
}

/// The closed set of recognized substitution operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// `${#v}`
    Length,
    /// `${v,}`
    LowercaseFirst,
    /// `${v,,}`
    LowercaseAll,
    /// `${v^}`
    UppercaseFirst,
    /// `${v^^}`
    UppercaseAll,
    /// `${v:offset}` and `${v:offset:length}`
    Substring,
    /// `${v#pattern}`
    RemoveSmallestPrefix,
    /// `${v##pattern}`
    RemoveLargestPrefix,
    /// `${v%pattern}`
    RemoveSmallestSuffix,
    /// `${v%%pattern}`
    RemoveLargestSuffix,
    /// `${v/pattern/string}` and friends.
    Replace(SubstringMatchKind),
    /// `${v-word}` and `${v:-word}`
    UseDefaultValues(ParameterTestType),
    /// `${v=word}` and `${v:=word}`
    AssignDefaultValues(ParameterTestType),
    /// `${v?word}` and `${v:?word}`
    IndicateErrorIfNullOrUnset(ParameterTestType),
    /// `${v+word}` and `${v:+word}`
    UseAlternativeValue(ParameterTestType),
}

impl Operator {
    /// Returns the operator token as it appears in source.
    pub const fn as_str(&self) -> &'static str {
        use ParameterTestType::{Unset, UnsetOrNull};

        match self {
            Self::Length => "#",
            Self::LowercaseFirst => ",",
            Self::LowercaseAll => ",,",
            Self::UppercaseFirst => "^",
            Self::UppercaseAll => "^^",
            Self::Substring => ":",
            Self::RemoveSmallestPrefix => "#",
            Self::RemoveLargestPrefix => "##",
            Self::RemoveSmallestSuffix => "%",
            Self::RemoveLargestSuffix => "%%",
            Self::Replace(SubstringMatchKind::FirstOccurrence) => "/",
            Self::Replace(SubstringMatchKind::Anywhere) => "//",
            Self::Replace(SubstringMatchKind::Prefix) => "/#",
            Self::Replace(SubstringMatchKind::Suffix) => "/%",
            Self::UseDefaultValues(Unset) => "-",
            Self::UseDefaultValues(UnsetOrNull) => ":-",
            Self::AssignDefaultValues(Unset) => "=",
            Self::AssignDefaultValues(UnsetOrNull) => ":=",
            Self::IndicateErrorIfNullOrUnset(Unset) => "?",
            Self::IndicateErrorIfNullOrUnset(UnsetOrNull) => ":?",
            Self::UseAlternativeValue(Unset) => "+",
            Self::UseAlternativeValue(UnsetOrNull) => ":+",
        }
    }

    /// Returns the number of arguments the grammar allows for this operator,
    /// as an inclusive `(min, max)` pair.
    pub const fn arity(&self) -> (usize, usize) {
        match self {
            Self::Length
            | Self::LowercaseFirst
            | Self::LowercaseAll
            | Self::UppercaseFirst
            | Self::UppercaseAll => (0, 0),
            Self::Substring => (1, 2),
            Self::Replace(_) => (2, 2),
            Self::RemoveSmallestPrefix
            | Self::RemoveLargestPrefix
            | Self::RemoveSmallestSuffix
            | Self::RemoveLargestSuffix
            | Self::UseDefaultValues(_)
            | Self::AssignDefaultValues(_)
            | Self::IndicateErrorIfNullOrUnset(_)
            | Self::UseAlternativeValue(_) => (1, 1),
        }
    }

    pub(crate) fn default_family(token: &str) -> Option<Self> {
        let (test_type, op) = match token.strip_prefix(':') {
            Some(op) => (ParameterTestType::UnsetOrNull, op),
            None => (ParameterTestType::Unset, token),
        };

        match op {
            "-" => Some(Self::UseDefaultValues(test_type)),
            "=" => Some(Self::AssignDefaultValues(test_type)),
            "?" => Some(Self::IndicateErrorIfNullOrUnset(test_type)),
            "+" => Some(Self::UseAlternativeValue(test_type)),
            _ => None,
        }
    }

    pub(crate) fn casing(token: &str) -> Option<Self> {
        match token {
            "," => Some(Self::LowercaseFirst),
            ",," => Some(Self::LowercaseAll),
            "^" => Some(Self::UppercaseFirst),
            "^^" => Some(Self::UppercaseAll),
            _ => None,
        }
    }

    pub(crate) fn replace(token: &str) -> Option<Self> {
        match token {
            "/" => Some(Self::Replace(SubstringMatchKind::FirstOccurrence)),
            "//" => Some(Self::Replace(SubstringMatchKind::Anywhere)),
            "/#" => Some(Self::Replace(SubstringMatchKind::Prefix)),
            "/%" => Some(Self::Replace(SubstringMatchKind::Suffix)),
            _ => None,
        }
    }

    pub(crate) fn remove(token: &str) -> Option<Self> {
        match token {
            "#" => Some(Self::RemoveSmallestPrefix),
            "##" => Some(Self::RemoveLargestPrefix),
            "%" => Some(Self::RemoveSmallestSuffix),
            "%%" => Some(Self::RemoveLargestSuffix),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
