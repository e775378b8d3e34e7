//! Evaluation of parsed substitution strings.

use std::collections::HashMap;
use std::str::FromStr;

use envsubst_parser::ast::{FunctionNode, Node, Operator, ParameterTestType, Tree};
use envsubst_parser::{ParserOptions, format_node};

use crate::{error, funcs, trace_categories};

/// Resolves variable names to values. `None` means the variable is unset.
pub trait VariableResolver {
    /// Resolves the named variable.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the variable.
    fn resolve(&mut self, name: &str) -> Option<String>;
}

impl<F> VariableResolver for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn resolve(&mut self, name: &str) -> Option<String> {
        self(name)
    }
}

/// The decision an [`AdvancedMapping`] makes for one substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mapped {
    /// Emit the given text verbatim; the substitution's arguments are never evaluated.
    Stop(String),
    /// Evaluate the substitution normally, using the given value for its variable
    /// (`None` meaning unset).
    Continue(Option<String>),
}

/// A resolver that is consulted before each substitution is evaluated, and that
/// may take over the substitution entirely.
pub trait AdvancedMapping {
    /// Decides how the substitution described by `info` is handled.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the referenced variable.
    /// * `info` - The substitution being evaluated.
    fn map(&mut self, name: &str, info: &NodeInfo<'_>) -> Mapped;
}

impl<F> AdvancedMapping for F
where
    F: FnMut(&str, &NodeInfo<'_>) -> Mapped,
{
    fn map(&mut self, name: &str, info: &NodeInfo<'_>) -> Mapped {
        self(name, info)
    }
}

/// Describes a substitution to an [`AdvancedMapping`].
#[derive(Clone, Copy, Debug)]
pub struct NodeInfo<'a> {
    node: &'a Node,
    func: &'a FunctionNode,
}

impl<'a> NodeInfo<'a> {
    /// Name of the referenced variable.
    pub fn name(&self) -> &'a str {
        &self.func.parameter
    }

    /// The exact, unevaluated source text of the substitution, e.g. `${var:-5011}`.
    pub fn orig(&self) -> String {
        format_node(self.node)
    }

    /// The substitution's operator, if any.
    pub const fn operator(&self) -> Option<Operator> {
        self.func.operator
    }

    /// How many substitutions enclose this one.
    pub const fn nesting(&self) -> usize {
        self.func.nesting
    }

    /// The underlying substitution node.
    pub const fn function(&self) -> &'a FunctionNode {
        self.func
    }
}

/// A parsed substitution string, ready to be evaluated any number of times.
#[derive(Clone, Debug)]
pub struct Template {
    tree: Tree,
}

impl Template {
    /// Parses the given string with default options.
    ///
    /// # Arguments
    ///
    /// * `input` - The string to parse.
    pub fn parse(input: &str) -> Result<Self, error::Error> {
        Self::parse_with_options(input, &ParserOptions::default())
    }

    /// Parses the given string.
    ///
    /// # Arguments
    ///
    /// * `input` - The string to parse.
    /// * `options` - The options to use when parsing.
    pub fn parse_with_options(input: &str, options: &ParserOptions) -> Result<Self, error::Error> {
        let tree = envsubst_parser::Parser::new(input, options)
            .parse()
            .map_err(|source| {
                tracing::debug!(target: trace_categories::PARSE, "failed to parse '{input}': {source}");
                error::Error::Parse {
                    source,
                    input: input.to_owned(),
                }
            })?;

        Ok(Self { tree })
    }

    /// Returns the parsed expression tree.
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Evaluates the template, resolving each referenced variable after the
    /// substitution's arguments have been evaluated.
    ///
    /// # Arguments
    ///
    /// * `resolver` - Resolves variable names to values.
    pub fn execute(&self, resolver: &mut impl VariableResolver) -> Result<String, error::Error> {
        Evaluator::new(Mapping::Standard(resolver)).evaluate(self.tree.root())
    }

    /// Evaluates the template, consulting `mapping` before each substitution.
    ///
    /// # Arguments
    ///
    /// * `mapping` - Decides how each substitution is handled.
    pub fn execute_advanced(&self, mapping: &mut impl AdvancedMapping) -> Result<String, error::Error> {
        Evaluator::new(Mapping::Advanced(mapping)).evaluate(self.tree.root())
    }
}

impl FromStr for Template {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

enum Mapping<'m> {
    Standard(&'m mut dyn VariableResolver),
    Advanced(&'m mut dyn AdvancedMapping),
}

struct Evaluator<'m> {
    mapping: Mapping<'m>,
    /// Values assigned by `${v=word}` and `${v:=word}` during this evaluation.
    assigned: HashMap<String, String>,
}

impl<'m> Evaluator<'m> {
    fn new(mapping: Mapping<'m>) -> Self {
        Self {
            mapping,
            assigned: HashMap::new(),
        }
    }

    fn evaluate(mut self, root: &Node) -> Result<String, error::Error> {
        let mut out = String::new();
        self.eval_node(root, &mut out)?;
        Ok(out)
    }

    fn eval_node(&mut self, node: &Node, out: &mut String) -> Result<(), error::Error> {
        match node {
            Node::Text(value) => out.push_str(value),
            Node::List(nodes) => {
                for node in nodes {
                    self.eval_node(node, out)?;
                }
            }
            Node::Function(func) => self.eval_function(node, func, out)?,
        }
        Ok(())
    }

    fn eval_function(
        &mut self,
        node: &Node,
        func: &FunctionNode,
        out: &mut String,
    ) -> Result<(), error::Error> {
        let mapped = match &mut self.mapping {
            Mapping::Standard(_) => None,
            Mapping::Advanced(mapping) => {
                match mapping.map(&func.parameter, &NodeInfo { node, func }) {
                    Mapped::Stop(text) => {
                        tracing::debug!(target: trace_categories::EXPANSION, "{} => '{text}' (verbatim)", func.source);
                        out.push_str(&text);
                        return Ok(());
                    }
                    Mapped::Continue(value) => Some(value),
                }
            }
        };

        let mut args = Vec::with_capacity(func.args.len());
        for arg in &func.args {
            let mut buf = String::new();
            self.eval_node(arg, &mut buf)?;
            args.push(buf);
        }

        let value = match self.assigned.get(&func.parameter) {
            Some(assigned) => Some(assigned.clone()),
            None => match (mapped, &mut self.mapping) {
                (Some(value), _) => value,
                (None, Mapping::Standard(resolver)) => resolver.resolve(&func.parameter),
                (None, Mapping::Advanced(_)) => None,
            },
        };

        let result = self.apply(func, value, &args)?;
        tracing::debug!(target: trace_categories::EXPANSION, "{} => '{result}'", func.source);

        out.push_str(&result);
        Ok(())
    }

    fn apply(
        &mut self,
        func: &FunctionNode,
        value: Option<String>,
        args: &[String],
    ) -> Result<String, error::Error> {
        let Some(operator) = func.operator else {
            return Ok(value.unwrap_or_default());
        };

        let arg = |index: usize| args.get(index).map_or("", String::as_str);

        let result = match operator {
            Operator::Length => funcs::length(value.as_deref().unwrap_or_default()),
            Operator::LowercaseFirst => funcs::lowercase_first_char(value.as_deref().unwrap_or_default()),
            Operator::LowercaseAll => value.unwrap_or_default().to_lowercase(),
            Operator::UppercaseFirst => funcs::uppercase_first_char(value.as_deref().unwrap_or_default()),
            Operator::UppercaseAll => value.unwrap_or_default().to_uppercase(),
            Operator::Substring => funcs::substring(
                value.as_deref().unwrap_or_default(),
                arg(0),
                args.get(1).map(String::as_str),
            ),
            Operator::RemoveSmallestPrefix => {
                funcs::remove_smallest_prefix(value.as_deref().unwrap_or_default(), arg(0))?
            }
            Operator::RemoveLargestPrefix => {
                funcs::remove_largest_prefix(value.as_deref().unwrap_or_default(), arg(0))?
            }
            Operator::RemoveSmallestSuffix => {
                funcs::remove_smallest_suffix(value.as_deref().unwrap_or_default(), arg(0))?
            }
            Operator::RemoveLargestSuffix => {
                funcs::remove_largest_suffix(value.as_deref().unwrap_or_default(), arg(0))?
            }
            Operator::Replace(match_kind) => funcs::replace_substring(
                value.as_deref().unwrap_or_default(),
                arg(0),
                arg(1),
                match_kind,
            )?,
            Operator::UseDefaultValues(test_type) => {
                if is_unset(test_type, value.as_deref()) {
                    arg(0).to_owned()
                } else {
                    value.unwrap_or_default()
                }
            }
            Operator::AssignDefaultValues(test_type) => {
                if is_unset(test_type, value.as_deref()) {
                    self.assigned
                        .insert(func.parameter.clone(), arg(0).to_owned());
                    arg(0).to_owned()
                } else {
                    value.unwrap_or_default()
                }
            }
            Operator::IndicateErrorIfNullOrUnset(test_type) => {
                if is_unset(test_type, value.as_deref()) {
                    let message = match arg(0) {
                        "" => String::from("parameter null or not set"),
                        message => message.to_owned(),
                    };
                    return Err(error::Error::RequiredVariable {
                        name: func.parameter.clone(),
                        message,
                    });
                }
                value.unwrap_or_default()
            }
            Operator::UseAlternativeValue(test_type) => {
                if is_unset(test_type, value.as_deref()) {
                    String::new()
                } else {
                    arg(0).to_owned()
                }
            }
        };

        Ok(result)
    }
}

fn is_unset(test_type: ParameterTestType, value: Option<&str>) -> bool {
    match test_type {
        ParameterTestType::Unset => value.is_none(),
        ParameterTestType::UnsetOrNull => value.is_none_or(str::is_empty),
    }
}
