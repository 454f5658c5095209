//! Named functions and constants available inside numeric expressions.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(expected) => count == expected,
            Arity::AtLeast(minimum) => count >= minimum,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, count) = match self {
            Arity::Exactly(count) => ("", *count),
            Arity::AtLeast(count) => ("at least ", *count),
        };
        let noun = if count == 1 { "argument" } else { "arguments" };
        write!(f, "{prefix}{count} {noun}")
    }
}

/// The implementation of a numeric function. Arguments arrive already
/// checked against the function's [`Arity`].
pub type NumericFunction = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

#[derive(Clone)]
struct FunctionEntry {
    arity: Arity,
    function: NumericFunction,
}

/// Functions and constants an expression may name.
///
/// [`FunctionTable::standard`] (also the `Default`) holds the built-ins;
/// [`register`](Self::register) adds or replaces entries.
///
/// # Example
///
/// ```
/// use swatch_parser::functions::{Arity, FunctionTable};
///
/// let mut table = FunctionTable::standard();
/// table.register("half", Arity::Exactly(1), |args| args[0] / 2.0);
///
/// assert!(table.function("half").is_some());
/// assert!(table.function("floor").is_some());
/// assert_eq!(table.constant("pi"), Some(std::f64::consts::PI));
/// ```
#[derive(Clone)]
pub struct FunctionTable {
    functions: IndexMap<String, FunctionEntry>,
    constants: IndexMap<String, f64>,
}

impl FunctionTable {
    /// A table with no functions or constants.
    pub fn empty() -> Self {
        Self {
            functions: IndexMap::new(),
            constants: IndexMap::new(),
        }
    }

    /// The built-in functions and constants.
    pub fn standard() -> Self {
        let mut table = Self::empty();

        table
            .register("floor", Arity::Exactly(1), |args| args[0].floor())
            .register("ceil", Arity::Exactly(1), |args| args[0].ceil())
            .register("round", Arity::Exactly(1), |args| args[0].round())
            .register("trunc", Arity::Exactly(1), |args| args[0].trunc())
            .register("abs", Arity::Exactly(1), |args| args[0].abs())
            .register("sqrt", Arity::Exactly(1), |args| args[0].sqrt())
            .register("exp", Arity::Exactly(1), |args| args[0].exp())
            .register("ln", Arity::Exactly(1), |args| args[0].ln())
            .register("log", Arity::Exactly(1), |args| args[0].log10())
            .register("sin", Arity::Exactly(1), |args| args[0].sin())
            .register("cos", Arity::Exactly(1), |args| args[0].cos())
            .register("tan", Arity::Exactly(1), |args| args[0].tan())
            .register("pow", Arity::Exactly(2), |args| args[0].powf(args[1]))
            .register("mod", Arity::Exactly(2), |args| args[0] % args[1])
            .register("atan2", Arity::Exactly(2), |args| args[0].atan2(args[1]))
            .register("min", Arity::AtLeast(1), |args| {
                args.iter().copied().fold(f64::INFINITY, f64::min)
            })
            .register("max", Arity::AtLeast(1), |args| {
                args.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            })
            .register("sum", Arity::AtLeast(1), |args| args.iter().sum())
            .register("avg", Arity::AtLeast(1), |args| {
                args.iter().sum::<f64>() / args.len() as f64
            });

        table
            .register_constant("pi", std::f64::consts::PI)
            .register_constant("e", std::f64::consts::E);

        table
    }

    /// Add a function, replacing any existing one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, arity: Arity, function: F) -> &mut Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.functions.insert(
            name.into(),
            FunctionEntry {
                arity,
                function: Arc::new(function),
            },
        );
        self
    }

    /// Add a named constant, replacing any existing one.
    pub fn register_constant(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.constants.insert(name.into(), value);
        self
    }

    pub fn function(&self, name: &str) -> Option<(Arity, &NumericFunction)> {
        self.functions
            .get(name)
            .map(|entry| (entry.arity, &entry.function))
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Function names in registration order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTable")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("constants", &self.constants)
            .finish()
    }
}
