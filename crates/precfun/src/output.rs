//! Rendering of the precedence functions as literal arrays.

use crate::{
    expand::PrecedenceFunctions, matrix::TableError, symbol::Classes, util::display_fn,
    util::verify_ident,
};
use std::fmt;

/// The target language of the emitted arrays.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Format {
    /// `f = [..]` / `g = [..]`
    #[default]
    Plain,
    /// Two `pub static` items.
    Rust,
    /// Two `static const int` arrays.
    C,
}

/// The `f` and `g` values laid out in the requested symbol order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequences {
    pub symbols: Vec<String>,
    pub f: Vec<u32>,
    pub g: Vec<u32>,
}

impl Sequences {
    /// Arrange the values of `funcs` in the specified order.
    ///
    /// A group label in `order` stands for all of its members in their defined
    /// order. When `order` is `None`, the canonical class order is used.
    pub fn new<S>(
        funcs: &PrecedenceFunctions,
        classes: &Classes,
        order: Option<&[S]>,
    ) -> Result<Self, TableError>
    where
        S: AsRef<str>,
    {
        let symbols: Vec<String> = match order {
            Some(order) => {
                let mut symbols = vec![];
                for label in order {
                    let label = label.as_ref();
                    match classes.get(label) {
                        Some(class) => symbols.extend(class.symbols().map(str::to_owned)),
                        None if funcs.get(label).is_some() => symbols.push(label.to_owned()),
                        None => {
                            return Err(TableError::UnknownSymbol {
                                label: label.to_owned(),
                            })
                        }
                    }
                }
                symbols
            }
            None => classes.symbols().map(str::to_owned).collect(),
        };

        let mut f = Vec::with_capacity(symbols.len());
        let mut g = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            let values = funcs
                .get(symbol)
                .ok_or_else(|| TableError::UnknownSymbol {
                    label: symbol.clone(),
                })?;
            f.push(values.f);
            g.push(values.g);
        }

        Ok(Self { symbols, f, g })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Render both arrays in the given format.
    ///
    /// `name` prefixes the array names (`NAME_F` in Rust, `name_f` in C);
    /// without it the arrays are simply called `F`/`G` or `f`/`g`.
    pub fn render<'a>(
        &'a self,
        format: Format,
        name: Option<&'a str>,
    ) -> Result<impl fmt::Display + 'a, TableError> {
        if let Some(name) = name {
            if !verify_ident(name) {
                return Err(TableError::InvalidLabel {
                    label: name.to_owned(),
                });
            }
        }

        Ok(display_fn(move |f| match format {
            Format::Plain => write!(f, "{}", self),
            Format::Rust => {
                let (f_name, g_name) = match name {
                    Some(name) => (
                        format!("{}_F", name.to_uppercase()),
                        format!("{}_G", name.to_uppercase()),
                    ),
                    None => ("F".to_owned(), "G".to_owned()),
                };
                writeln!(f, "// {}", self.symbols.join(", "))?;
                writeln!(
                    f,
                    "pub static {}: [u32; {}] = {};",
                    f_name,
                    self.len(),
                    List(&self.f, "[", "]")
                )?;
                writeln!(
                    f,
                    "pub static {}: [u32; {}] = {};",
                    g_name,
                    self.len(),
                    List(&self.g, "[", "]")
                )
            }
            Format::C => {
                let (f_name, g_name) = match name {
                    Some(name) => (
                        format!("{}_f", name.to_lowercase()),
                        format!("{}_g", name.to_lowercase()),
                    ),
                    None => ("f".to_owned(), "g".to_owned()),
                };
                writeln!(f, "/* {} */", self.symbols.join(", "))?;
                writeln!(
                    f,
                    "static const int {}[{}] = {};",
                    f_name,
                    self.len(),
                    List(&self.f, "{", "}")
                )?;
                writeln!(
                    f,
                    "static const int {}[{}] = {};",
                    g_name,
                    self.len(),
                    List(&self.g, "{", "}")
                )
            }
        }))
    }
}

impl fmt::Display for Sequences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "f = {}", List(&self.f, "[", "]"))?;
        writeln!(f, "g = {}", List(&self.g, "[", "]"))
    }
}

struct List<'a>(&'a [u32], &'static str, &'static str);
impl fmt::Display for List<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.1)?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(self.2)
    }
}
