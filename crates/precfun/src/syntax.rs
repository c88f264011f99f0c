//! Syntax support for precedence table files.

pub mod ast;
pub mod lexer;

use self::lexer::{Keyword, Lexer, Spanned, Token};
use crate::{
    matrix::{Matrix, TableError},
    relation::Relation,
    symbol::Groups,
};
use anyhow::{anyhow, bail};
use lexgen_util::Loc;
use std::{fs, path::Path, vec};

pub fn parse(source: &str) -> anyhow::Result<ast::Table> {
    let span = tracing::trace_span!("parse");
    let _entered = span.enter();

    let tokens = Lexer::new(source)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| anyhow!("invalid token: {:?}", err))?;
    tracing::trace!("{} tokens", tokens.len());

    let mut parser = Parser {
        tokens: tokens.into_iter(),
        last: None,
    };
    let mut stmts = vec![];
    while let Some((loc, token, _)) = parser.next() {
        let stmt = match token {
            Token::Kw(Keyword::Group) => {
                let label = parser.ident()?;
                parser.expect(Token::Eq, "`='")?;
                let members = parser.idents()?;
                ast::Stmt::GroupDesc(ast::GroupDesc { label, members })
            }
            Token::Kw(Keyword::End) => {
                let label = parser.ident()?;
                parser.expect(Token::Semicolon, "`;'")?;
                ast::Stmt::EndDesc(ast::EndDesc { label })
            }
            Token::Kw(Keyword::Columns) => {
                let labels = parser.idents()?;
                ast::Stmt::ColumnsDesc(ast::ColumnsDesc { labels })
            }
            Token::Kw(Keyword::Order) => {
                let labels = parser.idents()?;
                ast::Stmt::OrderDesc(ast::OrderDesc { labels })
            }
            Token::Kw(Keyword::Row) => {
                let label = parser.ident()?;
                parser.expect(Token::Colon, "`:'")?;
                let cells = parser.relations()?;
                ast::Stmt::RowDesc(ast::RowDesc { label, cells })
            }
            token => bail!("{}: expected a statement, found {:?}", pos(loc), token),
        };
        tracing::trace!("parsed {:?}", stmt);
        stmts.push(stmt);
    }

    Ok(ast::Table { stmts })
}

struct Parser<'input> {
    tokens: vec::IntoIter<Spanned<'input>>,
    last: Option<Loc>,
}

impl<'input> Parser<'input> {
    fn next(&mut self) -> Option<Spanned<'input>> {
        let spanned = self.tokens.next()?;
        self.last.replace(spanned.2);
        Some(spanned)
    }

    fn next_or_eof(&mut self, expected: &str) -> anyhow::Result<(Loc, Token<'input>)> {
        match self.next() {
            Some((loc, token, _)) => Ok((loc, token)),
            None => match self.last {
                Some(loc) => bail!("{}: expected {}, found end of input", pos(loc), expected),
                None => bail!("expected {}, found end of input", expected),
            },
        }
    }

    fn expect(&mut self, expected: Token<'_>, what: &str) -> anyhow::Result<()> {
        match self.next_or_eof(what)? {
            (_, token) if token == expected => Ok(()),
            (loc, token) => bail!("{}: expected {}, found {:?}", pos(loc), what, token),
        }
    }

    fn ident(&mut self) -> anyhow::Result<String> {
        match self.next_or_eof("an identifier")? {
            (_, Token::Ident(ident)) => Ok(ident.to_owned()),
            (loc, token) => bail!("{}: expected an identifier, found {:?}", pos(loc), token),
        }
    }

    // IDENT ("," IDENT)* ";"
    fn idents(&mut self) -> anyhow::Result<Vec<String>> {
        let mut idents = vec![self.ident()?];
        loop {
            match self.next_or_eof("`,' or `;'")? {
                (_, Token::Comma) => idents.push(self.ident()?),
                (_, Token::Semicolon) => return Ok(idents),
                (loc, token) => bail!("{}: expected `,' or `;', found {:?}", pos(loc), token),
            }
        }
    }

    // REL* ";"
    fn relations(&mut self) -> anyhow::Result<Vec<Relation>> {
        let mut cells = vec![];
        loop {
            let relation = match self.next_or_eof("a relation or `;'")? {
                (_, Token::Semicolon) => return Ok(cells),
                (_, Token::Lt) => Relation::Less,
                (_, Token::Gt) => Relation::Greater,
                (_, Token::Eq) => Relation::Equal,
                (_, Token::Dot) => Relation::None,
                // The letter `x' is accepted as "no relation".
                (_, Token::Ident(ident)) if ident.chars().all(|ch| ch == 'x') => {
                    cells.extend(ident.chars().map(|_| Relation::None));
                    continue;
                }
                (loc, token) => bail!("{}: expected a relation, found {:?}", pos(loc), token),
            };
            cells.push(relation);
        }
    }
}

fn pos(loc: Loc) -> String {
    format!("{}:{}", loc.line + 1, loc.col + 1)
}

/// The contents of a precedence table file.
#[derive(Debug)]
pub struct TableFile {
    pub matrix: Matrix,
    pub groups: Groups,
    /// The symbol order requested by `@order`, if any.
    pub order: Option<Vec<String>>,
}

impl TableFile {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let source = fs::read_to_string(path).map_err(TableError::IO)?;
        Self::from_str(&source)
    }

    pub fn from_str(source: &str) -> Result<Self, TableError> {
        let table = parse(source).map_err(TableError::Syntax)?;
        lower(table)
    }
}

fn lower(table: ast::Table) -> Result<TableFile, TableError> {
    let mut groups = Groups::new();
    let mut end = None;
    let mut columns = None;
    let mut order = None;
    let mut rows = vec![];

    for stmt in table.stmts {
        match stmt {
            ast::Stmt::GroupDesc(ast::GroupDesc { label, members }) => {
                groups.insert(&label, members)?;
            }
            ast::Stmt::EndDesc(ast::EndDesc { label }) => {
                if end.replace(label).is_some() {
                    return Err("duplicate @end statement".into());
                }
            }
            ast::Stmt::ColumnsDesc(ast::ColumnsDesc { labels }) => {
                if columns.replace(labels).is_some() {
                    return Err("duplicate @columns statement".into());
                }
            }
            ast::Stmt::OrderDesc(ast::OrderDesc { labels }) => {
                if order.replace(labels).is_some() {
                    return Err("duplicate @order statement".into());
                }
            }
            ast::Stmt::RowDesc(ast::RowDesc { label, cells }) => {
                rows.push((label, cells));
            }
        }
    }

    let end = end.ok_or_else(|| TableError::from("missing @end statement"))?;
    let columns = columns.ok_or_else(|| TableError::from("missing @columns statement"))?;
    let matrix = Matrix::new(columns, rows, &end)?;

    Ok(TableFile {
        matrix,
        groups,
        order,
    })
}
