//! Grammar symbols and their equivalence classes.

use crate::{matrix::Matrix, matrix::TableError, types::Map, util::verify_ident};
use std::fmt;

/// Named groups of symbols sharing identical rows and columns in the matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups {
    inner: Map<String, Vec<String>>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group with its members in their output order.
    pub fn insert<I, S>(&mut self, label: &str, members: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.inner.contains_key(label) {
            return Err(TableError::DuplicateGroup {
                label: label.to_owned(),
            });
        }
        self.inner
            .insert(label.to_owned(), members.into_iter().map(Into::into).collect());
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.inner.get(label).map(|members| &members[..])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.inner
            .iter()
            .map(|(label, members)| (&**label, &members[..]))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ClassID {
    raw: u16,
}
impl ClassID {
    #[inline]
    const fn new(raw: u16) -> Self {
        Self { raw }
    }

    /// The position of this class in the canonical order.
    #[inline]
    pub const fn index(self) -> usize {
        self.raw as usize
    }
}

/// A row/column of the matrix: either a bare symbol or a group of symbols.
#[derive(Debug)]
pub struct Class {
    id: ClassID,
    label: String,
    members: Option<Vec<String>>,
}
impl Class {
    pub fn id(&self) -> ClassID {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_group(&self) -> bool {
        self.members.is_some()
    }

    /// The bare symbols represented by this class.
    ///
    /// A singleton class yields its own label.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        let (single, members) = match &self.members {
            Some(members) => (None, &members[..]),
            None => (Some(&*self.label), &[][..]),
        };
        single
            .into_iter()
            .chain(members.iter().map(|member| &**member))
    }
}
impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The canonical class order together with group membership.
#[derive(Debug)]
pub struct Classes {
    classes: Map<ClassID, Class>,
    end_marker: ClassID,
}

impl Classes {
    pub fn new(matrix: &Matrix, groups: &Groups) -> Result<Self, TableError> {
        for (label, _) in groups.iter() {
            if matrix.index_of(label).is_none() {
                return Err(TableError::UnknownGroup {
                    label: label.to_owned(),
                });
            }
        }

        let mut seen = Map::default();
        for (label, members) in groups.iter() {
            if members.is_empty() {
                return Err(TableError::EmptyGroup {
                    label: label.to_owned(),
                });
            }
            for member in members {
                if !verify_ident(member) {
                    return Err(TableError::InvalidLabel {
                        label: member.clone(),
                    });
                }
                if matrix.index_of(member).is_some() {
                    return Err(TableError::MemberShadowsClass {
                        symbol: member.clone(),
                    });
                }
                if seen.insert(&**member, ()).is_some() {
                    return Err(TableError::DuplicateMember {
                        symbol: member.clone(),
                    });
                }
            }
        }

        let mut classes = Map::default();
        for (i, label) in matrix.labels().iter().enumerate() {
            let raw = u16::try_from(i).map_err(|_| TableError::from("too many classes"))?;
            let id = ClassID::new(raw);
            classes.insert(
                id,
                Class {
                    id,
                    label: label.clone(),
                    members: groups.get(label).map(<[String]>::to_vec),
                },
            );
        }

        let end_marker = ClassID::new(matrix.end_marker_index() as u16);
        tracing::debug!(
            "{} classes, {} groups, end marker = {}",
            classes.len(),
            groups.len(),
            matrix.end_marker()
        );

        Ok(Self {
            classes,
            end_marker,
        })
    }

    /// The classes in canonical order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> + '_ {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Look up a class by its label.
    pub fn get(&self, label: &str) -> Option<&Class> {
        self.classes.values().find(|class| class.label == label)
    }

    pub fn is_group(&self, label: &str) -> bool {
        self.get(label).map_or(false, Class::is_group)
    }

    /// Return the member list of a group class, or `None` for a bare symbol.
    pub fn members(&self, id: ClassID) -> Option<&[String]> {
        self.classes[&id].members.as_deref()
    }

    pub fn end_marker(&self) -> &Class {
        &self.classes[&self.end_marker]
    }

    /// All bare symbols in canonical order, with groups expanded in place.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.values().flat_map(Class::symbols)
    }
}

impl std::ops::Index<ClassID> for Classes {
    type Output = Class;

    fn index(&self, id: ClassID) -> &Self::Output {
        &self.classes[&id]
    }
}
