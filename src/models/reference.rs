use super::{AuthorId, JournalId, RefId};
use crate::constants::Bibcode;

/// A bibliographic citation, unique by `bibcode`.
///
/// The journal, year and authors are left unresolved by the resolver; they exist so
/// that a later enrichment pass has somewhere to put them.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub id: RefId,
    pub bibcode: Bibcode,
    pub journal: Option<JournalId>,
    pub year: Option<u16>,
    pub authors: Vec<AuthorId>,
}

impl Reference {
    pub fn new(id: RefId, bibcode: &str) -> Self {
        Reference {
            id,
            bibcode: bibcode.to_string(),
            journal: None,
            year: None,
            authors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Journal {
    pub id: JournalId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}
