//! Id-set filters per entity kind.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Surrogate id that no entity carries. Ids that cannot be parsed resolve to
/// it so they match nothing instead of failing the request.
pub const IMPOSSIBLE_ID: i64 = i64::MIN;

/// Kinds of entities a request can filter by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Phenomenon,
    Procedure,
    Offering,
    Feature,
    Category,
    Platform,
    Service,
    Dataset,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Phenomenon => "phenomenon",
            EntityKind::Procedure => "procedure",
            EntityKind::Offering => "offering",
            EntityKind::Feature => "feature",
            EntityKind::Category => "category",
            EntityKind::Platform => "platform",
            EntityKind::Service => "service",
            EntityKind::Dataset => "dataset",
        }
    }

    /// Whether entities of this kind have a parent chain.
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, EntityKind::Procedure | EntityKind::Offering)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity that can be matched by surrogate or domain id.
pub trait Identified {
    fn surrogate_id(&self) -> i64;
    fn domain_id(&self) -> &str;
}

/// Parse a surrogate id, falling back to [`IMPOSSIBLE_ID`].
pub fn parse_to_id(id: &str) -> i64 {
    id.trim().parse().unwrap_or(IMPOSSIBLE_ID)
}

pub fn parse_to_ids<'a, I>(ids: I) -> BTreeSet<i64>
where
    I: IntoIterator<Item = &'a String>,
{
    ids.into_iter().map(|id| parse_to_id(id)).collect()
}

/// Requested ids of one entity kind. Surrogate ids are parsed once, when
/// the filter is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdSetFilter {
    pub kind: EntityKind,
    ids: BTreeSet<String>,
    #[serde(skip)]
    surrogate_ids: BTreeSet<i64>,
    pub match_domain_ids: bool,
}

impl IdSetFilter {
    pub fn new(kind: EntityKind, ids: BTreeSet<String>, match_domain_ids: bool) -> Self {
        let ids: BTreeSet<String> = ids.into_iter().map(|id| id.to_lowercase()).collect();
        let surrogate_ids = parse_to_ids(&ids);
        Self {
            kind,
            ids,
            surrogate_ids,
            match_domain_ids,
        }
    }

    /// Requested ids, lower-cased.
    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Requested ids as surrogate ids.
    pub fn surrogate_ids(&self) -> &BTreeSet<i64> {
        &self.surrogate_ids
    }

    /// Domain ids are compared exactly, ignoring case. Surrogate ids are
    /// compared numerically.
    pub fn matches<E: Identified + ?Sized>(&self, entity: &E) -> bool {
        if self.match_domain_ids {
            let domain_id = entity.domain_id().to_lowercase();
            self.ids.contains(&domain_id)
        } else {
            let id = entity.surrogate_id();
            id != IMPOSSIBLE_ID && self.surrogate_ids.contains(&id)
        }
    }
}

/// An id-set filter that also matches through the parent chain of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchicalIdSetFilter {
    pub filter: IdSetFilter,
}

impl HierarchicalIdSetFilter {
    pub fn new(filter: IdSetFilter) -> Self {
        Self { filter }
    }

    pub fn matches<E, A>(&self, entity: &E, ascendants: &[A]) -> bool
    where
        E: Identified + ?Sized,
        A: Identified,
    {
        self.filter.matches(entity) || ascendants.iter().any(|parent| self.filter.matches(parent))
    }
}

/// One entry of the filter list. All entries of a spec must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum IdFilter {
    Flat(IdSetFilter),
    Hierarchical(HierarchicalIdSetFilter),
}

impl IdFilter {
    /// Build the filter type matching the hierarchy of `kind`.
    pub fn for_kind(kind: EntityKind, ids: BTreeSet<String>, match_domain_ids: bool) -> Self {
        let filter = IdSetFilter::new(kind, ids, match_domain_ids);
        if kind.is_hierarchical() {
            IdFilter::Hierarchical(HierarchicalIdSetFilter::new(filter))
        } else {
            IdFilter::Flat(filter)
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.id_set().kind
    }

    pub fn id_set(&self) -> &IdSetFilter {
        match self {
            IdFilter::Flat(filter) => filter,
            IdFilter::Hierarchical(h) => &h.filter,
        }
    }
}
