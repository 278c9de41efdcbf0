//! Coefficient-store boundary.
//!
//! The engine never reads coefficient files itself. It asks a
//! [`CoefficientStore`] for the vector stored under a working pair, an
//! equation name and a variant index, and receives the values together with a
//! tag saying which domain the record belongs to.

use std::collections::HashMap;

/// Placeholder sorbent under which refrigerant-only records are stored.
pub const REFRIGERANT_SORBENT: &str = "dum_sorb";

/// Placeholder sorbent sub-type under which refrigerant-only records are stored.
pub const REFRIGERANT_SUBTYPE: &str = "dum_subtype";

/// Identifies a working pair in the coefficient store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairId {
    pub sorbent: String,
    pub subtype: String,
    pub refrigerant: String,
}

impl PairId {
    #[must_use]
    pub fn new(
        sorbent: impl Into<String>,
        subtype: impl Into<String>,
        refrigerant: impl Into<String>,
    ) -> Self {
        Self {
            sorbent: sorbent.into(),
            subtype: subtype.into(),
            refrigerant: refrigerant.into(),
        }
    }

    /// Key under which the refrigerant's own property records are stored.
    #[must_use]
    pub fn refrigerant(refrigerant: impl Into<String>) -> Self {
        Self::new(REFRIGERANT_SORBENT, REFRIGERANT_SUBTYPE, refrigerant)
    }
}

/// Domain tag attached to every stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Adsorption,
    Absorption,
    Refrigerant,
}

/// A coefficient vector and its domain tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRecord {
    pub kind: RecordKind,
    pub values: Vec<f64>,
}

impl CoefficientRecord {
    #[must_use]
    pub fn new(kind: RecordKind, values: impl Into<Vec<f64>>) -> Self {
        Self {
            kind,
            values: values.into(),
        }
    }
}

/// Source of coefficient vectors.
pub trait CoefficientStore {
    /// Returns the record stored for `id`, `equation` and `variant`, if any.
    fn coefficients(&self, id: &PairId, equation: &str, variant: usize)
    -> Option<CoefficientRecord>;
}

impl<S: CoefficientStore + ?Sized> CoefficientStore for &S {
    fn coefficients(
        &self,
        id: &PairId,
        equation: &str,
        variant: usize,
    ) -> Option<CoefficientRecord> {
        (**self).coefficients(id, equation, variant)
    }
}

type RecordKey = (PairId, String, usize);

/// An in-memory [`CoefficientStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<RecordKey, CoefficientRecord>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record`, replacing any previous record under the same key.
    pub fn insert(
        &mut self,
        id: PairId,
        equation: impl Into<String>,
        variant: usize,
        record: CoefficientRecord,
    ) {
        self.records.insert((id, equation.into(), variant), record);
    }

    /// Builder-style [`MemoryStore::insert`].
    #[must_use]
    pub fn with(
        mut self,
        id: PairId,
        equation: impl Into<String>,
        variant: usize,
        record: CoefficientRecord,
    ) -> Self {
        self.insert(id, equation, variant, record);
        self
    }

    /// Stores a refrigerant-only record under [`PairId::refrigerant`].
    #[must_use]
    pub fn with_refrigerant(
        self,
        refrigerant: &str,
        equation: impl Into<String>,
        variant: usize,
        values: impl Into<Vec<f64>>,
    ) -> Self {
        self.with(
            PairId::refrigerant(refrigerant),
            equation,
            variant,
            CoefficientRecord::new(RecordKind::Refrigerant, values),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CoefficientStore for MemoryStore {
    fn coefficients(
        &self,
        id: &PairId,
        equation: &str,
        variant: usize,
    ) -> Option<CoefficientRecord> {
        self.records
            .get(&(id.clone(), equation.to_owned(), variant))
            .cloned()
    }
}
