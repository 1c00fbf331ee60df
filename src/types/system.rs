use serde::Serialize;
use std::collections::HashSet;

/// Wire value meaning "no useful system".
pub const NO_SYSTEM: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SystemId(pub usize);

impl SystemId {
    pub fn as_wire(self) -> i64 {
        self.0 as i64
    }
}

#[derive(Debug, Clone)]
pub struct SystemCapability {
    id: SystemId,
    name: Option<String>,
    readable: HashSet<String>,
    writable: HashSet<String>,
    suitability: f64,
}

impl SystemCapability {
    pub fn id(&self) -> SystemId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn readable(&self, format_id: &str) -> bool {
        self.readable.contains(format_id)
    }

    pub fn readable_formats(&self) -> &HashSet<String> {
        &self.readable
    }

    pub fn writable_formats(&self) -> &HashSet<String> {
        &self.writable
    }

    /// Score from the most recent selection run.
    pub fn suitability(&self) -> f64 {
        self.suitability
    }

    pub(crate) fn set_suitability(&mut self, suitability: f64) {
        self.suitability = suitability;
    }
}

/// Ordered set of systems. Ids follow insertion order, starting at 0.
#[derive(Debug, Clone, Default)]
pub struct SystemCatalog {
    systems: Vec<SystemCapability>,
}

impl SystemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<R, W, S>(&mut self, name: Option<String>, readable: R, writable: W) -> SystemId
    where
        R: IntoIterator<Item = S>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = SystemId(self.systems.len());
        self.systems.push(SystemCapability {
            id,
            name,
            readable: readable.into_iter().map(Into::into).collect(),
            writable: writable.into_iter().map(Into::into).collect(),
            suitability: 0.0,
        });
        id
    }

    /// Builds a catalog of unnamed systems from `(readable, writable)` pairs.
    #[cfg(test)]
    pub fn from_pairs<I, R, W, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, W)>,
        R: IntoIterator<Item = S>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::new();
        for (readable, writable) in pairs {
            catalog.push(None, readable, writable);
        }
        catalog
    }

    pub fn systems(&self) -> &[SystemCapability] {
        &self.systems
    }

    pub fn systems_mut(&mut self) -> &mut [SystemCapability] {
        &mut self.systems
    }

    pub fn get(&self, id: SystemId) -> Option<&SystemCapability> {
        self.systems.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
