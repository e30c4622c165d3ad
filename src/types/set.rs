use std::collections::HashSet;

/// Unordered set of unique string members.
#[derive(Debug, Clone, Default)]
pub struct PlainSet {
    data: HashSet<String>,
}

impl PlainSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert members that are not yet present. Returns how many were new.
    pub fn add<I>(&mut self, members: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        members
            .into_iter()
            .map(|member| self.data.insert(member))
            .filter(|&inserted| inserted)
            .count()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.data.contains(member)
    }

    /// A snapshot of the current members.
    pub fn members(&self) -> HashSet<String> {
        self.data.clone()
    }

    pub fn cardinality(&self) -> usize {
        self.data.len()
    }

    /// This set's members minus the union of `others`.
    pub fn difference<'a, I>(&self, others: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a PlainSet>,
    {
        let mut result = self.data.clone();
        for other in others {
            if result.is_empty() {
                break;
            }
            result.retain(|member| !other.contains(member));
        }
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.data.iter()
    }
}
