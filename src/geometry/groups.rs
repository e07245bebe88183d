use crate::foundation::error::{VeilError, VeilResult};

/// A validated partition of `0..point_count` into disjoint, non-empty groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointGroups {
    groups: Vec<Vec<usize>>,
    owner: Vec<usize>,
}

impl PointGroups {
    /// Validate `groups` as an exact partition of `0..point_count`.
    pub fn new(groups: Vec<Vec<usize>>, point_count: usize) -> VeilResult<Self> {
        if groups.is_empty() {
            return Err(VeilError::validation("point groups must not be empty"));
        }
        let mut owner = vec![usize::MAX; point_count];
        for (g, members) in groups.iter().enumerate() {
            if members.is_empty() {
                return Err(VeilError::validation(format!("point group {g} is empty")));
            }
            for &i in members {
                let Some(slot) = owner.get_mut(i) else {
                    return Err(VeilError::validation(format!(
                        "point group {g} references index {i}, but there are only {point_count} points"
                    )));
                };
                if *slot != usize::MAX {
                    return Err(VeilError::validation(format!(
                        "point {i} belongs to groups {} and {g}",
                        *slot
                    )));
                }
                *slot = g;
            }
        }
        if let Some(missing) = owner.iter().position(|&g| g == usize::MAX) {
            return Err(VeilError::validation(format!(
                "point {missing} is not covered by any group"
            )));
        }
        Ok(Self { groups, owner })
    }

    /// One group holding every point.
    pub fn single(point_count: usize) -> VeilResult<Self> {
        Self::new(vec![(0..point_count).collect()], point_count)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.owner.len()
    }

    pub fn group_of(&self, point: usize) -> Option<usize> {
        self.owner.get(point).copied()
    }

    pub fn members(&self, group: usize) -> &[usize] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/groups.rs"]
mod tests;
