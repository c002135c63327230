use infraguard_state::Metadata;

/// One concrete violation: what is wrong and exactly where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub description: String,
    pub location: Metadata,
}

impl Finding {
    pub fn new(description: impl Into<String>, location: &Metadata) -> Self {
        Self {
            description: description.into(),
            location: location.clone(),
        }
    }
}

/// Ordered findings emitted by one check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Findings(Vec<Finding>);

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, description: impl Into<String>, location: &Metadata) {
        self.0.push(Finding::new(description, location));
    }

    pub fn push(&mut self, finding: Finding) {
        self.0.push(finding);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.0.iter()
    }
}

impl IntoIterator for Findings {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Finding> for Findings {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
