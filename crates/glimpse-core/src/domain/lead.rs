use serde::{Deserialize, Serialize};

/// Maximum length of every free-text lead column.
pub const LEAD_TEXT_MAX: usize = 100;

/// Lead entity - a sales lead whose id comes from the import source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i32,
    pub lead_name: Option<String>,
    pub email: Option<String>,
    pub source: Option<String>,
    pub interest_level: Option<String>,
    pub status: Option<String>,
    pub salesperson: Option<String>,
}

/// Equality filters for listing leads.
///
/// When `id` is present it is the only criterion applied; use
/// [`LeadFilter::effective`] to obtain the filter a repository should run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub source: Option<String>,
    pub interest_level: Option<String>,
    pub status: Option<String>,
    pub salesperson: Option<String>,
}

impl LeadFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Drop every criterion other than `id` when `id` is set.
    pub fn effective(self) -> Self {
        match self.id {
            Some(id) => Self::by_id(id),
            None => self,
        }
    }

    /// Whether `lead` satisfies the effective filter.
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(id) = self.id {
            return lead.id == id;
        }
        fn eq(wanted: &Option<String>, actual: &Option<String>) -> bool {
            wanted.as_ref().is_none_or(|w| actual.as_deref() == Some(w.as_str()))
        }
        eq(&self.name, &lead.lead_name)
            && eq(&self.source, &lead.source)
            && eq(&self.interest_level, &lead.interest_level)
            && eq(&self.status, &lead.status)
            && eq(&self.salesperson, &lead.salesperson)
    }
}
