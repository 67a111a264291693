use super::delta::StepDelta;
use super::form_data::OtherCustomer;

/// Upper bound on contact rows one event can carry.
pub const MAX_OTHER_CUSTOMERS: usize = 20;

/// Step-local list of contacts from other institutes.
///
/// Edits stay local until [`OtherCustomerList::sync_delta`] mirrors the list
/// into the shared `participants.otherInstituteCustomers`; the shared value is
/// never read back into a list that is already being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherCustomerList {
    entries: Vec<OtherCustomer>,
}

impl Default for OtherCustomerList {
    fn default() -> Self {
        Self::new()
    }
}

impl OtherCustomerList {
    /// A fresh list holds one blank row so the form always shows an input.
    pub fn new() -> Self {
        Self { entries: vec![OtherCustomer::default()] }
    }

    /// Start editing from a previously synced list (e.g. when the user comes
    /// back to the step). An empty list starts with a blank row.
    ///
    /// The stored draft is the only place the list survives between requests,
    /// so each request rebuilds it from there before applying the posted edits.
    pub fn resume(synced: &[OtherCustomer]) -> Self {
        if synced.is_empty() {
            Self::new()
        } else {
            let mut entries = synced.to_vec();
            entries.truncate(MAX_OTHER_CUSTOMERS);
            Self { entries }
        }
    }

    pub fn entries(&self) -> &[OtherCustomer] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a blank row. Returns false once the list is full.
    pub fn add(&mut self) -> bool {
        if self.entries.len() >= MAX_OTHER_CUSTOMERS {
            return false;
        }
        self.entries.push(OtherCustomer::default());
        true
    }

    /// Replace the name of entry `index`. Returns false when out of range.
    pub fn edit_name(&mut self, index: usize, name: &str) -> bool {
        self.replace(index, |c| OtherCustomer { name: name.to_string(), phone: c.phone.clone() })
    }

    /// Replace the phone of entry `index`. Returns false when out of range.
    pub fn edit_phone(&mut self, index: usize, phone: &str) -> bool {
        self.replace(index, |c| OtherCustomer { name: c.name.clone(), phone: phone.to_string() })
    }

    pub fn remove(&mut self, index: usize) -> Option<OtherCustomer> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Apply posted rows (`(index, name, phone)`, sorted by index) onto the
    /// list. A row one past the end appends; rows further out or beyond
    /// [`MAX_OTHER_CUSTOMERS`] are dropped.
    pub fn apply_rows(&mut self, rows: &[(usize, String, String)]) {
        for (index, name, phone) in rows {
            if *index == self.entries.len() && !self.add() {
                log::warn!("Dropping customer row {index}: list is full");
                continue;
            }
            if *index >= self.entries.len() {
                log::warn!("Dropping customer row {index}: no such row");
                continue;
            }
            self.edit_name(*index, name);
            self.edit_phone(*index, phone);
        }
    }

    /// Delta mirroring the local list into the shared form state.
    pub fn sync_delta(&self) -> StepDelta {
        StepDelta::OtherCustomers(self.entries.clone())
    }

    fn replace(&mut self, index: usize, f: impl FnOnce(&OtherCustomer) -> OtherCustomer) -> bool {
        match self.entries.get(index) {
            Some(current) => {
                let updated = f(current);
                self.entries[index] = updated;
                true
            }
            None => false,
        }
    }
}
