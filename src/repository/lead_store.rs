//! Lead Store
//!
//! Owns the lead collection for the session. Every change is written back
//! through the persistence port as one full document.

use crate::calendar::DateRange;
use crate::domain::pipeline::{self, transition_allowed};
use crate::domain::{CalendarDate, Lead, LeadDraft, LeadPatch, LeadStatus, Outcome};

use super::collection;
use super::traits::{CollectionPort, StorageResult};

/// Storage key of the lead collection
pub const LEADS_KEY: &str = "leads";

pub struct LeadStore {
    leads: Vec<Lead>,
    port: Box<dyn CollectionPort<Vec<Lead>>>,
}

impl LeadStore {
    /// Rehydrate from the port, falling back to (and persisting) `seed`
    pub fn open(
        port: Box<dyn CollectionPort<Vec<Lead>>>,
        seed: impl FnOnce() -> Vec<Lead>,
    ) -> StorageResult<Self> {
        let leads = match port.load()? {
            Some(leads) => {
                log::info!("Loaded {} leads", leads.len());
                leads
            }
            None => {
                let leads = seed();
                log::info!("No stored leads, starting from {} seed leads", leads.len());
                port.save(&leads)?;
                leads
            }
        };
        Ok(Self { leads, port })
    }

    pub fn list(&self) -> &[Lead] {
        &self.leads
    }

    pub fn get(&self, id: &str) -> Option<&Lead> {
        collection::find(&self.leads, id)
    }

    /// Add a `todo` lead on the draft's cohort day; blank fields are accepted
    pub fn create(&mut self, draft: LeadDraft) -> StorageResult<String> {
        let lead = Lead::from_draft(draft);
        let id = lead.id.clone();
        log::debug!("Creating lead {} on {}", id, lead.date);
        self.leads.push(lead);
        self.flush()?;
        Ok(id)
    }

    /// Edit name/company/notes/value; `false` for an unknown id
    pub fn update(&mut self, id: &str, patch: LeadPatch) -> StorageResult<bool> {
        let Some(lead) = collection::find_mut(&mut self.leads, id) else {
            log::debug!("Update of unknown lead {} ignored", id);
            return Ok(false);
        };
        lead.apply(patch);
        self.flush()?;
        Ok(true)
    }

    /// Remove immediately; `false` for an unknown id
    pub fn delete(&mut self, id: &str) -> StorageResult<bool> {
        if !collection::remove(&mut self.leads, id) {
            log::debug!("Delete of unknown lead {} ignored", id);
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Move one lead to `status` if the pipeline allows that step.
    ///
    /// Returns whether the status changed. Unknown ids and illegal steps are
    /// silent no-ops.
    pub fn move_to(&mut self, id: &str, status: LeadStatus) -> StorageResult<bool> {
        let Some(lead) = collection::find_mut(&mut self.leads, id) else {
            log::debug!("Move of unknown lead {} ignored", id);
            return Ok(false);
        };
        if lead.status == status {
            return Ok(false);
        }
        if !transition_allowed(lead.status, status) {
            log::debug!("Move {} -> {} not allowed for lead {}", lead.status, status, id);
            return Ok(false);
        }
        lead.status = status;
        self.flush()?;
        Ok(true)
    }

    /// Apply `move_to` to every id in `ids` with a single flush; returns how
    /// many leads changed.
    pub fn bulk_move<S: AsRef<str>>(&mut self, ids: &[S], status: LeadStatus) -> StorageResult<usize> {
        self.bulk_apply(ids, |current| {
            (current != status && transition_allowed(current, status)).then_some(status)
        })
    }

    /// Advance every listed lead whose next stage is `next_stage`; others,
    /// including listed leads sitting in a different column, are untouched.
    pub fn bulk_advance<S: AsRef<str>>(&mut self, ids: &[S], next_stage: LeadStatus) -> StorageResult<usize> {
        self.bulk_apply(ids, |current| {
            (pipeline::advance(current) == Some(next_stage)).then_some(next_stage)
        })
    }

    /// Next stage of the sequence; `None` when disabled or unknown
    pub fn advance(&mut self, id: &str) -> StorageResult<Option<LeadStatus>> {
        self.step(id, pipeline::advance)
    }

    pub fn resolve(&mut self, id: &str, outcome: Outcome) -> StorageResult<Option<LeadStatus>> {
        self.step(id, |current| pipeline::resolve(current, outcome))
    }

    pub fn revert_to_c4(&mut self, id: &str) -> StorageResult<Option<LeadStatus>> {
        self.step(id, pipeline::revert_to_c4)
    }

    /// Leads on the board of `day` (cohort carry-forward)
    pub fn for_day(&self, day: CalendarDate) -> Vec<&Lead> {
        self.leads
            .iter()
            .filter(|lead| pipeline::appears_on(lead, day))
            .collect()
    }

    /// Leads whose cohort date falls inside `range`
    pub fn in_range(&self, range: DateRange) -> Vec<&Lead> {
        self.leads
            .iter()
            .filter(|lead| range.contains(lead.date))
            .collect()
    }

    fn step(
        &mut self,
        id: &str,
        rule: impl FnOnce(LeadStatus) -> Option<LeadStatus>,
    ) -> StorageResult<Option<LeadStatus>> {
        let Some(lead) = collection::find_mut(&mut self.leads, id) else {
            return Ok(None);
        };
        let Some(next) = rule(lead.status) else {
            return Ok(None);
        };
        lead.status = next;
        self.flush()?;
        Ok(Some(next))
    }

    fn bulk_apply<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        rule: impl Fn(LeadStatus) -> Option<LeadStatus>,
    ) -> StorageResult<usize> {
        let mut changed = 0;
        for lead in self
            .leads
            .iter_mut()
            .filter(|lead| ids.iter().any(|id| id.as_ref() == lead.id))
        {
            if let Some(next) = rule(lead.status) {
                lead.status = next;
                changed += 1;
            }
        }
        if changed > 0 {
            self.flush()?;
        }
        Ok(changed)
    }

    fn flush(&self) -> StorageResult<()> {
        self.port.save(&self.leads)
    }
}
