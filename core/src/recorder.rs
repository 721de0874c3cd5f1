//! Append-only choice log.

use fairwalk_types::{ChoiceRecord, ScenarioId};

/// Choice records with a monotonic revision counter.
///
/// The revision is bumped on every mutation so views can use it as a cache key.
/// Past records are never edited; the only way to shrink the log is [`clear`],
/// which the session calls on reset.
///
/// [`clear`]: ChoiceRecorder::clear
#[derive(Debug, Clone, Default)]
pub struct ChoiceRecorder {
    records: Vec<ChoiceRecord>,
    revision: usize,
}

impl ChoiceRecorder {
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[ChoiceRecord] {
        &self.records
    }

    #[inline]
    #[must_use]
    pub fn revision(&self) -> usize {
        self.revision
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&ChoiceRecord> {
        self.records.last()
    }

    #[must_use]
    pub fn contains(&self, scenario_id: ScenarioId) -> bool {
        self.records
            .iter()
            .any(|record| record.scenario_id == scenario_id)
    }

    pub fn append(&mut self, record: ChoiceRecord) {
        self.records.push(record);
        self.bump();
    }

    pub(crate) fn clear(&mut self) {
        if self.records.is_empty() {
            return;
        }
        self.records.clear();
        self.bump();
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<'a> IntoIterator for &'a ChoiceRecorder {
    type Item = &'a ChoiceRecord;
    type IntoIter = std::slice::Iter<'a, ChoiceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
