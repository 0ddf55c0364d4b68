use shared::Modality;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// One optional file per modality slot.
///
/// Every `Modality` has a slot from construction onwards; slots are only ever
/// filled or emptied, never added or removed.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalityFileSet<F> {
    slots: BTreeMap<Modality, Option<F>>,
}

impl<F> ModalityFileSet<F> {
    pub fn new() -> Self {
        Self {
            slots: Modality::iter().map(|modality| (modality, None)).collect(),
        }
    }

    pub fn set_file(&mut self, slot: Modality, file: Option<F>) {
        if let Some(value) = self.slots.get_mut(&slot) {
            *value = file;
        }
    }

    pub fn reset(&mut self) {
        for value in self.slots.values_mut() {
            *value = None;
        }
    }

    pub fn get(&self, slot: Modality) -> Option<&F> {
        self.slots.get(&slot).and_then(Option::as_ref)
    }

    pub fn is_complete(&self) -> bool {
        self.slots
            .iter()
            .all(|(modality, file)| !modality.required() || file.is_some())
    }

    /// Required slots that are still empty, in modality order.
    pub fn missing(&self) -> Vec<Modality> {
        self.slots
            .iter()
            .filter(|(modality, file)| modality.required() && file.is_none())
            .map(|(modality, _)| *modality)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Modality, Option<&F>)> {
        self.slots
            .iter()
            .map(|(modality, file)| (*modality, file.as_ref()))
    }
}

impl<F: Clone> ModalityFileSet<F> {
    /// Copies the current selection into a request, or `None` while a required slot is empty.
    pub fn snapshot(&self) -> Option<PredictionRequest<F>> {
        if !self.is_complete() {
            return None;
        }

        let files = self
            .slots
            .iter()
            .filter_map(|(modality, file)| file.clone().map(|file| (*modality, file)))
            .collect();
        Some(PredictionRequest { files })
    }
}

impl<F> Default for ModalityFileSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The files submitted by one prediction, fixed at submit time.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionRequest<F> {
    files: Vec<(Modality, F)>,
}

impl<F> PredictionRequest<F> {
    pub fn files(&self) -> &[(Modality, F)] {
        &self.files
    }
}
