use crate::model::Participant;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Suivi interne d'une génération : historique d'usage et compteurs des
/// personnes plafonnées. Créé vide à chaque appel, jamais conservé.
#[derive(Debug, Default)]
pub(super) struct UsageTracker {
    history: HashMap<String, Vec<NaiveDate>>,
    counts: HashMap<String, u32>,
}

impl UsageTracker {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn record(&mut self, name: &str, date: NaiveDate) {
        self.history.entry(name.to_owned()).or_default().push(date);
    }

    /// Vrai si la dernière entrée de l'historique est exactement ce créneau.
    pub(super) fn assigned_on(&self, name: &str, date: NaiveDate) -> bool {
        self.history
            .get(name)
            .and_then(|dates| dates.last())
            .map_or(false, |last| *last == date)
    }

    pub(super) fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Plafond atteint (compté sur toute la génération, pas par mois civil).
    pub(super) fn is_capacity_blocked(&self, person: &Participant) -> bool {
        person
            .max_assignments
            .map_or(false, |cap| self.count(&person.name) >= cap)
    }

    pub(super) fn bump_if_capped(&mut self, person: Option<&Participant>) {
        if let Some(p) = person.filter(|p| p.max_assignments.is_some()) {
            *self.counts.entry(p.name.clone()).or_insert(0) += 1;
        }
    }
}
