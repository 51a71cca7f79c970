use crate::model::{FixedPair, MandatoryDates, Participant};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Configuration complète d'une génération : roster et contraintes.
///
/// L'ordre de `participants` fixe l'ordre de parcours des candidats,
/// l'ordre de `mandatory` fixe la priorité quand deux personnes sont
/// obligatoires le même jour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub fixed_pairs: Vec<FixedPair>,
    #[serde(default)]
    pub mandatory: Vec<MandatoryDates>,
}

impl Config {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            fixed_pairs: Vec::new(),
            mandatory: Vec::new(),
        }
    }

    pub fn with_fixed_pair<A: Into<String>, B: Into<String>>(
        mut self,
        date: NaiveDate,
        a: A,
        b: B,
    ) -> Self {
        self.fixed_pairs.push(FixedPair {
            date,
            pair: (a.into(), b.into()),
        });
        self
    }

    pub fn with_mandatory<S: Into<String>>(mut self, person: S, dates: Vec<NaiveDate>) -> Self {
        self.mandatory.push(MandatoryDates {
            person: person.into(),
            dates,
        });
        self
    }

    pub fn find_participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Binôme imposé pour cette date (le premier déclaré l'emporte).
    pub fn fixed_pair_on(&self, date: NaiveDate) -> Option<&FixedPair> {
        self.fixed_pairs.iter().find(|f| f.date == date)
    }

    /// Première personne obligatoire à cette date, dans l'ordre de configuration.
    pub fn mandatory_on(&self, date: NaiveDate) -> Option<&str> {
        self.mandatory
            .iter()
            .find(|m| m.dates.contains(&date))
            .map(|m| m.person.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for p in &self.participants {
            if p.name.trim().is_empty() {
                bail!("participant name cannot be empty");
            }
            if !seen.insert(p.name.as_str()) {
                bail!("duplicate participant: {}", p.name);
            }
        }

        for fixed in &self.fixed_pairs {
            let (a, b) = &fixed.pair;
            if a == b {
                bail!("fixed pair on {} uses {} twice", fixed.date, a);
            }
            for name in [a, b] {
                if !seen.contains(name.as_str()) {
                    warn!(date = %fixed.date, name = %name, "fixed pair references a name outside the roster");
                }
            }
        }

        for m in &self.mandatory {
            if m.person.trim().is_empty() {
                bail!("mandatory entry without person");
            }
            if !seen.contains(m.person.as_str()) {
                warn!(name = %m.person, "mandatory dates for a name outside the roster");
            }
        }
        Ok(())
    }

    /// Roster livré avec l'outil (saison juillet-octobre 2025).
    pub fn builtin() -> Self {
        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).expect("valid builtin date");
        Config::new(vec![
            Participant::new("Carlos Correia"),
            Participant::new("Jose Cocenas"),
            Participant::new("Antonio Ruas"),
            Participant::new("Jose Vendeiro"),
            Participant::new("Antonio Vidinha").available_from(date(7, 25)),
            Participant::new("Arlindo Vendeiro").with_cap(1),
        ])
        .with_fixed_pair(date(7, 11), "Carlos Correia", "Jose Vendeiro")
        .with_mandatory(
            "Antonio Ruas",
            vec![date(7, 25), date(8, 29), date(9, 19), date(10, 17)],
        )
    }
}
