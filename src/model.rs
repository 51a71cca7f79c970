use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Marqueur affiché pour une place non pourvue.
pub const UNRESOLVED_MARKER: &str = "??";

/// Participant du roulement, identifié par son nom (unique dans le roster).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    /// Première date de disponibilité ; absent = toujours disponible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<NaiveDate>,
    /// Plafond d'assignations sur une génération ; absent = illimité.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_assignments: Option<u32>,
}

impl Participant {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            available_from: None,
            max_assignments: None,
        }
    }

    pub fn available_from(mut self, date: NaiveDate) -> Self {
        self.available_from = Some(date);
        self
    }

    pub fn with_cap(mut self, cap: u32) -> Self {
        self.max_assignments = Some(cap);
        self
    }

    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.available_from.map_or(true, |from| from <= date)
    }
}

/// Binôme imposé pour une date donnée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPair {
    pub date: NaiveDate,
    pub pair: (String, String),
}

/// Dates auxquelles une personne doit obligatoirement être présente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryDates {
    pub person: String,
    pub dates: Vec<NaiveDate>,
}

/// Une place dans un binôme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seat {
    Filled(String),
    Unresolved,
}

impl Seat {
    pub fn filled<S: Into<String>>(name: S) -> Self {
        Seat::Filled(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Seat::Filled(name) => Some(name),
            Seat::Unresolved => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Seat::Unresolved)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(UNRESOLVED_MARKER))
    }
}

/// Binôme assigné à un créneau. L'ordre n'a de sens que pour l'affichage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub first: Seat,
    pub second: Seat,
}

impl Pair {
    pub fn new(first: Seat, second: Seat) -> Self {
        Self { first, second }
    }

    pub fn of<A: Into<String>, B: Into<String>>(a: A, b: B) -> Self {
        Self::new(Seat::filled(a), Seat::filled(b))
    }

    pub fn unresolved() -> Self {
        Self::new(Seat::Unresolved, Seat::Unresolved)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Noms réels du binôme (sans les places non pourvues).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.first.name().into_iter().chain(self.second.name())
    }

    pub fn is_complete(&self) -> bool {
        !self.first.is_unresolved() && !self.second.is_unresolved()
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

/// Résultat d'une génération : créneau -> binôme, trié chronologiquement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    slots: BTreeMap<NaiveDate, Pair>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Un créneau assigné n'est jamais réécrit ; renvoie `false` si la date existait déjà.
    pub fn assign(&mut self, date: NaiveDate, pair: Pair) -> bool {
        if self.slots.contains_key(&date) {
            return false;
        }
        self.slots.insert(date, pair);
        true
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Pair> {
        self.slots.get(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &Pair)> {
        self.slots.iter().map(|(d, p)| (*d, p))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Dates ayant au moins une place non pourvue.
    pub fn unresolved_slots(&self) -> Vec<NaiveDate> {
        self.iter()
            .filter(|(_, pair)| !pair.is_complete())
            .map(|(date, _)| date)
            .collect()
    }

    /// Nombre d'apparitions par personne sur l'ensemble du planning.
    pub fn participation_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for (_, pair) in self.iter() {
            for name in pair.names() {
                *counts.entry(name).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn pair_display_uses_marker_for_missing_seats() {
        let half = Pair::new(Seat::filled("Ana"), Seat::Unresolved);
        assert_eq!(half.to_string(), "Ana & ??");
        assert_eq!(Pair::unresolved().to_string(), "?? & ??");
        assert!(!half.is_complete());
        assert!(half.contains("Ana"));
        assert!(!half.contains("??"));
    }

    #[test]
    fn schedule_never_overwrites_a_slot() {
        let mut schedule = Schedule::new();
        assert!(schedule.assign(d(2025, 7, 4), Pair::of("Ana", "Rui")));
        assert!(!schedule.assign(d(2025, 7, 4), Pair::of("Eva", "Luis")));
        assert_eq!(schedule.get(d(2025, 7, 4)), Some(&Pair::of("Ana", "Rui")));
    }

    #[test]
    fn participant_without_availability_is_always_available() {
        let p = Participant::new("Ana");
        assert!(p.is_available_on(d(1900, 1, 5)));
        let late = Participant::new("Rui").available_from(d(2025, 7, 25));
        assert!(!late.is_available_on(d(2025, 7, 18)));
        assert!(late.is_available_on(d(2025, 7, 25)));
    }
}
