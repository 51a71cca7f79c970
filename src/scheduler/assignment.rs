use super::{tracker::UsageTracker, Scheduler};
use crate::calendar::{self, SLOT_WEEKDAY};
use crate::model::{Pair, Participant, Schedule, Seat};
use chrono::{Duration, NaiveDate};
use tracing::{debug, info, warn};

/// Passe gloutonne unique sur les créneaux, sans retour arrière.
pub(super) fn generate_between(
    scheduler: &Scheduler<'_>,
    start: NaiveDate,
    end: NaiveDate,
) -> Schedule {
    let mut schedule = Schedule::new();
    let mut tracker = UsageTracker::new();

    for date in calendar::slot_dates(start, end, SLOT_WEEKDAY) {
        let pair = scheduler.resolve_slot(date, &schedule, &mut tracker);
        if !pair.is_complete() {
            warn!(%date, pair = %pair, "slot left unresolved");
        }
        schedule.assign(date, pair);
    }

    info!(
        %start,
        %end,
        slots = schedule.len(),
        unresolved = schedule.unresolved_slots().len(),
        "schedule generated"
    );
    schedule
}

impl Scheduler<'_> {
    fn resolve_slot(
        &self,
        date: NaiveDate,
        schedule: &Schedule,
        tracker: &mut UsageTracker,
    ) -> Pair {
        if let Some(fixed) = self.config.fixed_pair_on(date) {
            let (a, b) = &fixed.pair;
            debug!(%date, %a, %b, "fixed pair");
            // Hors règles : l'usage est noté mais le plafond n'est pas consommé.
            tracker.record(a, date);
            tracker.record(b, date);
            return Pair::of(a.clone(), b.clone());
        }

        let must_have = self.config.mandatory_on(date);

        let candidates: Vec<&Participant> = self
            .config
            .participants
            .iter()
            .filter(|p| p.is_available_on(date) && !tracker.assigned_on(&p.name, date))
            .collect();

        let pair = match must_have {
            Some(person) => {
                let partner = candidates
                    .iter()
                    .filter(|p| p.name != person)
                    .find(|p| !tracker.is_capacity_blocked(p));
                debug!(%date, %person, partner = ?partner.map(|p| &p.name), "mandatory slot");
                match partner {
                    Some(p) => Pair::of(person, p.name.clone()),
                    None => Pair::new(Seat::filled(person), Seat::Unresolved),
                }
            }
            None => {
                let previous = date
                    .checked_sub_signed(Duration::days(7))
                    .and_then(|prev| schedule.get(prev));
                let picked = first_open_pair(&candidates, previous, tracker);
                debug!(%date, picked = ?picked.as_ref().map(|p| p.to_string()), "regular slot");
                picked.unwrap_or_else(Pair::unresolved)
            }
        };

        self.record(&pair, date, tracker);
        pair
    }

    fn record(&self, pair: &Pair, date: NaiveDate, tracker: &mut UsageTracker) {
        for name in pair.names() {
            tracker.record(name, date);
            tracker.bump_if_capped(self.config.find_participant(name));
        }
    }
}

/// Premier binôme (ordre du roster, i < j) sans plafond atteint ni présence
/// au créneau de la semaine précédente.
fn first_open_pair(
    candidates: &[&Participant],
    previous: Option<&Pair>,
    tracker: &UsageTracker,
) -> Option<Pair> {
    let open = |p: &Participant| {
        !tracker.is_capacity_blocked(p) && !previous.map_or(false, |prev| prev.contains(&p.name))
    };

    candidates.iter().copied().enumerate().find_map(|(i, a)| {
        if !open(a) {
            return None;
        }
        candidates[i + 1..]
            .iter()
            .copied()
            .find(|b| open(*b))
            .map(|b| Pair::of(a.name.clone(), b.name.clone()))
    })
}
