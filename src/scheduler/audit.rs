use super::{Scheduler, Violation, ViolationKind};
use crate::model::Schedule;
use chrono::Duration;
use std::collections::HashMap;

pub(super) fn audit(scheduler: &Scheduler<'_>, schedule: &Schedule) -> Vec<Violation> {
    let config = scheduler.config;
    let mut out = Vec::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for (date, pair) in schedule.iter() {
        if let (Some(a), Some(b)) = (pair.first.name(), pair.second.name()) {
            if a == b {
                out.push(violation(date, a, ViolationKind::SelfPair));
            }
        }

        let fixed = config.fixed_pair_on(date).is_some();
        let mandatory = config.mandatory_on(date);

        if let Some(person) = mandatory.filter(|_| !fixed) {
            if !pair.contains(person) {
                out.push(violation(date, person, ViolationKind::MandatoryMissing));
            }
        }

        let previous = date
            .checked_sub_signed(Duration::days(7))
            .and_then(|prev| schedule.get(prev));

        for name in pair.names() {
            let participant = config.find_participant(name);

            if participant.map_or(false, |p| !p.is_available_on(date)) && !fixed {
                out.push(violation(date, name, ViolationKind::BeforeAvailability));
            }

            if !fixed {
                let count = counts.entry(name).or_insert(0);
                *count += 1;
                if let Some(cap) = participant.and_then(|p| p.max_assignments) {
                    if *count == cap + 1 {
                        out.push(violation(date, name, ViolationKind::CapExceeded));
                    }
                }
            }

            let chosen_freely = !fixed && mandatory.is_none();
            if chosen_freely && previous.map_or(false, |prev| prev.contains(name)) {
                out.push(violation(date, name, ViolationKind::BackToBack));
            }
        }
    }

    out
}

fn violation(date: chrono::NaiveDate, person: &str, kind: ViolationKind) -> Violation {
    Violation {
        date,
        person: person.to_string(),
        kind,
    }
}
