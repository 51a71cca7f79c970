mod assignment;
mod audit;
mod tracker;
mod types;

pub use types::{GenerateRequest, SchedError, Violation, ViolationKind};

use crate::calendar;
use crate::config::Config;
use crate::model::Schedule;
use chrono::NaiveDate;

/// Scheduler : applique les règles d'une configuration, sans état entre deux appels.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler<'a> {
    config: &'a Config,
}

impl<'a> Scheduler<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Génère les binômes pour tous les vendredis des mois demandés.
    pub fn generate(&self, request: GenerateRequest) -> Result<Schedule, SchedError> {
        let (start, end) =
            calendar::month_range(request.year, request.start_month, request.end_month)?;
        Ok(self.generate_between(start, end))
    }

    /// Même algorithme sur un intervalle de dates inclus quelconque.
    pub fn generate_between(&self, start: NaiveDate, end: NaiveDate) -> Schedule {
        assignment::generate_between(self, start, end)
    }

    /// Vérifie un planning contre les règles de la configuration.
    pub fn audit(&self, schedule: &Schedule) -> Vec<Violation> {
        audit::audit(self, schedule)
    }
}

/// Point d'entrée direct : `start_month`..=`end_month` de `year`.
pub fn generate_schedule(
    config: &Config,
    start_month: u32,
    end_month: u32,
    year: i32,
) -> Result<Schedule, SchedError> {
    Scheduler::new(config).generate(GenerateRequest {
        year,
        start_month,
        end_month,
    })
}
