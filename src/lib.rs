#![forbid(unsafe_code)]
//! Binômes — génération de binômes hebdomadaires (vendredis), sans base de données.
//!
//! - Configuration JSON (roster, disponibilités, plafonds, binômes imposés, dates obligatoires).
//! - Passe gloutonne unique, ordre du roster, sans retour arrière.
//! - Créneau impossible = place non pourvue (`??`), jamais une erreur.
//! - Exports texte, CSV, JSON et PDF.

pub mod calendar;
pub mod config;
pub mod export;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use calendar::{format_date, month_range, slot_dates, SLOT_WEEKDAY};
pub use config::Config;
pub use model::{FixedPair, MandatoryDates, Pair, Participant, Schedule, Seat, UNRESOLVED_MARKER};
pub use scheduler::{
    generate_schedule, GenerateRequest, SchedError, Scheduler, Violation, ViolationKind,
};
pub use storage::{write_atomic, JsonStorage, Storage};
