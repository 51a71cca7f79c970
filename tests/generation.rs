#![forbid(unsafe_code)]
use binomes::{
    generate_schedule, Config, GenerateRequest, Pair, Participant, SchedError, Scheduler, Seat,
};
use chrono::{Datelike, NaiveDate, Weekday};

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, day).unwrap()
}

#[test]
fn builtin_season_july_to_october() {
    let config = Config::builtin();
    let schedule = generate_schedule(&config, 7, 10, 2025).unwrap();

    assert_eq!(schedule.len(), 18);
    assert_eq!(
        schedule.get(d(7, 11)),
        Some(&Pair::of("Carlos Correia", "Jose Vendeiro"))
    );
    assert!(schedule.get(d(7, 25)).unwrap().contains("Antonio Ruas"));

    assert_eq!(schedule.get(d(7, 4)), Some(&Pair::of("Carlos Correia", "Jose Cocenas")));
    assert_eq!(schedule.get(d(7, 18)), Some(&Pair::of("Jose Cocenas", "Antonio Ruas")));
    assert_eq!(schedule.get(d(7, 25)), Some(&Pair::of("Antonio Ruas", "Carlos Correia")));
    assert_eq!(schedule.get(d(8, 1)), Some(&Pair::of("Jose Cocenas", "Jose Vendeiro")));
    assert_eq!(schedule.get(d(10, 31)), Some(&Pair::of("Carlos Correia", "Antonio Ruas")));

    for (date, pair) in schedule.iter() {
        if pair.contains("Antonio Vidinha") {
            assert!(date >= d(7, 25), "Antonio Vidinha used on {date}");
        }
    }
    assert!(schedule.unresolved_slots().is_empty());
}

#[test]
fn every_mandatory_date_of_the_season_is_honoured() {
    let config = Config::builtin();
    let schedule = generate_schedule(&config, 7, 10, 2025).unwrap();
    for date in [d(7, 25), d(8, 29), d(9, 19), d(10, 17)] {
        assert!(schedule.get(date).unwrap().contains("Antonio Ruas"), "{date}");
    }
}

#[test]
fn month_ending_before_day_31_is_clamped() {
    let config = Config::builtin();
    let schedule = generate_schedule(&config, 9, 9, 2025).unwrap();
    let dates: Vec<NaiveDate> = schedule.dates().collect();
    assert_eq!(dates, vec![d(9, 5), d(9, 12), d(9, 19), d(9, 26)]);
}

#[test]
fn inverted_or_invalid_months_are_errors() {
    let config = Config::builtin();
    assert!(matches!(
        generate_schedule(&config, 10, 7, 2025),
        Err(SchedError::InvalidRange { .. })
    ));
    assert!(matches!(
        generate_schedule(&config, 0, 7, 2025),
        Err(SchedError::InvalidMonth(0))
    ));
}

#[test]
fn generation_is_deterministic() {
    let config = Config::builtin();
    let scheduler = Scheduler::new(&config);
    let first = scheduler.generate(GenerateRequest::default()).unwrap();
    let second = scheduler.generate(GenerateRequest::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn only_first_mandatory_person_is_honoured() {
    let config = Config::new(vec![
        Participant::new("Ana"),
        Participant::new("Rui"),
        Participant::new("Eva"),
    ])
    .with_mandatory("Eva", vec![d(7, 4)])
    .with_mandatory("Rui", vec![d(7, 4)]);
    let schedule = generate_schedule(&config, 7, 7, 2025).unwrap();
    assert_eq!(schedule.get(d(7, 4)), Some(&Pair::of("Eva", "Ana")));
}

#[test]
fn empty_roster_degrades_to_unresolved_slots() {
    let config = Config::default();
    let schedule = generate_schedule(&config, 7, 7, 2025).unwrap();
    assert_eq!(schedule.len(), 4);
    assert!(schedule.iter().all(|(_, pair)| *pair == Pair::unresolved()));
}

#[test]
fn mandatory_person_alone_gets_a_marker_partner() {
    let config = Config::new(vec![
        Participant::new("Ana"),
        Participant::new("Rui").with_cap(1),
    ])
    .with_mandatory("Ana", vec![d(7, 4), d(7, 11)]);
    let schedule = generate_schedule(&config, 7, 7, 2025).unwrap();
    assert_eq!(schedule.get(d(7, 4)), Some(&Pair::of("Ana", "Rui")));
    assert_eq!(
        schedule.get(d(7, 11)),
        Some(&Pair::new(Seat::filled("Ana"), Seat::Unresolved))
    );
    assert_eq!(schedule.get(d(7, 18)), Some(&Pair::unresolved()));
}

fn stress_config() -> Config {
    Config::new(vec![
        Participant::new("A").with_cap(2),
        Participant::new("B").available_from(d(3, 7)),
        Participant::new("C"),
        Participant::new("D"),
        Participant::new("E").with_cap(1),
        Participant::new("F").available_from(d(9, 1)),
    ])
    .with_fixed_pair(d(2, 14), "C", "D")
    .with_mandatory("C", vec![d(2, 14), d(5, 2), d(5, 9)])
    .with_mandatory("D", vec![d(5, 9), d(11, 14)])
}

#[test]
fn generated_schedules_respect_every_rule() {
    let config = stress_config();
    let scheduler = Scheduler::new(&config);

    for start_month in 1..=12 {
        for end_month in start_month..=12 {
            let request = GenerateRequest {
                year: 2025,
                start_month,
                end_month,
            };
            let schedule = scheduler.generate(request).unwrap();
            let (start, end) = binomes::month_range(2025, start_month, end_month).unwrap();

            for (date, pair) in schedule.iter() {
                assert_eq!(date.weekday(), Weekday::Fri);
                assert!(start <= date && date <= end);
                if let (Some(a), Some(b)) = (pair.first.name(), pair.second.name()) {
                    assert_ne!(a, b, "self pair on {date}");
                }
            }

            assert!(
                scheduler.audit(&schedule).is_empty(),
                "{start_month}..{end_month}: {:?}",
                scheduler.audit(&schedule)
            );

            let counts = schedule.participation_counts();
            assert!(counts.get("A").copied().unwrap_or(0) <= 2);
            assert!(counts.get("E").copied().unwrap_or(0) <= 1);
        }
    }
}

#[test]
fn fixed_pair_and_mandatory_overlap() {
    let config = stress_config();
    let schedule = generate_schedule(&config, 2, 5, 2025).unwrap();
    assert_eq!(schedule.get(d(2, 14)), Some(&Pair::of("C", "D")));
    assert!(schedule.get(d(5, 9)).unwrap().contains("C"));
}
