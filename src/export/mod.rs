//! Rendus d'un planning : texte, CSV, classeur XLSX, JSON et PDF.
//!
//! Tous les rendus parcourent le planning dans l'ordre chronologique et
//! affichent une place non pourvue avec le marqueur `??`.

mod pdf;

pub use pdf::{render_pdf, PdfLayout};

use crate::calendar::format_date;
use crate::model::Schedule;
use crate::scheduler::Violation;
use crate::storage::write_atomic;
use anyhow::Result;
use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use std::path::Path;

/// Titre des rendus document.
pub const REPORT_TITLE: &str = "Duplas por Sexta-feira";

/// Nom de la feuille et en-têtes du classeur.
pub const SHEET_NAME: &str = "Duplas";
pub const SHEET_HEADER: [&str; 3] = ["Data", "Participante 1", "Participante 2"];

/// Une ligne `dd-mm-YYYY: p1 & p2` par créneau.
pub fn render_lines(schedule: &Schedule) -> Vec<String> {
    schedule
        .iter()
        .map(|(date, pair)| format!("{}: {}", format_date(date), pair))
        .collect()
}

/// Historique texte brut, encodé en UTF-8.
pub fn render_text(schedule: &Schedule) -> Vec<u8> {
    let mut out = String::new();
    for line in render_lines(schedule) {
        out.push_str(&line);
        out.push('\n');
    }
    out.into_bytes()
}

/// Tableau CSV: header `date,participant_1,participant_2`
pub fn render_csv(schedule: &Schedule) -> Result<Vec<u8>> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["date", "participant_1", "participant_2"])?;
    for (date, pair) in schedule.iter() {
        let date = format_date(date);
        let first = pair.first.to_string();
        let second = pair.second.to_string();
        w.write_record([date.as_str(), first.as_str(), second.as_str()])?;
    }
    Ok(w.into_inner().map_err(|e| e.into_error())?)
}

/// Classeur XLSX : une feuille `Duplas`, en-tête puis une ligne par créneau.
pub fn render_xlsx(schedule: &Schedule) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, title) in (0u16..).zip(SHEET_HEADER) {
        sheet.write_string(0, col, title)?;
    }
    for (row, (date, pair)) in (1u32..).zip(schedule.iter()) {
        sheet.write_string(row, 0, format_date(date))?;
        sheet.write_string(row, 1, pair.first.to_string())?;
        sheet.write_string(row, 2, pair.second.to_string())?;
    }
    Ok(workbook.save_to_buffer()?)
}

/// Rapport de vérification CSV: header `date,person,kind`
pub fn render_report(unresolved: &[NaiveDate], violations: &[Violation]) -> Result<Vec<u8>> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["date", "person", "kind"])?;
    for date in unresolved {
        w.write_record([date.to_string().as_str(), "", "unresolved"])?;
    }
    for v in violations {
        w.write_record([v.date.to_string().as_str(), v.person.as_str(), v.kind.as_str()])?;
    }
    Ok(w.into_inner().map_err(|e| e.into_error())?)
}

#[derive(Debug, Serialize)]
struct JsonSlot<'a> {
    date: NaiveDate,
    first: Option<&'a str>,
    second: Option<&'a str>,
}

/// Export JSON (jolie mise en forme) ; une place non pourvue vaut `null`.
pub fn render_json(schedule: &Schedule) -> Result<Vec<u8>> {
    let slots: Vec<JsonSlot<'_>> = schedule
        .iter()
        .map(|(date, pair)| JsonSlot {
            date,
            first: pair.first.name(),
            second: pair.second.name(),
        })
        .collect();
    Ok(serde_json::to_vec_pretty(&slots)?)
}

pub fn export_text<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    write_atomic(path, &render_text(schedule))
}

pub fn export_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    write_atomic(path, &render_csv(schedule)?)
}

pub fn export_xlsx<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    write_atomic(path, &render_xlsx(schedule)?)
}

pub fn export_report<P: AsRef<Path>>(
    path: P,
    unresolved: &[NaiveDate],
    violations: &[Violation],
) -> Result<()> {
    write_atomic(path, &render_report(unresolved, violations)?)
}

pub fn export_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    write_atomic(path, &render_json(schedule)?)
}

pub fn export_pdf<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    write_atomic(path, &render_pdf(schedule, &PdfLayout::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pair, Seat};

    fn sample() -> Schedule {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        let mut schedule = Schedule::new();
        schedule.assign(d(7, 11), Pair::new(Seat::filled("Eva"), Seat::Unresolved));
        schedule.assign(d(7, 4), Pair::of("Ana", "Rui"));
        schedule.assign(d(7, 18), Pair::unresolved());
        schedule
    }

    #[test]
    fn text_lines_are_sorted_and_mark_gaps() {
        let text = String::from_utf8(render_text(&sample())).unwrap();
        insta::assert_snapshot!(text, @r###"
        04-07-2025: Ana & Rui
        11-07-2025: Eva & ??
        18-07-2025: ?? & ??
        "###);
    }

    #[test]
    fn csv_has_header_and_one_row_per_slot() {
        let csv = String::from_utf8(render_csv(&sample()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,participant_1,participant_2");
        assert_eq!(lines[1], "04-07-2025,Ana,Rui");
        assert_eq!(lines[2], "11-07-2025,Eva,??");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn xlsx_is_a_zip_workbook() {
        let book = render_xlsx(&sample()).unwrap();
        assert!(book.starts_with(b"PK\x03\x04"));
        assert!(book
            .windows(b"xl/worksheets/sheet1.xml".len())
            .any(|w| w == b"xl/worksheets/sheet1.xml"));
    }

    #[test]
    fn report_lists_gaps_then_violations() {
        use crate::scheduler::ViolationKind;
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        let violations = vec![Violation {
            date: d(7, 18),
            person: "Ana".into(),
            kind: ViolationKind::CapExceeded,
        }];
        let raw = render_report(&[d(7, 11)], &violations).unwrap();
        let report = String::from_utf8(raw).unwrap();
        assert_eq!(
            report,
            "date,person,kind\n2025-07-11,,unresolved\n2025-07-18,Ana,cap-exceeded\n"
        );
    }

    #[test]
    fn json_uses_null_for_unresolved_seats() {
        let raw = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value[0]["date"], "2025-07-04");
        assert_eq!(value[1]["first"], "Eva");
        assert!(value[1]["second"].is_null());
        assert_eq!(value.as_array().unwrap().len(), 3);
    }
}
