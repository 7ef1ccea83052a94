//! File exports of the calendar: JSON backup, CSV sheet and iCalendar feed.

use icalendar::{Calendar, Component, EventLike};
use serde::Serialize;

use kalender_core::format::short_date;
use kalender_core::{CustomEvent, Holiday, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Ics,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "ics" => Some(ExportFormat::Ics),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Ics => "ics",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Ics => "text/calendar;charset=utf-8",
        }
    }

    pub fn filename(&self, year: i32) -> String {
        format!("norsk-kalender-{}.{}", year, self.extension())
    }
}

#[derive(Serialize)]
struct ExportSettings {
    theme: Theme,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    events: &'a [CustomEvent],
    settings: ExportSettings,
}

/// Pretty-printed `{ events, settings: { theme } }` document.
pub fn to_json(events: &[CustomEvent], theme: Theme) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonExport {
        events,
        settings: ExportSettings { theme },
    })
}

const CSV_HEADER: [&str; 4] = ["Dato", "Tittel", "Beskrivelse", "Type"];
const CUSTOM_EVENT_TYPE: &str = "Egendefinert";

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One row per event with a Norwegian short date.
pub fn to_csv(events: &[CustomEvent]) -> String {
    let mut lines = vec![CSV_HEADER.join(",")];
    for event in events {
        let row = [
            short_date(event.date),
            event.title.clone(),
            event.description.clone().unwrap_or_default(),
            CUSTOM_EVENT_TYPE.to_string(),
        ];
        lines.push(
            row.iter()
                .map(|f| csv_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Holidays and events of a year as all-day VEVENTs.
pub fn to_ics(year: i32, holidays: &[Holiday], events: &[CustomEvent]) -> String {
    let mut cal = Calendar::new();
    cal.name(&format!("Norsk kalender {}", year));

    for holiday in holidays {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("holiday-{}@kalender", holiday.date));
        ics_event.summary(holiday.name);
        ics_event.all_day(holiday.date);
        ics_event.add_property("CATEGORIES", "HOLIDAY");
        ics_event.add_property("TRANSP", "TRANSPARENT");
        cal.push(ics_event.done());
    }

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@kalender", event.id));
        ics_event.summary(&event.title);
        ics_event.all_day(event.date);
        if let Some(ref desc) = event.description {
            ics_event.description(desc);
        }
        if let Some(ref color) = event.color {
            ics_event.add_property("COLOR", color);
        }
        cal.push(ics_event.done());
    }

    cal.done().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kalender_core::holidays_for_year;

    fn event(title: &str, description: Option<&str>) -> CustomEvent {
        CustomEvent {
            id: "e1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            title: title.to_string(),
            description: description.map(str::to_string),
            color: Some("#ff0000".to_string()),
            icon: None,
        }
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::parse("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("png"), None);
        assert_eq!(ExportFormat::Json.filename(2024), "norsk-kalender-2024.json");
    }

    #[test]
    fn test_json_export() {
        let json = to_json(&[event("Tog", None)], Theme::Dark).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["settings"]["theme"], "dark");
        assert_eq!(value["events"][0]["title"], "Tog");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_csv_export() {
        let csv = to_csv(&[event("Tog", Some("Med korps")), event("Kaffe, kake", None)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Dato,Tittel,Beskrivelse,Type");
        assert_eq!(lines[1], "17.5.2024,Tog,Med korps,Egendefinert");
        assert_eq!(lines[2], "17.5.2024,\"Kaffe, kake\",,Egendefinert");
    }

    #[test]
    fn test_csv_quotes() {
        assert_eq!(csv_field("si \"hei\""), "\"si \"\"hei\"\"\"");
        assert_eq!(csv_field("vanlig"), "vanlig");
    }

    #[test]
    fn test_ics_export() {
        let ics = to_ics(2024, &holidays_for_year(2024), &[event("Tog", None)]);
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 14);
        assert!(ics.contains("SUMMARY:Grunnlovsdagen"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20240517") || ics.contains("DTSTART:20240517"));
        assert!(ics.contains("UID:e1@kalender"));
    }
}
