use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use chrono::{Datelike, NaiveDate};

use kalender_core::format::{day_month, full_date, long_date, WEEKDAY_SHORT};
use kalender_core::season::seasonal_events;
use kalender_core::storage::{keys, load};
use kalender_core::{
    year_grid, DayCell, EventBook, Holiday, HolidayCalendar, MonthGrid, SeasonDate, SeasonIcon,
    SeasonalEvent, Validator,
};

use crate::models::{ApiError, IndexQuery};
use crate::routes::calendar::{event_colors, year_range};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, ApiError> {
    let today = state.clock.today();
    let year = query.year.unwrap_or(today.year());
    Validator::validate_year(year)?;

    let book: EventBook = load(state.store.as_ref(), keys::CUSTOM_EVENTS).await?;
    let page = YearPage {
        year,
        today,
        months: year_grid(year),
        holidays: HolidayCalendar::for_year(year).holidays().to_vec(),
        seasons: seasonal_events(year),
        event_colors: event_colors(&book, year),
    };

    Ok(Html(page.render()))
}

/// Everything shown on the year view.
struct YearPage {
    year: i32,
    today: NaiveDate,
    months: Vec<MonthGrid>,
    holidays: Vec<Holiday>,
    seasons: Vec<SeasonalEvent>,
    event_colors: BTreeMap<NaiveDate, Vec<String>>,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl YearPage {
    fn render(&self) -> String {
        let year = self.year;
        let today = full_date(self.today);
        let year_options = self.render_year_options();
        let seasons = self.render_seasons();
        let months: String = self.months.iter().map(|m| self.render_month(m)).collect();
        let holidays = self.render_holidays();

        format!(
            r##"<!DOCTYPE html>
<html lang="nb">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Norsk kalender {year}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="top">
        <h1>Norsk kalender</h1>
        <p class="today">{today}</p>
        <form method="get" action="/">
            <select name="year" onchange="this.form.submit()">
                {year_options}
            </select>
        </form>
    </header>

    <section id="seasons">
        {seasons}
    </section>

    <main id="year">
        {months}
    </main>

    <section id="holidays">
        <h2>Norske helligdager {year}</h2>
        {holidays}
    </section>
</body>
</html>"##
        )
    }

    fn render_year_options(&self) -> String {
        year_range(self.today.year())
            .into_iter()
            .chain((!year_range(self.today.year()).contains(&self.year)).then_some(self.year))
            .map(|y| {
                let selected = if y == self.year { " selected" } else { "" };
                format!(r#"<option value="{y}"{selected}>{y}</option>"#)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_seasons(&self) -> String {
        self.seasons
            .iter()
            .map(|s| {
                let when = match s.when {
                    SeasonDate::Date(date) => day_month(date),
                    SeasonDate::Week(week) => format!("Uke {}", week),
                };
                let icon = match s.icon {
                    SeasonIcon::Sun => "sun",
                    SeasonIcon::Snowflake => "snowflake",
                    SeasonIcon::Leaf => "leaf",
                };
                format!(
                    r#"<div class="season {icon}"><span class="name">{}</span> <span class="when">{when}</span></div>"#,
                    s.name
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_month(&self, month: &MonthGrid) -> String {
        let head: String = WEEKDAY_SHORT
            .iter()
            .map(|d| format!("<th>{}</th>", d))
            .collect();

        let rows: String = month
            .weeks
            .iter()
            .map(|week| {
                let cells: String = week
                    .days
                    .iter()
                    .map(|cell| match cell {
                        Some(cell) => self.render_day(cell),
                        None => "<td></td>".to_string(),
                    })
                    .collect();
                format!(
                    r#"<tr><td class="week">{}</td>{}</tr>"#,
                    week.week_number, cells
                )
            })
            .collect();

        format!(
            r#"<table class="month">
    <caption>{}</caption>
    <thead><tr><th class="week">Uke</th>{}</tr></thead>
    <tbody>{}</tbody>
</table>
"#,
            month.name, head, rows
        )
    }

    fn render_day(&self, cell: &DayCell) -> String {
        let mut classes = Vec::new();
        if cell.is_red_day() {
            classes.push("red");
        }
        if cell.date == self.today {
            classes.push("today");
        }

        let title = cell
            .holidays
            .iter()
            .map(|h| h.name)
            .collect::<Vec<_>>()
            .join(" / ");
        let dots: String = self
            .event_colors
            .get(&cell.date)
            .map(|colors| {
                colors
                    .iter()
                    .map(|c| format!(r#"<span class="dot" style="background:{}"></span>"#, escape(c)))
                    .collect()
            })
            .unwrap_or_default();

        format!(
            r#"<td class="{}" title="{}">{}{}</td>"#,
            classes.join(" "),
            escape(&title),
            cell.day,
            dots
        )
    }

    fn render_holidays(&self) -> String {
        self.holidays
            .iter()
            .map(|h| {
                format!(
                    r#"<div class="holiday"><span class="name">{}</span><span class="date">{}</span></div>"#,
                    h.name,
                    long_date(h.date)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(year: i32, today: NaiveDate) -> YearPage {
        YearPage {
            year,
            today,
            months: year_grid(year),
            holidays: HolidayCalendar::for_year(year).holidays().to_vec(),
            seasons: seasonal_events(year),
            event_colors: BTreeMap::new(),
        }
    }

    #[test]
    fn test_render_year_page() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let html = page(2024, today).render();

        assert!(html.contains("Norske helligdager 2024"));
        assert_eq!(html.matches(r#"<table class="month">"#).count(), 12);
        assert!(html.contains(r#"<td class="red today" title="Grunnlovsdagen">17</td>"#));
        assert!(html.contains(r#"<option value="2024" selected>"#));
        assert!(html.contains("Uke 40"));
    }

    #[test]
    fn test_year_outside_selector_is_offered() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let html = page(2040, today).render();
        assert!(html.contains(r#"<option value="2040" selected>"#));
        assert!(html.contains(r#"<option value="2019">"#));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
    }
}
