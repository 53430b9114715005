//! Plain-text table rendering for fetched collections.

use planboard_core::entities::{
    AnalyticContentForm, HostForm, InspiringPersonForm, MonthlyStatsForm, OnlinePlannerForm,
    PhotoIdeaForm, PodcastForm, QuoteForm, Record, SpeakerForm, VideoIdeaForm,
};
use planboard_core::listing::AnalyticGroup;
use planboard_core::types::Date;

/// A value that renders as one table row.
pub trait TableRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

fn date(value: Option<Date>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn opt(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn num<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl<F: TableRow> TableRow for Record<F> {
    fn headers() -> Vec<&'static str> {
        let mut headers = vec!["ID"];
        headers.extend(F::headers());
        headers
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.id.to_string()];
        cells.extend(self.fields.cells());
        cells
    }
}

impl TableRow for PodcastForm {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "Host", "Speaker", "Theme", "Shoot", "Upload", "Status", "Link"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.host.clone(),
            self.speaker.clone(),
            opt(self.theme.as_deref()),
            date(self.shoot_date),
            date(self.upload_date),
            self.status.clone(),
            opt(self.link.as_deref()),
        ]
    }
}

impl TableRow for QuoteForm {
    fn headers() -> Vec<&'static str> {
        vec!["Quote", "Author", "Upload", "Status", "Link"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.quote.clone(),
            self.author.clone(),
            date(self.upload_date),
            self.status.clone(),
            opt(self.link.as_deref()),
        ]
    }
}

impl TableRow for InspiringPersonForm {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Profession", "Upload", "Status", "Profile"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.profession.clone(),
            date(self.upload_date),
            self.status.clone(),
            opt(self.profile_link.as_deref()),
        ]
    }
}

impl TableRow for PhotoIdeaForm {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "PIC", "Shoot", "Upload", "Status", "Reference"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.pic.clone(),
            date(self.shoot_date),
            date(self.upload_date),
            self.status.clone(),
            opt(self.reference_link.as_deref()),
        ]
    }
}

impl TableRow for VideoIdeaForm {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "PIC", "Shoot", "Upload", "Status", "Script"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.pic.clone(),
            date(self.shoot_date),
            date(self.upload_date),
            self.status.clone(),
            opt(self.script_file.as_deref()),
        ]
    }
}

impl TableRow for OnlinePlannerForm {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "Platform", "Type", "Upload", "Status", "Link"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.platform.clone(),
            self.content_type.clone(),
            date(self.upload_date),
            self.status.clone(),
            opt(self.link.as_deref()),
        ]
    }
}

impl TableRow for MonthlyStatsForm {
    fn headers() -> Vec<&'static str> {
        vec![
            "Account",
            "Platform",
            "Period",
            "Followers",
            "Following",
            "Posts",
            "Reach",
            "Impressions",
            "ER %",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.account.clone(),
            self.platform.clone(),
            self.period(),
            num(self.followers),
            num(self.following),
            num(self.posts),
            num(self.reach),
            num(self.impressions),
            self.engagement_rate
                .map_or_else(|| "-".to_string(), |er| format!("{er:.2}")),
        ]
    }
}

impl TableRow for AnalyticContentForm {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Topic", "Platform", "Title", "Views", "Likes", "Comments", "Shares"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            date(self.date),
            self.topic.clone(),
            self.platform.clone(),
            self.title.clone(),
            num(self.views),
            num(self.likes),
            num(self.comments),
            num(self.shares),
        ]
    }
}

impl TableRow for HostForm {
    fn headers() -> Vec<&'static str> {
        vec!["Name"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl TableRow for SpeakerForm {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Expertise"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), opt(self.expertise.as_deref())]
    }
}

impl TableRow for AnalyticGroup {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Topic", "Rows", "Views", "Likes", "Comments", "Shares"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            date(self.date),
            self.topic.clone(),
            self.row_ids.len().to_string(),
            self.views.to_string(),
            self.likes.to_string(),
            self.comments.to_string(),
            self.shares.to_string(),
        ]
    }
}

/// Render rows as left-aligned columns separated by two spaces.
pub fn render<T: TableRow>(rows: &[T]) -> String {
    let headers = T::headers();
    let body: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
