use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Metadata written to the PDF document info dictionary
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    pub subject: Option<String>,
    /// Joined with `", "` into the `Keywords` entry
    pub keywords: Vec<String>,
    /// When the document was created. Defaults to the time it is written.
    pub created: Option<DateTime<FixedOffset>>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Add a keyword, ignoring blanks and repeats
    pub fn keyword<S: AsRef<str>>(&mut self, keyword: S) -> &mut Self {
        let keyword = keyword.as_ref().trim();
        if !keyword.is_empty() && !self.keywords.iter().any(|k| k == keyword) {
            self.keywords.push(keyword.to_string());
        }
        self
    }

    /// Pin the creation date instead of using the current time
    pub fn created(&mut self, created: DateTime<FixedOffset>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if !self.keywords.is_empty() {
            info.keywords(TextStr(&self.keywords.join(", ")));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        let created = self
            .created
            .unwrap_or_else(|| Local::now().fixed_offset());
        info.creation_date(pdf_date(&created));
    }
}

fn pdf_date(at: &DateTime<FixedOffset>) -> PDate {
    let offset_minutes = at.offset().local_minus_utc() / 60;
    let hours = offset_minutes / 60;
    let minutes = (offset_minutes % 60).unsigned_abs();

    PDate::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(hours as i8)
        .utc_offset_minute(minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_skip_blanks_and_repeats() {
        let mut info = Info::new();
        info.keyword("pantry.tsv").keyword("  ").keyword("pantry.tsv").keyword("labels");
        assert_eq!(info.keywords, vec!["pantry.tsv", "labels"]);
    }

    #[test]
    fn pinned_dates_are_written() {
        let created = DateTime::parse_from_rfc3339("2024-03-09T14:05:00+05:30").unwrap();
        let mut info = Info::new();
        info.title("Pantry").keyword("labels").created(created);

        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        info.write(&mut refs, &mut pdf);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("(Pantry)"));
        assert!(text.contains("(labels)"));
        assert!(text.contains("D:20240309140500"));
    }
}
