//! Podcast episodes: host, speaker, shoot and upload dates.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{Entity, UploadConfirmable};
use crate::listing::Searchable;
use crate::rules::{known_status, not_blank, optional_http_url};
use crate::schema::{check_create_status, check_schedule, FieldErrors, FormContext, FormSchema};
use crate::status::{serialize_status, ContentStatus};
use crate::types::Date;

pub struct Podcast;

impl Entity for Podcast {
    const NAME: &'static str = "podcast";
    const PATH: &'static str = "/api/podcast";
    type Form = PodcastForm;
}

impl UploadConfirmable for Podcast {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PodcastForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 150, message = "Title must be at most 150 characters")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Host is required"),
        length(max = 150, message = "Host must be at most 150 characters")
    )]
    pub host: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Speaker is required"),
        length(max = 150, message = "Speaker must be at most 150 characters")
    )]
    pub speaker: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 150, message = "Theme must be at most 150 characters"))]
    pub theme: Option<String>,

    #[validate(required(message = "Shoot date is required"))]
    pub shoot_date: Option<Date>,

    #[validate(required(message = "Upload date is required"))]
    pub upload_date: Option<Date>,

    #[serde(default, serialize_with = "serialize_status")]
    #[validate(custom(function = "known_status"))]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "optional_http_url", message = "Link must be a valid URL"))]
    pub link: Option<String>,
}

impl PodcastForm {
    pub fn status(&self) -> Option<ContentStatus> {
        self.status.parse().ok()
    }
}

impl FormSchema for PodcastForm {
    fn cross_field(&self, ctx: &FormContext<'_, Self>, errors: &mut FieldErrors) {
        check_create_status(errors, &self.status, ctx.is_edit());
        check_schedule(
            errors,
            self.shoot_date,
            self.upload_date,
            ctx.previous.and_then(|p| p.shoot_date),
            ctx.today,
        );
    }
}

impl Searchable for PodcastForm {
    fn haystack(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.host.as_str(),
            self.speaker.as_str(),
            self.status.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MSG_SHOOT_DATE_PAST, MSG_UPLOAD_BEFORE_SHOOT};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> Date {
        date(2026, 6, 1)
    }

    fn valid() -> PodcastForm {
        PodcastForm {
            title: "Ngobrol Santai Eps. 12".into(),
            host: "Rina".into(),
            speaker: "Dimas".into(),
            theme: Some("Career switch".into()),
            shoot_date: Some(date(2026, 6, 3)),
            upload_date: Some(date(2026, 6, 10)),
            status: "scheduled".into(),
            link: None,
        }
    }

    fn create(form: &PodcastForm) -> Result<(), FieldErrors> {
        form.check(&FormContext::create(today()))
    }

    #[test]
    fn valid_form_accepted() {
        assert!(create(&valid()).is_ok());
    }

    #[test]
    fn empty_required_fields_report_their_own_message() {
        let form = PodcastForm {
            title: "  ".into(),
            host: String::new(),
            speaker: String::new(),
            shoot_date: None,
            upload_date: None,
            status: String::new(),
            ..valid()
        };
        let errors = create(&form).unwrap_err();
        assert_eq!(errors.messages("title"), ["Title is required"]);
        assert_eq!(errors.messages("host"), ["Host is required"]);
        assert_eq!(errors.messages("speaker"), ["Speaker is required"]);
        assert_eq!(errors.messages("shoot_date"), ["Shoot date is required"]);
        assert_eq!(errors.messages("upload_date"), ["Upload date is required"]);
        assert_eq!(errors.messages("status"), ["Status is required"]);
    }

    #[test]
    fn title_length_boundary() {
        let at_max = PodcastForm {
            title: "a".repeat(150),
            ..valid()
        };
        assert!(create(&at_max).is_ok());

        let over = PodcastForm {
            title: "a".repeat(151),
            ..valid()
        };
        let errors = create(&over).unwrap_err();
        assert_eq!(errors.messages("title"), ["Title must be at most 150 characters"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let form = PodcastForm {
            host: "é".repeat(150),
            ..valid()
        };
        assert!(create(&form).is_ok());
    }

    #[test]
    fn link_must_be_url_when_present() {
        let bad = PodcastForm {
            link: Some("not-a-url".into()),
            ..valid()
        };
        assert_eq!(
            create(&bad).unwrap_err().messages("link"),
            ["Link must be a valid URL"]
        );

        let good = PodcastForm {
            link: Some("https://example.com".into()),
            ..valid()
        };
        assert!(create(&good).is_ok());

        let empty = PodcastForm {
            link: Some(String::new()),
            ..valid()
        };
        assert!(create(&empty).is_ok());
    }

    #[test]
    fn upload_before_shoot_rejected() {
        let form = PodcastForm {
            shoot_date: Some(date(2026, 6, 5)),
            upload_date: Some(date(2026, 6, 4)),
            ..valid()
        };
        let errors = create(&form).unwrap_err();
        assert_eq!(errors.messages("upload_date"), [MSG_UPLOAD_BEFORE_SHOOT]);
    }

    #[test]
    fn upload_on_shoot_day_accepted() {
        let form = PodcastForm {
            shoot_date: Some(date(2026, 6, 5)),
            upload_date: Some(date(2026, 6, 5)),
            ..valid()
        };
        assert!(create(&form).is_ok());
    }

    #[test]
    fn past_shoot_date_rejected_on_create() {
        let form = PodcastForm {
            shoot_date: Some(date(2026, 5, 1)),
            ..valid()
        };
        assert_eq!(
            create(&form).unwrap_err().messages("shoot_date"),
            [MSG_SHOOT_DATE_PAST]
        );
    }

    #[test]
    fn unedited_past_shoot_date_passes_on_edit() {
        let stored = PodcastForm {
            shoot_date: Some(date(2026, 5, 1)),
            upload_date: Some(date(2026, 5, 8)),
            ..valid()
        };
        let edited = PodcastForm {
            title: "Renamed episode".into(),
            status: "done".into(),
            ..stored.clone()
        };
        assert!(edited.check(&FormContext::edit(today(), &stored)).is_ok());
    }

    #[test]
    fn status_outside_enum_rejected() {
        let form = PodcastForm {
            status: "published".into(),
            ..valid()
        };
        let errors = create(&form).unwrap_err();
        assert_eq!(
            errors.messages("status"),
            ["Status must be one of: scheduled, on hold, done"]
        );
    }

    #[test]
    fn done_rejected_on_create() {
        let form = PodcastForm {
            status: "done".into(),
            ..valid()
        };
        assert!(create(&form).unwrap_err().has("status"));
    }

    #[test]
    fn on_hold_accepted_on_create() {
        let form = PodcastForm {
            status: "on hold".into(),
            ..valid()
        };
        assert!(create(&form).is_ok());
        assert_eq!(form.status(), Some(ContentStatus::OnHold));
    }

    #[test]
    fn deserializes_missing_fields_as_empty() {
        let form: PodcastForm = serde_json::from_str(r#"{"title":"Eps 1"}"#).unwrap();
        assert_eq!(form.title, "Eps 1");
        assert!(form.host.is_empty());
        assert!(form.shoot_date.is_none());
    }

    #[test]
    fn hyphenated_status_sent_in_canonical_form() {
        let form = PodcastForm {
            status: "on-hold".into(),
            ..valid()
        };
        assert!(create(&form).is_ok());
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["status"], "on hold");
    }

    #[test]
    fn unknown_status_serialized_unchanged() {
        let form = PodcastForm {
            status: "published".into(),
            ..valid()
        };
        assert_eq!(serde_json::to_value(&form).unwrap()["status"], "published");
    }
}
