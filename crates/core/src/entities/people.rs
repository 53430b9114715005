//! Podcast hosts and speakers (pembicara) lookup lists.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::Entity;
use crate::listing::Searchable;
use crate::rules::not_blank;
use crate::schema::FormSchema;

pub struct Host;

impl Entity for Host {
    const NAME: &'static str = "host";
    const PATH: &'static str = "/api/host";
    type Form = HostForm;
}

pub struct Speaker;

impl Entity for Speaker {
    const NAME: &'static str = "speaker";
    const PATH: &'static str = "/api/pembicara";
    type Form = SpeakerForm;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HostForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Host name is required"),
        length(max = 150, message = "Host name must be at most 150 characters")
    )]
    pub name: String,
}

impl FormSchema for HostForm {}

impl Searchable for HostForm {
    fn haystack(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SpeakerForm {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Speaker name is required"),
        length(max = 150, message = "Speaker name must be at most 150 characters")
    )]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 150, message = "Expertise must be at most 150 characters"))]
    pub expertise: Option<String>,
}

impl FormSchema for SpeakerForm {}

impl Searchable for SpeakerForm {
    fn haystack(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(expertise) = &self.expertise {
            fields.push(expertise);
        }
        fields
    }
}
