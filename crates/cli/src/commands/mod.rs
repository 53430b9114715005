use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use planboard_client::{ApiClient, Resource};
use planboard_core::entities::Entity;
use planboard_core::schema::FieldErrors;
use planboard_core::types::Date;
use serde::de::DeserializeOwned;

pub mod analytics;
pub mod confirm_upload;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod validate;

pub use analytics::cmd_analytics;
pub use confirm_upload::cmd_confirm_upload;
pub use create::cmd_create;
pub use delete::cmd_delete;
pub use list::cmd_list;
pub use update::cmd_update;
pub use validate::cmd_validate;

/// Content types reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    Podcast,
    Quote,
    InspiringPeople,
    PhotoIdea,
    VideoIdea,
    OnlinePlanner,
    MonthlyStats,
    Analytics,
    Host,
    Speaker,
}

/// Content types whose items can be marked published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UploadTarget {
    Podcast,
    OnlinePlanner,
}

/// Run `$body` with `$e` bound to the entity type selected by `$arg`.
macro_rules! for_entity {
    ($arg:expr, $e:ident => $body:expr) => {{
        use planboard_core::entities as ent;
        match $arg {
            $crate::commands::EntityArg::Podcast => {
                type $e = ent::Podcast;
                $body
            }
            $crate::commands::EntityArg::Quote => {
                type $e = ent::Quote;
                $body
            }
            $crate::commands::EntityArg::InspiringPeople => {
                type $e = ent::InspiringPeople;
                $body
            }
            $crate::commands::EntityArg::PhotoIdea => {
                type $e = ent::PhotoIdea;
                $body
            }
            $crate::commands::EntityArg::VideoIdea => {
                type $e = ent::VideoIdea;
                $body
            }
            $crate::commands::EntityArg::OnlinePlanner => {
                type $e = ent::OnlinePlanner;
                $body
            }
            $crate::commands::EntityArg::MonthlyStats => {
                type $e = ent::MonthlyPlatformStats;
                $body
            }
            $crate::commands::EntityArg::Analytics => {
                type $e = ent::AnalyticContent;
                $body
            }
            $crate::commands::EntityArg::Host => {
                type $e = ent::Host;
                $body
            }
            $crate::commands::EntityArg::Speaker => {
                type $e = ent::Speaker;
                $body
            }
        }
    }};
}
pub(crate) use for_entity;

/// Shared state for one command invocation.
pub struct Ctx {
    pub api: ApiClient,
    /// Date used by date rules; the local date when unset.
    pub today: Option<Date>,
    pub page_size: usize,
}

impl Ctx {
    pub fn resource<E: Entity>(&self) -> Resource<E> {
        let resource = Resource::new(self.api.clone());
        match self.today {
            Some(today) => resource.with_today(today),
            None => resource,
        }
    }
}

/// Read a form from a JSON file.
pub fn read_form<F: DeserializeOwned>(path: &Path) -> Result<F> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid form", path.display()))
}

/// One `field: message` line per validation failure.
pub fn format_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, messages) in errors.iter() {
        for message in messages {
            out.push_str(&format!("  {field}: {message}\n"));
        }
    }
    out
}
