use std::path::Path;

use anyhow::{bail, Result};
use planboard_core::attachment::Attachment;
use planboard_core::entities::{Entity, VideoIdea};
use planboard_core::schema::{FormContext, FormSchema};

use super::{for_entity, format_field_errors, read_form, Ctx, EntityArg};

/// Check a form file without contacting the backend.
///
/// `previous` is the stored version for edit checks; `edit` without it
/// validates as an edit of an unknown stored item.
pub fn cmd_validate(
    ctx: &Ctx,
    entity: EntityArg,
    data: &Path,
    previous: Option<&Path>,
    edit: bool,
    attach: Option<&Path>,
) -> Result<()> {
    if attach.is_some() && entity != EntityArg::VideoIdea {
        bail!("--attach is only accepted for video-idea");
    }
    let attachment = attach.map(Attachment::from_path).transpose()?;

    let outcome = match entity {
        EntityArg::VideoIdea => {
            check::<VideoIdea>(ctx, data, previous, edit, attachment.as_ref())?
        }
        other => for_entity!(other, E => check::<E>(ctx, data, previous, edit, None)?),
    };

    match outcome {
        None => {
            println!("Form is valid");
            Ok(())
        }
        Some(report) => {
            print!("{report}");
            bail!("Form has validation errors")
        }
    }
}

/// `Some(report)` listing every failure, `None` when the form passes.
fn check<E: Entity>(
    ctx: &Ctx,
    data: &Path,
    previous: Option<&Path>,
    edit: bool,
    attachment: Option<&Attachment>,
) -> Result<Option<String>> {
    let form: E::Form = read_form(data)?;
    let previous: Option<E::Form> = previous.map(read_form).transpose()?;
    let resource = ctx.resource::<E>();

    let mut form_ctx = match (&previous, edit) {
        (Some(previous), _) => FormContext::edit(resource.today(), previous),
        (None, true) => FormContext::edit_without_previous(resource.today()),
        (None, false) => FormContext::create(resource.today()),
    };
    form_ctx.attachment = attachment;

    Ok(form.check(&form_ctx).err().map(|errors| format_field_errors(&errors)))
}
