use std::path::Path;

use anyhow::{bail, Result};
use planboard_core::attachment::Attachment;
use planboard_core::entities::{Entity, HasAttachment, Record, VideoIdea};

use super::{for_entity, read_form, Ctx, EntityArg};

pub async fn cmd_create(
    ctx: &Ctx,
    entity: EntityArg,
    data: &Path,
    attach: Option<&Path>,
) -> Result<()> {
    if entity == EntityArg::VideoIdea {
        return create_with_file::<VideoIdea>(ctx, data, attach).await;
    }
    if attach.is_some() {
        bail!("--attach is only accepted for video-idea");
    }
    for_entity!(entity, E => create::<E>(ctx, data).await)
}

async fn create<E: Entity>(ctx: &Ctx, data: &Path) -> Result<()> {
    let form: E::Form = read_form(data)?;
    let created = ctx.resource::<E>().create(&form).await?;
    report_created::<E>(created.as_ref());
    Ok(())
}

async fn create_with_file<E: HasAttachment>(
    ctx: &Ctx,
    data: &Path,
    attach: Option<&Path>,
) -> Result<()> {
    let form: E::Form = read_form(data)?;
    let attachment = attach.map(Attachment::from_path).transpose()?;
    let created = ctx
        .resource::<E>()
        .create_with_attachment(&form, attachment.as_ref())
        .await?;
    report_created::<E>(created.as_ref());
    Ok(())
}

fn report_created<E: Entity>(created: Option<&Record<E::Form>>) {
    match created {
        Some(record) => println!("Created {} {}", E::NAME, record.id),
        None => println!("Created {}", E::NAME),
    }
}
