use std::path::Path;

use anyhow::{bail, Result};
use planboard_client::Collection;
use planboard_core::attachment::Attachment;
use planboard_core::entities::{Entity, HasAttachment, VideoIdea};
use planboard_core::error::CoreError;
use planboard_core::types::DbId;

use super::{for_entity, read_form, Ctx, EntityArg};

/// Edit an item. The collection is loaded first so rules comparing against
/// the stored version see it.
pub async fn cmd_update(
    ctx: &Ctx,
    entity: EntityArg,
    id: DbId,
    data: &Path,
    attach: Option<&Path>,
) -> Result<()> {
    if entity == EntityArg::VideoIdea {
        return update_with_file::<VideoIdea>(ctx, id, data, attach).await;
    }
    if attach.is_some() {
        bail!("--attach is only accepted for video-idea");
    }
    for_entity!(entity, E => update::<E>(ctx, id, data).await)
}

async fn load<E: Entity>(ctx: &Ctx, id: DbId) -> Result<Collection<E>> {
    let collection = Collection::load(ctx.resource::<E>()).await?;
    if collection.get(id).await.is_none() {
        return Err(CoreError::NotFound {
            entity: E::NAME,
            id,
        }
        .into());
    }
    Ok(collection)
}

async fn update<E: Entity>(ctx: &Ctx, id: DbId, data: &Path) -> Result<()> {
    let form: E::Form = read_form(data)?;
    load::<E>(ctx, id).await?.update(id, &form).await?;
    println!("Updated {} {id}", E::NAME);
    Ok(())
}

async fn update_with_file<E: HasAttachment>(
    ctx: &Ctx,
    id: DbId,
    data: &Path,
    attach: Option<&Path>,
) -> Result<()> {
    let form: E::Form = read_form(data)?;
    let attachment = attach.map(Attachment::from_path).transpose()?;
    load::<E>(ctx, id)
        .await?
        .update_with_attachment(id, &form, attachment.as_ref())
        .await?;
    println!("Updated {} {id}", E::NAME);
    Ok(())
}
