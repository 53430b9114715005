use anyhow::Result;
use planboard_core::entities::Entity;
use planboard_core::types::DbId;

use super::{for_entity, Ctx, EntityArg};

pub async fn cmd_delete(ctx: &Ctx, entity: EntityArg, id: DbId) -> Result<()> {
    for_entity!(entity, E => delete::<E>(ctx, id).await)
}

async fn delete<E: Entity>(ctx: &Ctx, id: DbId) -> Result<()> {
    ctx.resource::<E>().delete(id).await?;
    println!("Deleted {} {id}", E::NAME);
    Ok(())
}
