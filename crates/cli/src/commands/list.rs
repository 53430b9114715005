use anyhow::Result;
use planboard_client::Collection;
use planboard_core::entities::{Entity, Record};

use super::{for_entity, Ctx, EntityArg};
use crate::table::{render, TableRow};

pub async fn cmd_list(
    ctx: &Ctx,
    entity: EntityArg,
    search: Option<String>,
    page: usize,
    per_page: Option<usize>,
) -> Result<()> {
    let query = search.unwrap_or_default();
    let per_page = per_page.unwrap_or(ctx.page_size);
    for_entity!(entity, E => list::<E>(ctx, &query, page, per_page).await)
}

async fn list<E>(ctx: &Ctx, query: &str, page: usize, per_page: usize) -> Result<()>
where
    E: Entity,
    E::Form: TableRow,
{
    let collection = Collection::load(ctx.resource::<E>()).await?;
    let page = collection.page(query, page, per_page).await;

    print!("{}", render::<Record<E::Form>>(&page.items));
    println!(
        "Page {}/{} ({} {} item(s))",
        page.page, page.total_pages, page.total_items, E::NAME
    );
    Ok(())
}
