use anyhow::Result;
use planboard_core::entities::AnalyticContent;
use planboard_core::listing::{group_by_date_topic, search};

use super::Ctx;
use crate::table::render;

/// Print analytics rows grouped per date and topic with summed counters.
pub async fn cmd_analytics(ctx: &Ctx, search_query: Option<String>) -> Result<()> {
    let rows = ctx.resource::<AnalyticContent>().list().await?;
    let rows = search(rows, search_query.as_deref().unwrap_or_default());
    let groups = group_by_date_topic(&rows);

    print!("{}", render(&groups));
    println!("{} group(s) from {} row(s)", groups.len(), rows.len());
    Ok(())
}
