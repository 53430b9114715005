use anyhow::Result;
use planboard_core::entities::{OnlinePlanner, Podcast, UploadConfirmable, UploadLinkForm};
use planboard_core::types::DbId;

use super::{Ctx, UploadTarget};

pub async fn cmd_confirm_upload(
    ctx: &Ctx,
    target: UploadTarget,
    id: DbId,
    link: String,
) -> Result<()> {
    let form = UploadLinkForm::new(link);
    match target {
        UploadTarget::Podcast => confirm::<Podcast>(ctx, id, &form).await,
        UploadTarget::OnlinePlanner => confirm::<OnlinePlanner>(ctx, id, &form).await,
    }
}

async fn confirm<E: UploadConfirmable>(ctx: &Ctx, id: DbId, form: &UploadLinkForm) -> Result<()> {
    ctx.resource::<E>().confirm_upload(id, form).await?;
    println!("Marked {} {id} as published", E::NAME);
    Ok(())
}
