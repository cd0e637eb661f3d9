use crate::app::Siteboard;
use crate::cli::commands::{TaskAddArgs, TaskEditArgs};
use crate::cli::output::{format_saved, saved_to_json};
use crate::ops::project_detail::ProjectDetail;

use super::print_json;

async fn save_and_report(
    detail: &mut ProjectDetail,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let saved = detail.save().await?;
    if json {
        print_json(&saved_to_json(&saved))
    } else {
        println!("{}", format_saved(&saved));
        Ok(())
    }
}

pub async fn cmd_task_add(
    board: &Siteboard,
    args: TaskAddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut detail = board.project_detail(&args.project).await;
    detail.add();
    detail.set_description(args.description)?;
    detail.set_image(args.image)?;
    save_and_report(&mut detail, json).await
}

pub async fn cmd_task_edit(
    board: &Siteboard,
    args: TaskEditArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut detail = board.project_detail(&args.project).await;
    if !detail.edit(&args.task) {
        return Err(format!(
            "task {} not found in project {}",
            args.task,
            detail.view().project.id
        )
        .into());
    }
    detail.set_description(args.description)?;
    // The draft already carries the task's current image
    if args.clear_image {
        detail.set_image(None)?;
    } else if let Some(image) = args.image {
        detail.set_image(Some(image))?;
    }
    save_and_report(&mut detail, json).await
}
