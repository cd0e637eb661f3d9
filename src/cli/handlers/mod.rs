mod task;

use serde::Serialize;

use crate::app::Siteboard;
use crate::cli::commands::*;
use crate::cli::output::*;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch(cli: Cli, board: &Siteboard) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    match cli.command {
        // Login surface
        Commands::Login(args) => cmd_login(board, args, json).await,
        Commands::Whoami => cmd_whoami(board, json).await,

        // Project list surface
        Commands::Projects => cmd_projects(board, json).await,
        Commands::Create(args) => cmd_create(board, args, json).await,
        Commands::Clear => cmd_clear(board, json).await,

        // Project detail surface
        Commands::Show(args) => cmd_show(board, args, json).await,
        Commands::Task(cmd) => match cmd.action {
            TaskAction::Add(args) => task::cmd_task_add(board, args, json).await,
            TaskAction::Edit(args) => task::cmd_task_edit(board, args, json).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

async fn cmd_login(
    board: &Siteboard,
    args: LoginArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    board.session().login(&args.nickname).await?;
    if json {
        print_json(&serde_json::json!({ "nickname": args.nickname }))
    } else {
        println!("Welcome, {}", args.nickname.trim());
        Ok(())
    }
}

async fn cmd_whoami(board: &Siteboard, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let nickname = board.session().nickname().await;
    if json {
        return print_json(&serde_json::json!({ "nickname": nickname }));
    }
    match nickname {
        Some(name) => println!("{}", name),
        None => println!("Not logged in."),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Project list
// ---------------------------------------------------------------------------

async fn cmd_projects(board: &Siteboard, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let nickname = board.session().nickname().await;
    let list = board.project_list().await;
    if json {
        print_json(&ProjectListJson {
            nickname,
            projects: list.projects(),
        })
    } else {
        print!("{}", format_project_list(nickname.as_deref(), list.projects()));
        Ok(())
    }
}

async fn cmd_create(
    board: &Siteboard,
    args: CreateArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut list = board.project_list().await;
    let project = list.create(&args.name).await?;
    if json {
        print_json(&project)
    } else {
        println!("Created {}", format_project_line(&project));
        Ok(())
    }
}

async fn cmd_clear(board: &Siteboard, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut list = board.project_list().await;
    let removed = list.projects().len();
    list.clear().await?;
    if json {
        print_json(&serde_json::json!({ "cleared": removed }))
    } else {
        println!("Cleared {} project(s).", removed);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Project detail
// ---------------------------------------------------------------------------

async fn cmd_show(
    board: &Siteboard,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let detail = board.project_detail(&args.id).await;
    if json {
        print_json(&detail_to_json(detail.view()))
    } else {
        print!("{}", format_detail(detail.view()));
        Ok(())
    }
}
