use super::print::{eprint_messages, print_config, print_listings, print_messages, terminal_width};
use super::prompt::drive;
use super::setup::{init_logging, Cli, Commands};
use clap::Parser;
use colored::Colorize;
use pbj::api::{CmdResult, ConfigAction, PbjApi, SaveMode};
use pbj::dialogue::{CategoryChooser, RenameDialogue, RenameTarget};
use pbj::error::Result;
use pbj::handoff::Handoff;
use pbj::init::{current_category_from_env, initialize};
use pbj::paths::PbjPaths;
use pbj::store::fs_backend::FsBackend;
use std::io::IsTerminal;
use tracing::debug;

struct AppContext {
    api: PbjApi<FsBackend>,
    width: usize,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    // `default` and `config` are how a broken default category gets fixed.
    let needs_consistency = !matches!(
        cli.command,
        Some(Commands::Default { .. }) | Some(Commands::Config { .. })
    );
    if needs_consistency {
        ensure_consistent(&mut ctx)?;
    }

    match cli.command {
        Some(Commands::Save {
            key,
            path,
            category,
        }) => handle_save(&mut ctx, category, key, path, SaveMode::Safe),
        Some(Commands::Replace {
            key,
            path,
            category,
        }) => handle_save(&mut ctx, category, key, path, SaveMode::Replace),
        Some(Commands::Rm { key, category }) => {
            let result = ctx.api.delete_key(category.as_deref(), &key)?;
            finish(&ctx, result)
        }
        Some(Commands::Rmcat { category }) => {
            let result = ctx.api.delete_category(&category)?;
            finish(&ctx, result)
        }
        Some(Commands::Use { category, selector }) => handle_use(&mut ctx, category, selector),
        Some(Commands::Default { category }) => handle_default(&mut ctx, category),
        Some(Commands::List { category }) => {
            let result = ctx.api.list(category.as_deref())?;
            finish(&ctx, result)
        }
        Some(Commands::All) => {
            let result = ctx.api.list_all()?;
            finish(&ctx, result)
        }
        Some(Commands::Rename) => handle_rename(&mut ctx),
        Some(Commands::Import { file, category }) => {
            let result = ctx.api.import(category.as_deref(), &file)?;
            finish(&ctx, result)
        }
        Some(Commands::Config { key }) => handle_config(&ctx, key),
        None => {
            let result = match cli.target {
                Some(target) => ctx.api.open(&target, cli.selector.as_deref())?,
                None => ctx.api.list(None)?,
            };
            finish(&ctx, result)
        }
    }
}

fn init_context() -> Result<AppContext> {
    let paths = PbjPaths::from_env()?;
    let ctx = initialize(paths, current_category_from_env())?;
    eprint_messages(&ctx.startup.messages);

    Ok(AppContext {
        api: ctx.api,
        width: terminal_width(),
    })
}

/// Fails when the default category is missing, after offering to pick a new
/// one if there is a terminal to ask on.
fn ensure_consistent(ctx: &mut AppContext) -> Result<()> {
    let Err(err) = ctx.api.verify() else {
        return Ok(());
    };
    if !std::io::stdin().is_terminal() {
        return Err(err);
    }

    eprintln!("{}", err.to_string().yellow());
    eprintln!("Pick a new default category:");
    let mut chooser = CategoryChooser::new();
    if drive(&mut chooser, ctx.api.bookmarks())? {
        if let Some(name) = chooser.chosen() {
            let result = ctx.api.set_default(name)?;
            print_messages(&result.messages);
            return Ok(());
        }
    }
    Err(err)
}

/// Prints a command's output and hands any directory or category change over
/// to the shell.
fn finish(ctx: &AppContext, result: CmdResult) -> Result<()> {
    if !result.listed.is_empty() {
        print_listings(&result.listed, ctx.width);
    }
    print_messages(&result.messages);

    if let Some(handoff) = &result.handoff {
        write_handoff(ctx, handoff)?;
    }
    if let Some(dir) = &result.resolved_dir {
        println!("{}", dir.display());
    }
    Ok(())
}

fn write_handoff(ctx: &AppContext, handoff: &Handoff) -> Result<()> {
    let path = ctx
        .api
        .paths()
        .handoff_file(std::os::unix::process::parent_id());
    handoff.write_to(&path)?;
    debug!(path = %path.display(), "wrote hand-off file");
    Ok(())
}

fn aborted() -> Result<()> {
    eprintln!("{}", "Aborted.".dimmed());
    Ok(())
}

fn handle_save(
    ctx: &mut AppContext,
    category: Option<String>,
    key: String,
    path: Option<String>,
    mode: SaveMode,
) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir()?.to_string_lossy().into_owned(),
    };
    let result = ctx.api.save(category.as_deref(), &key, &path, mode)?;
    finish(ctx, result)
}

fn choose_category(ctx: &AppContext) -> Result<Option<String>> {
    let mut chooser = CategoryChooser::new();
    if drive(&mut chooser, ctx.api.bookmarks())? {
        return Ok(chooser.chosen().map(str::to_string));
    }
    Ok(None)
}

fn handle_use(
    ctx: &mut AppContext,
    category: Option<String>,
    selector: Option<String>,
) -> Result<()> {
    let category = match category {
        Some(category) => category,
        None => match choose_category(ctx)? {
            Some(category) => category,
            None => return aborted(),
        },
    };
    let result = ctx.api.set_current(&category, selector.as_deref())?;
    finish(ctx, result)
}

fn handle_default(ctx: &mut AppContext, category: Option<String>) -> Result<()> {
    let category = match category {
        Some(category) => category,
        None => match choose_category(ctx)? {
            Some(category) => category,
            None => return aborted(),
        },
    };
    let result = ctx.api.set_default(&category)?;
    finish(ctx, result)
}

fn handle_rename(ctx: &mut AppContext) -> Result<()> {
    let mut dialogue = RenameDialogue::new(ctx.api.current_category());
    if !drive(&mut dialogue, ctx.api.bookmarks())? {
        return aborted();
    }
    let Some((target, new_name)) = dialogue.outcome() else {
        return aborted();
    };

    let result = match target {
        RenameTarget::Category(old) => ctx.api.rename_category(old, new_name)?,
        RenameTarget::Key { category, key } => ctx.api.rename_key(category, key, new_name)?,
    };
    finish(ctx, result)
}

fn handle_config(ctx: &AppContext, key: Option<String>) -> Result<()> {
    let action = match key {
        Some(key) => ConfigAction::ShowKey(key),
        None => ConfigAction::ShowAll,
    };
    let result = ctx.api.show_config(action)?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
