use super::render::{
    print_config, print_draft, print_lifecycle_messages, print_messages, print_notes, print_status,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use notas::api::{ConfigAction, MenuToggle, NotasApi, NotasPaths, NoteFilter};
use notas::config::NotasConfig;
use notas::error::{NotasError, Result};
use notas::store::fs_backend::FsBackend;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const DATA_DIR_ENV: &str = "NOTAS_HOME";

struct AppContext {
    api: NotasApi<Rc<FsBackend>>,
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    print_lifecycle_messages(&ctx.api.start().messages, ctx.verbose);
    let appeared = ctx.api.appear();
    print_lifecycle_messages(&appeared.messages, ctx.verbose);

    let outcome = match cli.command {
        Some(Commands::Add { text, urgent }) => handle_add(&mut ctx, &text.join(" "), urgent),
        Some(Commands::Update {
            index,
            text,
            urgent,
        }) => handle_update(&mut ctx, &index, &text.join(" "), urgent),
        Some(Commands::List { trashed }) => handle_list(&ctx, trashed),
        Some(Commands::Trash { indexes }) => handle_trash(&mut ctx, &indexes),
        Some(Commands::Draft {
            text,
            urgent,
            clear,
        }) => handle_draft(&mut ctx, text, urgent, clear),
        Some(Commands::Menu) => handle_menu(&mut ctx),
        Some(Commands::Status) => handle_status(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, false),
    };

    // The hide checkpoints run whether or not the action succeeded.
    print_lifecycle_messages(&ctx.api.disappear().messages, ctx.verbose);
    print_lifecycle_messages(&ctx.api.sleep().messages, ctx.verbose);

    outcome
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (only possible in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "notas", "notas")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotasError::Api("Could not determine data dir".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    debug!(data_dir = %data_dir.display(), "using data dir");

    let config = NotasConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable config, using defaults");
        NotasConfig::default()
    });

    let backend = Rc::new(FsBackend::new(data_dir.clone()));
    let paths = NotasPaths { data: data_dir };
    let api = NotasApi::new(backend, &config, paths);

    Ok(AppContext {
        api,
        verbose: cli.verbose,
    })
}

fn handle_add(ctx: &mut AppContext, text: &str, urgent: bool) -> Result<()> {
    let result = ctx.api.add_note(text, urgent)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, index: &str, text: &str, urgent: bool) -> Result<()> {
    let result = ctx.api.update_note(index, text, urgent)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, trashed: bool) -> Result<()> {
    let filter = if trashed {
        NoteFilter::Trashed
    } else {
        NoteFilter::Active
    };
    let result = ctx.api.list_notes(filter);
    print_notes(&result.listed_notes, trashed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_trash(ctx: &mut AppContext, indexes: &[String]) -> Result<()> {
    let result = ctx.api.trash_notes(indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_draft(ctx: &mut AppContext, text: Vec<String>, urgent: bool, clear: bool) -> Result<()> {
    if !clear && text.is_empty() {
        let input = ctx.api.screen().input();
        print_draft((!input.is_blank()).then_some(input));
        return Ok(());
    }

    let text = if clear { String::new() } else { text.join(" ") };
    let result = ctx.api.edit_draft(&text, urgent);
    print_messages(&result.messages);
    Ok(())
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    let (toggle, result) = ctx.api.toggle_menu();
    if let MenuToggle::Started { .. } = toggle {
        // No animation to wait for in a terminal.
        ctx.api.finish_menu_transition();
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status();
    if let Some(status) = &result.status {
        print_status(status);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
