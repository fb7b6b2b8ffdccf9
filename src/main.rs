//! Terminal shell for todo-sync.
//!
//! A line-oriented front end over the library: each input line is parsed
//! into a [`Command`], mapped onto one or more intents, and the resulting
//! list is printed.
//!
//! # Lifecycle
//!
//! 1. **Config**: `--config` file (or the default location if present),
//!    then `TODO_SYNC_BASE_URL`, then `--base-url`
//! 2. **Tracing**: Install the file-exporting subscriber
//! 3. **Service**: HTTP, or in-memory with `--memory`
//! 4. **Load**: Fetch the collection and print it
//! 5. **Loop**: Read commands until `quit` or end of input
//!
//! # Commands
//!
//! ```text
//! list                      print the list
//! add <title> [| <desc>]    create an item
//! edit <id>                 open an edit session
//! title <text>              set the edit title
//! desc <text>               set the edit description
//! save | cancel             finish the edit session
//! toggle <id>               flip completion
//! rm <id>                   delete, after a y/n confirmation
//! quit                      exit
//! ```
//!
//! Arguments are trimmed, and `add` also trims around its `|` separator, so
//! `add Buy milk | 2 litres` submits `"Buy milk"` and `"2 litres"`. The
//! controller itself sends titles exactly as given.

use clap::Parser;
use std::path::PathBuf;
use todo_sync::app::{handle_intent, Intent, ListController, Outcome};
use todo_sync::domain::{ItemDraft, ItemId, ValidationError};
use todo_sync::service::{CollectionService, HttpCollectionService, InMemoryCollectionService};
use todo_sync::{infrastructure, observability, ui, Config};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Debug, Parser)]
#[command(name = "todo-sync", version, about = "Keep a todo list in sync with a remote store")]
struct Args {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Collection endpoint, overriding config and environment.
    #[arg(long)]
    base_url: Option<String>,

    /// Use a process-local store instead of HTTP.
    #[arg(long)]
    memory: bool,
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    /// Title and description, each trimmed.
    Add(ItemDraft),
    Edit(ItemId),
    Title(String),
    Desc(String),
    Save,
    Cancel,
    Toggle(ItemId),
    Remove(ItemId),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum ParseError {
    Unknown(String),
    MissingArgument(&'static str),
    Id(ValidationError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command '{word}' (try 'help')"),
            Self::MissingArgument(command) => write!(f, "'{command}' needs an argument"),
            Self::Id(e) => write!(f, "{e}"),
        }
    }
}

const HELP: &str = "commands: list | add <title> [| <desc>] | edit <id> | title <text> | desc <text> | save | cancel | toggle <id> | rm <id> | quit";

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    fn parse(line: &str) -> Option<Result<Self, ParseError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let id = |command: &'static str| -> Result<ItemId, ParseError> {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument(command));
            }
            rest.parse().map_err(ParseError::Id)
        };

        let command = match word {
            "list" | "ls" => Ok(Self::List),
            "add" => {
                let (title, description) = rest.split_once('|').unwrap_or((rest, ""));
                Ok(Self::Add(ItemDraft::new(title.trim(), description.trim())))
            }
            "edit" => id("edit").map(Self::Edit),
            "title" => Ok(Self::Title(rest.to_string())),
            "desc" => Ok(Self::Desc(rest.to_string())),
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "toggle" => id("toggle").map(Self::Toggle),
            "rm" | "delete" => id("rm").map(Self::Remove),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        };
        Some(command)
    }

    /// The intent this command maps to, for commands that map to exactly one.
    fn into_intent(self) -> Option<Intent> {
        match self {
            Self::Add(draft) => Some(Intent::Create(draft)),
            Self::Edit(id) => Some(Intent::BeginEdit(id)),
            Self::Title(text) => Some(Intent::SetEditTitle(text)),
            Self::Desc(text) => Some(Intent::SetEditDescription(text)),
            Self::Save => Some(Intent::SaveEdit),
            Self::Cancel => Some(Intent::CancelEdit),
            Self::Toggle(id) => Some(Intent::ToggleComplete(id)),
            Self::List | Self::Remove(_) | Self::Help | Self::Quit => None,
        }
    }
}

fn resolve_config(args: &Args) -> todo_sync::Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => match infrastructure::config_file().filter(|p| p.exists()) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        },
    };
    Ok(config
        .with_env_overrides()
        .with_base_url_override(args.base_url.clone()))
}

fn build_service(args: &Args, config: &Config) -> todo_sync::Result<Box<dyn CollectionService>> {
    if args.memory {
        tracing::debug!("using in-memory collection");
        return Ok(Box::new(InMemoryCollectionService::new()));
    }
    Ok(Box::new(HttpCollectionService::new(config)?))
}

fn describe(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Created(item) => Some(format!("created #{}", item.id)),
        Outcome::Updated(item) => Some(format!("updated #{}", item.id)),
        Outcome::Removed(id) => Some(format!("deleted #{id}")),
        Outcome::EditOpened(id) => Some(format!("editing #{id} (title/desc, then save or cancel)")),
        Outcome::EditCancelled => Some("edit cancelled".to_string()),
        Outcome::Declined(_) => Some("kept".to_string()),
        Outcome::Unchanged => Some("nothing to do".to_string()),
        Outcome::Loaded { .. } | Outcome::DraftChanged | Outcome::AwaitingConfirmation(_) => None,
    }
}

async fn run_intent<S: CollectionService>(controller: &ListController<S>, intent: Intent) {
    match handle_intent(controller, intent).await {
        Ok(outcome) => {
            if let Some(message) = describe(&outcome) {
                println!("{message}");
            }
        }
        Err(e) => println!("error: {e}"),
    }
}

async fn remove<S: CollectionService>(
    controller: &ListController<S>,
    id: ItemId,
    input: &mut Lines<BufReader<Stdin>>,
) -> std::io::Result<()> {
    let Some(item) = controller.items().into_iter().find(|item| item.id == id) else {
        println!("nothing to do");
        return Ok(());
    };

    println!("Delete #{} \"{}\"? [y/N]", item.id, item.title);
    let answer = input.next_line().await?.unwrap_or_default();
    let token = controller.request_delete(id);

    let intent = if matches!(answer.trim(), "y" | "Y" | "yes") {
        Intent::ConfirmDelete(token)
    } else {
        Intent::DeclineDelete(token)
    };
    run_intent(controller, intent).await;
    Ok(())
}

async fn run<S: CollectionService>(controller: &ListController<S>) -> std::io::Result<()> {
    if let Err(e) = handle_intent(controller, Intent::Load).await {
        println!("error: {e}");
    }
    print!("{}", ui::render(&controller.view()));

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = input.next_line().await? {
        let command = match Command::parse(&line) {
            None => continue,
            Some(Err(e)) => {
                println!("{e}");
                continue;
            }
            Some(Ok(command)) => command,
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::List => {}
            Command::Remove(id) => remove(controller, id, &mut input).await?,
            other => {
                if let Some(intent) = other.into_intent() {
                    run_intent(controller, intent).await;
                }
            }
        }
        print!("{}", ui::render(&controller.view()));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> todo_sync::Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;
    observability::init_tracing(&config);

    let controller = ListController::new(build_service(&args, &config)?);
    tracing::info!(base_url = %config.base_url, memory = args.memory, "todo-sync started");

    run(&controller).await?;

    tracing::info!("todo-sync stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, ParseError> {
        Command::parse(line).unwrap()
    }

    #[test]
    fn parses_add_with_optional_description() {
        assert_eq!(parse("add Buy milk"), Ok(Command::Add(ItemDraft::new("Buy milk", ""))));
        assert_eq!(
            parse("add Buy milk | 2 litres"),
            Ok(Command::Add(ItemDraft::new("Buy milk", "2 litres")))
        );
    }

    #[test]
    fn add_trims_around_separator_and_leaves_blank_titles_to_validation() {
        assert_eq!(
            parse("add   Buy milk   |   2 litres  "),
            Ok(Command::Add(ItemDraft::new("Buy milk", "2 litres")))
        );

        let Ok(Command::Add(draft)) = parse("add  | notes") else {
            panic!("expected an add command");
        };
        assert_eq!(draft, ItemDraft::new("", "notes"));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn parses_ids() {
        assert_eq!(parse("toggle 7"), Ok(Command::Toggle(ItemId::new(7))));
        assert_eq!(parse("rm  12 "), Ok(Command::Remove(ItemId::new(12))));
        assert_eq!(parse("edit"), Err(ParseError::MissingArgument("edit")));
        assert!(matches!(parse("edit seven"), Err(ParseError::Id(_))));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert!(Command::parse("   ").is_none());
        assert_eq!(parse("frobnicate"), Err(ParseError::Unknown("frobnicate".to_string())));
    }

    #[test]
    fn maps_commands_to_intents() {
        assert_eq!(Command::Save.into_intent(), Some(Intent::SaveEdit));
        assert_eq!(
            Command::Title("New".to_string()).into_intent(),
            Some(Intent::SetEditTitle("New".to_string()))
        );
        assert_eq!(Command::Remove(ItemId::new(1)).into_intent(), None);
    }
}
