//! Command-line surface for sbm.
//!
//! Parsing is done with `clap`; [`Cli::into_command`] turns the parsed
//! arguments into an [`app::Command`](crate::app::Command).

use std::ffi::OsString;

use clap::{Parser, Subcommand};

use crate::app::{App, Command, ListQuery, RunResult};
use crate::config::Config;
use crate::managers::bookmark_manager::{NewRow, RowUpdate};
use crate::services::prompt::AutoAnswer;
use crate::types::bookmark::RowId;
use crate::types::errors::BookmarkError;

/// Scope accepted by `tag list`.
pub const TAG_LIST_SCOPE: &str = "all";

#[derive(Parser, Debug)]
#[command(name = "sbm", version, about = "sbm - simple bookmark manager")]
pub struct Cli {
    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Save a bookmark; the title is fetched from the page when omitted
    Add {
        url: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        comment: Option<String>,
        /// Tags by name or ID; one quoted argument may hold several
        #[arg(long = "tg", num_args = 1..)]
        tags: Vec<String>,
    },
    /// Change a bookmark's title, comment or tags
    Update {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        comment: Option<String>,
        /// Tags to toggle on the bookmark
        #[arg(long = "tg", num_args = 1..)]
        tags: Option<Vec<String>>,
    },
    /// Delete a bookmark
    ///
    /// Asks for confirmation first. Answering no leaves the store unchanged
    /// and still exits with status 0.
    Remove { id: String },
    /// Open a bookmark's URL
    Open { id: String },
    /// List bookmarks by title, `all`, or by tag
    List {
        #[arg(required_unless_present = "tags", conflicts_with = "tags")]
        term: Option<String>,
        #[arg(long = "tg", num_args = 1..)]
        tags: Vec<String>,
    },
    /// Manage tags, or `tag <bookmark-id> <tag>` to toggle a tag on a bookmark
    Tag {
        #[command(subcommand)]
        action: TagCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Create a tag
    Add { name: String },
    /// Rename a tag
    Rename { tag: String, name: String },
    /// Delete a tag and detach it from every bookmark
    ///
    /// Asks for confirmation first. Answering no leaves the store unchanged
    /// and still exits with status 0.
    Remove { tag: String },
    /// List all tags
    List {
        #[arg(default_value = TAG_LIST_SCOPE)]
        scope: String,
    },
    #[command(external_subcommand)]
    Attach(Vec<String>),
}

/// Rewrites the single-dash `-tg` flag to the `--tg` form clap expects.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.into();
            if arg == "-tg" {
                OsString::from("--tg")
            } else {
                arg
            }
        })
        .collect()
}

fn parse_row_id(token: &str) -> Result<RowId, BookmarkError> {
    RowId::parse(token)
        .ok_or_else(|| BookmarkError::Validation(format!("'{}' is not a bookmark ID", token)))
}

impl Cli {
    /// Validates arguments clap cannot check and builds the command.
    pub fn into_command(self) -> Result<Command, BookmarkError> {
        let command = match self.command {
            CliCommand::Add {
                url,
                title,
                comment,
                tags,
            } => Command::Add(NewRow {
                url,
                title,
                comment,
                tags,
            }),
            CliCommand::Update {
                id,
                title,
                comment,
                tags,
            } => {
                let update = RowUpdate {
                    title,
                    comment,
                    tags,
                };
                if update.is_empty() {
                    return Err(BookmarkError::Validation(
                        "update needs at least one of -t, -c or -tg".to_string(),
                    ));
                }
                Command::Update {
                    id: parse_row_id(&id)?,
                    update,
                }
            }
            CliCommand::Remove { id } => Command::Remove(parse_row_id(&id)?),
            CliCommand::Open { id } => Command::Open(parse_row_id(&id)?),
            CliCommand::List { term, tags } => match term {
                Some(term) => Command::List(ListQuery::Title(term)),
                None => Command::List(ListQuery::Tags(tags)),
            },
            CliCommand::Tag { action } => match action {
                TagCommand::Add { name } => Command::TagAdd(name),
                TagCommand::Rename { tag, name } => Command::TagRename { tag, name },
                TagCommand::Remove { tag } => Command::TagRemove(tag),
                TagCommand::List { scope } => {
                    if !scope.eq_ignore_ascii_case(TAG_LIST_SCOPE) {
                        return Err(BookmarkError::Validation(format!(
                            "only \"{}\" can be used to list tags",
                            TAG_LIST_SCOPE
                        )));
                    }
                    Command::TagList
                }
                TagCommand::Attach(args) => match args.as_slice() {
                    [row, tag] => Command::TagAttach {
                        row: parse_row_id(row)?,
                        tag: tag.clone(),
                    },
                    _ => {
                        return Err(BookmarkError::Validation(
                            "expected `tag <bookmark-id> <tag>`".to_string(),
                        ))
                    }
                },
            },
        };
        Ok(command)
    }
}

/// Runs the parsed command line and prints its output.
pub fn run(cli: Cli) -> Result<(), BookmarkError> {
    let config = Config::load()?;
    let auto_yes = cli.yes;
    let command = cli.into_command()?;

    let mut app = App::new(config);
    if auto_yes {
        app.set_prompt(Box::new(AutoAnswer(true)));
    }

    match app.run(command)? {
        RunResult::Done(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        RunResult::Bootstrapped(path) => println!(
            "Config created at {}. You may need to re-run your last command.",
            path.display()
        ),
        RunResult::Aborted => println!("Aborted."),
    }
    Ok(())
}
