//! Command-line argument parsing
//!
//! Each invocation loads the saved session, performs one action on it and
//! prints the result. Actions that change the card are sent through the same
//! message loop the interactive editor uses.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::messages::Msg;
use crate::model::ElementAddress;
use crate::mutation::DeleteTarget;

/// Floor plan card editor
#[derive(Parser, Debug)]
#[command(
    name = "floorplan",
    version,
    about = "Edit picture-elements floor plan cards"
)]
pub struct CliArgs {
    /// Session file to use instead of the one in the config directory
    #[arg(long, value_name = "FILE", global = true)]
    pub session: Option<PathBuf>,

    /// Config file to use instead of the one in the config directory
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the card text (the default)
    Show,
    /// Replace the card text with the contents of a file ("-" for stdin)
    Edit {
        #[arg(value_name = "FILE")]
        source: PathBuf,
    },
    /// Move an element
    Move {
        index: usize,
        /// Element inside a conditional group
        #[arg(long)]
        nested: Option<usize>,
        left: String,
        top: String,
    },
    /// Add a temperature/humidity sensor pair
    AddSensor {
        #[arg(long)]
        floor: String,
        #[arg(long)]
        id: String,
    },
    /// Add the humidifier group for a floor
    AddHumidifier {
        #[arg(long)]
        floor: String,
    },
    /// Delete an element (and its sensor partner)
    Delete {
        index: usize,
        #[arg(long)]
        nested: Option<usize>,
    },
    /// Print the text lines that belong to an element
    Highlight {
        index: usize,
        #[arg(long)]
        nested: Option<usize>,
    },
    /// Use an image file as the background
    ImportImage {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Show canned sensor readings instead of entity names
    Placeholders { mode: PlaceholderMode },
    /// Print every state label as the preview shows it
    Labels,
    /// Start over from the sample card
    Reset,
    /// Write the current settings (defaults if none are saved) to the config file
    InitConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderMode {
    On,
    Off,
    Toggle,
}

/// What `main` has to do for one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Show,
    Labels,
    /// Print the lines of this element
    Highlight(ElementAddress),
    /// Read new card text from a file or stdin
    ReadText(Source),
    /// Read an image file and drop it on the preview
    ReadImage(PathBuf),
    /// Send a message and print the resulting text
    Send(Msg),
    /// Save the loaded editor config
    WriteConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

fn address(index: usize, nested: Option<usize>) -> ElementAddress {
    ElementAddress { index, nested }
}

impl CliArgs {
    /// Convert the parsed subcommand into an action
    pub fn action(&self) -> Action {
        let Some(command) = &self.command else {
            return Action::Show;
        };
        match command.clone() {
            Command::Show => Action::Show,
            Command::Labels => Action::Labels,
            Command::Highlight { index, nested } => Action::Highlight(address(index, nested)),
            Command::Edit { source } if source.as_os_str() == "-" => {
                Action::ReadText(Source::Stdin)
            }
            Command::Edit { source } => Action::ReadText(Source::File(source)),
            Command::ImportImage { path } => Action::ReadImage(path),
            Command::Move {
                index,
                nested,
                left,
                top,
            } => Action::Send(Msg::MoveElement {
                address: address(index, nested),
                left,
                top,
            }),
            Command::AddSensor { floor, id } => Action::Send(Msg::AddSensor { floor, id }),
            Command::AddHumidifier { floor } => Action::Send(Msg::AddHumidifierGroup { floor }),
            Command::Delete { index, nested } => Action::Send(Msg::DeleteElement(
                DeleteTarget::At(address(index, nested)),
            )),
            Command::Placeholders { mode } => Action::Send(match mode {
                PlaceholderMode::On => Msg::SetPlaceholders(true),
                PlaceholderMode::Off => Msg::SetPlaceholders(false),
                PlaceholderMode::Toggle => Msg::TogglePlaceholders,
            }),
            Command::Reset => Action::Send(Msg::ResetDocument),
            Command::InitConfig => Action::WriteConfig,
        }
    }
}
