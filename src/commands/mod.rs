//! Command-line interface.
//!
//! One module per subcommand, each with an `Args` struct and a `cmd`
//! function. [`Cli::menu`] parses the command line and dispatches.
//!
//! | command        | effect                                                    |
//! |----------------|-----------------------------------------------------------|
//! | `init`         | configuration wizard                                      |
//! | `event`        | clock-in, clock-out, break start or end for a user        |
//! | `message`      | derives the event from a chat message and applies it      |
//! | `presence`     | starts or ends a break from a status change               |
//! | `justify`      | attaches a justification (abono) to a day                 |
//! | `records`      | one page of mapped records, with a cursor for the next    |
//! | `balance`      | banked hours per user over a window                       |
//! | `fix-timezone` | shifts stored clock values of a date range                |
//! | `export`       | records or balances of a window to CSV or JSON            |

pub mod balance;
pub mod event;
pub mod export;
pub mod fix_timezone;
pub mod init;
pub mod justify;
pub mod message;
pub mod presence;
pub mod records;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Record an attendance event", arg_required_else_help = true)]
    Event(event::EventArgs),
    #[command(about = "Record the attendance event expressed by a chat message", arg_required_else_help = true)]
    Message(message::MessageArgs),
    #[command(about = "Start or end a break from a presence change", arg_required_else_help = true)]
    Presence(presence::PresenceArgs),
    #[command(about = "Justify a day, optionally crediting hours", arg_required_else_help = true)]
    Justify(justify::JustifyArgs),
    #[command(about = "List attendance records, one page at a time")]
    Records(records::RecordsArgs),
    #[command(about = "Banked hours per user")]
    Balance(balance::BalanceArgs),
    #[command(about = "Correct the timezone of stored clock values", arg_required_else_help = true)]
    FixTimezone(fix_timezone::FixTimezoneArgs),
    #[command(about = "Export records or balances to a file")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Event(args) => event::cmd(args).await,
            Commands::Message(args) => message::cmd(args).await,
            Commands::Presence(args) => presence::cmd(args).await,
            Commands::Justify(args) => justify::cmd(args).await,
            Commands::Records(args) => records::cmd(args).await,
            Commands::Balance(args) => balance::cmd(args).await,
            Commands::FixTimezone(args) => fix_timezone::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
        }
    }
}
