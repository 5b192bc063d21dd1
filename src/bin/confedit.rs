//! `confedit` command-line tool.
//!
//! ```sh
//! confedit schemas
//! confedit show ssh
//! confedit set ssh Port=2222 PermitRootLogin=no
//! confedit disable nginx gzip
//! confedit --settings-dir ./etc check nginx
//! CONFEDIT__PATHS__UFW=/tmp/ufw confedit show ufw --json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=confedit=debug` for details.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use confedit::{EditAction, EditArgs, EditError, Editor, SearchPath};

/// Edit sshd, ufw and nginx configuration directives in place.
#[derive(Parser, Debug)]
#[command(name = "confedit", version)]
struct Cli {
    /// Extra directory to search for confedit.toml (highest priority).
    #[arg(long, global = true)]
    settings_dir: Option<PathBuf>,

    /// Read and write target files without taking a file lock.
    #[arg(long, global = true)]
    no_lock: bool,

    /// Print `show` output as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    edit: EditArgs,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confedit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), EditError> {
    let mut builder = Editor::builder();
    if let Some(dir) = cli.settings_dir {
        builder = builder.add_search_path(SearchPath::Path(dir));
    }
    if cli.no_lock {
        builder = builder.lock_writes(false);
    }
    let editor = builder.build()?;

    match cli.edit.into_action() {
        EditAction::Show { id } if cli.json => {
            let parsed = editor.parse(&id)?;
            let json = serde_json::to_string_pretty(&parsed).map_err(|e| {
                EditError::InvalidValue {
                    key: id.clone(),
                    reason: e.to_string(),
                }
            })?;
            println!("{json}");
            Ok(())
        }
        action => editor.handle_and_print(&action),
    }
}
