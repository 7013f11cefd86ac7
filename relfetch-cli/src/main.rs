use anyhow::{Error, Result};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use log::error;
use relfetch::{Relfetch, RelfetchBuilder};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cmd = cmd();
    let matches = cmd.get_matches();
    if let Err(e) = init_logger_from_matches(&matches) {
        eprintln!("Error creating logger: {e}");
        process::exit(126);
    }

    let status = match make_relfetch(&matches) {
        Ok(relfetch) => match relfetch.fetch().await {
            Ok(destination) => {
                println!("Downloaded the release artifact to {}", destination.display());
                0
            }
            Err(e) => {
                print_err(&e);
                1
            }
        },
        Err(e) => {
            print_err(&e);
            127
        }
    };
    process::exit(status);
}

const MAX_TERM_WIDTH: usize = 100;

fn cmd() -> Command {
    Command::new("relfetch")
        .version(relfetch::VERSION)
        .about("Downloads the Linux zip artifact attached to a tagged release")
        .arg(Arg::new("url").long("url").short('u').help(concat!(
            "The release metadata endpoint to query, like",
            " https://api.github.com/repos/owner/repo/releases/tags/v1.2.0.",
            " Defaults to the value of the GH_TAGS env var.",
        )))
        .arg(Arg::new("token").long("token").short('t').help(concat!(
            "The access token sent with every request. Defaults to the value of the TOKEN env",
            " var. Needed for private repos and to stay clear of anonymous API rate limits.",
        )))
        .arg(
            Arg::new("in")
                .long("in")
                .short('i')
                .help("The directory in which the artifact should be placed. Defaults to ."),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debugging output."),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppresses most output."),
        )
        .group(ArgGroup::new("log-level").args(["debug", "quiet"]))
        .max_term_width(MAX_TERM_WIDTH)
}

fn init_logger_from_matches(matches: &ArgMatches) -> Result<(), log::SetLoggerError> {
    let level = if matches.get_flag("debug") {
        log::LevelFilter::Debug
    } else if matches.get_flag("quiet") {
        log::LevelFilter::Error
    } else {
        // Info, so that the line echoing the selected asset is visible by
        // default.
        log::LevelFilter::Info
    };

    relfetch::init_logger(level)
}

fn make_relfetch(matches: &ArgMatches) -> Result<Relfetch> {
    let mut builder = RelfetchBuilder::new();
    if let Some(u) = matches.get_one::<String>("url") {
        builder = builder.metadata_url(u);
    }
    if let Some(t) = matches.get_one::<String>("token") {
        builder = builder.token(t);
    }
    if let Some(dir) = matches.get_one::<String>("in") {
        builder = builder.install_root(dir);
    }
    builder.build()
}

fn print_err(e: &Error) {
    error!("{e}");
}
