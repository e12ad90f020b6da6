//! Private/public view selection
//!
//! Each view dimension has an enable and a disable flag; the two are
//! mutually exclusive. Leaving both off omits that dimension.

use super::Payload;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;

pub(super) fn register(command: Command) -> Command {
    command
        .arg(
            Arg::new("no_private")
                .long("no-private")
                .action(ArgAction::SetTrue)
                .conflicts_with("private")
                .help("Disable private view"),
        )
        .arg(
            Arg::new("private")
                .long("private")
                .action(ArgAction::SetTrue)
                .help("Enable private view"),
        )
        .arg(
            Arg::new("no_public")
                .long("no-public")
                .action(ArgAction::SetTrue)
                .conflicts_with("public")
                .help("Disable public view"),
        )
        .arg(
            Arg::new("public")
                .long("public")
                .action(ArgAction::SetTrue)
                .help("Enable public view"),
        )
}

/// Selected views in `private`, `public` order
pub(super) fn selected(matches: &ArgMatches) -> Vec<&'static str> {
    let mut views = Vec::with_capacity(2);

    if matches.get_flag("no_private") {
        views.push("no-private");
    } else if matches.get_flag("private") {
        views.push("private");
    }

    if matches.get_flag("no_public") {
        views.push("no-public");
    } else if matches.get_flag("public") {
        views.push("public");
    }

    views
}

pub(super) fn extract(matches: &ArgMatches, key: &str) -> Payload {
    let views = selected(matches);
    let mut data = Payload::new();
    if !views.is_empty() {
        data.insert(
            key.to_string(),
            Value::Array(views.into_iter().map(Value::from).collect()),
        );
    }
    data
}
