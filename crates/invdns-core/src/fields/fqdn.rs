//! `--label` / `--domain` / `--fqdn` handling
//!
//! A record name is given either as a full `--fqdn`, or as a `--domain`
//! plus an optional leading `--label`. An empty label behaves like `@`
//! in a zone file: the record takes its domain's name.

use super::{Payload, string_arg};
use crate::action::Action;
use crate::error::{Error, Result};
use clap::{Arg, ArgMatches, Command};
use serde_json::Value;

const EITHER_OR: &str = "Use either domain (and label) OR use fqdn.";
const LABEL_NEEDS_DOMAIN: &str = "If you specify a label you need to also specify a domain name";

pub(super) fn register(command: Command) -> Command {
    command
        .arg(
            Arg::new("label")
                .long("label")
                .value_name("LABEL")
                .default_value("")
                .hide_default_value(true)
                .help(
                    "The first label in the fqdn. If omitted, '' is used, which is \
                     analogous to '@' in a zone file (the record gets its domain's name)",
                ),
        )
        .arg(
            Arg::new("domain")
                .long("domain")
                .value_name("DOMAIN")
                .help("The domain a record is in"),
        )
        .arg(
            Arg::new("fqdn")
                .long("fqdn")
                .value_name("FQDN")
                .help("The FQDN of the record. Cannot be combined with --label or --domain"),
        )
}

pub(super) fn extract(matches: &ArgMatches, action: Action, key: &str) -> Result<Payload> {
    let label = string_arg(matches, "label");
    let domain = string_arg(matches, "domain");
    let fqdn = string_arg(matches, "fqdn");

    if (!label.is_empty() || !domain.is_empty()) && !fqdn.is_empty() {
        return Err(Error::validation(EITHER_OR));
    }

    if action == Action::Create {
        if !label.is_empty() && domain.is_empty() {
            return Err(Error::validation(LABEL_NEEDS_DOMAIN));
        }
        if domain.is_empty() && fqdn.is_empty() {
            return Err(Error::validation(EITHER_OR));
        }
    }

    let mut data = Payload::new();
    if !fqdn.is_empty() {
        data.insert(key.to_string(), Value::from(fqdn));
        return Ok(data);
    }

    match action {
        Action::Create => {
            data.insert("label".to_string(), Value::from(label));
            data.insert("domain".to_string(), Value::from(domain));
        }
        Action::Update => {
            if !label.is_empty() {
                data.insert("label".to_string(), Value::from(label));
            }
            if !domain.is_empty() {
                data.insert("domain".to_string(), Value::from(domain));
            }
        }
        Action::Delete | Action::Detail => {}
    }

    Ok(data)
}
