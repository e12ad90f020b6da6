//! Argument specs
//!
//! An [`ArgSpec`] binds one group of command-line flags to one logical
//! payload field. Each spec can:
//!
//! - register its flags on a [`clap::Command`]
//! - extract a payload fragment from parsed [`ArgMatches`]
//! - produce example flags for building sample invocations
//!
//! ## Payload folding
//!
//! A record action's payload is built by extracting every spec in
//! declaration order and merging the fragments. Later fragments
//! overwrite earlier keys.

mod fqdn;
mod views;

use crate::action::Action;
use crate::error::{Error, Result};
use clap::{Arg, ArgMatches, Command, value_parser};
use serde_json::{Map, Value};

/// JSON request body
pub type Payload = Map<String, Value>;

/// Example values for sample invocations
pub const EXAMPLE_FQDN: &str = "testfqdn.example.com";
pub const EXAMPLE_IPV4: &str = "10.0.0.1";
pub const EXAMPLE_IPV6: &str = "2620:0:2d0:200::10";
pub const EXAMPLE_TARGET: &str = "target.example.com";
pub const EXAMPLE_TTL: u32 = 3600;
pub const EXAMPLE_PRIORITY: u16 = 10;
pub const EXAMPLE_PORT: u16 = 8080;
pub const EXAMPLE_WEIGHT: u16 = 20;
pub const EXAMPLE_DESCRIPTION: &str = "Managed by invdns";
pub const EXAMPLE_COMMENT: &str = "Created from the command line";

/// IP address family of an `--ip` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl IpFamily {
    /// Value sent as `ip_type`
    pub fn ip_type(&self) -> &'static str {
        match self {
            IpFamily::V4 => "4",
            IpFamily::V6 => "6",
        }
    }

    /// Infer the family from an address literal.
    ///
    /// Anything containing a colon is IPv6, everything else (including
    /// the empty string) is IPv4.
    pub fn infer(ip_str: &str) -> Self {
        if ip_str.contains(':') {
            IpFamily::V6
        } else {
            IpFamily::V4
        }
    }
}

/// One field of a record payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    /// `--label`/`--domain` or `--fqdn`.
    ///
    /// `service` records (SRV) need a leading underscore in examples.
    Fqdn { service: bool },
    /// `--ttl`
    Ttl,
    /// `--ip`, sent as `ip_str`
    Ip(IpFamily),
    /// `--[no-]private`, `--[no-]public`, sent as `views`
    Views,
    /// `--target`, sent under the given key
    Target(&'static str),
    /// `--priority`
    Priority,
    /// `--port`
    Port,
    /// `--weight`
    Weight,
    /// `--description`
    Description,
    /// `--comment`
    Comment,
    /// `--pk`, the integer id of an existing record
    Pk,
}

impl ArgSpec {
    /// Payload key this spec writes (the fqdn spec may write `label`
    /// and `domain` instead)
    pub fn key(&self) -> &'static str {
        match self {
            ArgSpec::Fqdn { .. } => "fqdn",
            ArgSpec::Ttl => "ttl",
            ArgSpec::Ip(_) => "ip_str",
            ArgSpec::Views => "views",
            ArgSpec::Target(key) => *key,
            ArgSpec::Priority => "priority",
            ArgSpec::Port => "port",
            ArgSpec::Weight => "weight",
            ArgSpec::Description => "description",
            ArgSpec::Comment => "comment",
            ArgSpec::Pk => "pk",
        }
    }

    /// Add this spec's flags to `command`
    ///
    /// `required` only affects fields a create needs (`--ip`,
    /// `--target`); `--pk` is always required.
    pub fn register(&self, command: Command, required: bool) -> Command {
        match self {
            ArgSpec::Fqdn { .. } => fqdn::register(command),
            ArgSpec::Views => views::register(command),
            ArgSpec::Ttl => command.arg(
                number_arg("ttl")
                    .value_name("SECONDS")
                    .value_parser(value_parser!(u32))
                    .help("The ttl of a record"),
            ),
            ArgSpec::Ip(_) => command.arg(
                Arg::new("ip")
                    .long("ip")
                    .value_name("IP")
                    .required(required)
                    .help("A string representation of an IP address"),
            ),
            ArgSpec::Target(_) => command.arg(
                Arg::new("target")
                    .long("target")
                    .value_name("TARGET")
                    .required(required)
                    .help("The target name of a record"),
            ),
            ArgSpec::Priority => command.arg(
                number_arg("priority")
                    .value_parser(value_parser!(u16))
                    .help("The priority number of a record"),
            ),
            ArgSpec::Port => command.arg(
                number_arg("port")
                    .value_parser(value_parser!(u16))
                    .help("The target port of an SRV record"),
            ),
            ArgSpec::Weight => command.arg(
                number_arg("weight")
                    .value_parser(value_parser!(u16))
                    .help("The weight number of an SRV record"),
            ),
            ArgSpec::Description => command.arg(
                Arg::new("description")
                    .long("description")
                    .value_name("TEXT")
                    .help("Tell us a little about this record"),
            ),
            ArgSpec::Comment => command.arg(
                Arg::new("comment")
                    .long("comment")
                    .value_name("TEXT")
                    .help("A comment stored with the change"),
            ),
            ArgSpec::Pk => command.arg(
                number_arg("pk")
                    .value_name("ID")
                    .value_parser(value_parser!(u64))
                    .required(true)
                    .help("The database integer primary key (id) of the record"),
            ),
        }
    }

    /// Extract this spec's payload fragment
    pub fn extract(&self, matches: &ArgMatches, action: Action) -> Result<Payload> {
        let key = self.key();
        let mut data = Payload::new();

        match self {
            ArgSpec::Fqdn { .. } => return fqdn::extract(matches, action, key),
            ArgSpec::Views => return Ok(views::extract(matches, key)),
            ArgSpec::Ip(_) => insert_non_empty(&mut data, key, string_arg(matches, "ip")),
            ArgSpec::Target(_) => insert_non_empty(&mut data, key, string_arg(matches, "target")),
            ArgSpec::Description | ArgSpec::Comment => {
                insert_non_empty(&mut data, key, string_arg(matches, key));
            }
            ArgSpec::Ttl => insert_number::<u32>(&mut data, matches, key),
            ArgSpec::Priority | ArgSpec::Port | ArgSpec::Weight => {
                insert_number::<u16>(&mut data, matches, key)
            }
            ArgSpec::Pk => {
                let pk = pk_arg(matches)
                    .ok_or_else(|| Error::validation("A primary key (--pk) is required"))?;
                data.insert(key.to_string(), Value::from(pk));
            }
        }

        Ok(data)
    }

    /// Example command-line tokens for this spec
    ///
    /// `Pk` has no example; the primary key depends on the server.
    pub fn example(&self) -> Vec<String> {
        let pair = |flag: &str, value: String| vec![format!("--{}", flag), value];

        match self {
            ArgSpec::Fqdn { service: true } => pair("fqdn", format!("_{}", EXAMPLE_FQDN)),
            ArgSpec::Fqdn { service: false } => pair("fqdn", EXAMPLE_FQDN.to_string()),
            ArgSpec::Ttl => pair("ttl", EXAMPLE_TTL.to_string()),
            ArgSpec::Ip(IpFamily::V4) => pair("ip", EXAMPLE_IPV4.to_string()),
            ArgSpec::Ip(IpFamily::V6) => pair("ip", EXAMPLE_IPV6.to_string()),
            ArgSpec::Views => vec!["--private".to_string(), "--no-public".to_string()],
            ArgSpec::Target(_) => pair("target", EXAMPLE_TARGET.to_string()),
            ArgSpec::Priority => pair("priority", EXAMPLE_PRIORITY.to_string()),
            ArgSpec::Port => pair("port", EXAMPLE_PORT.to_string()),
            ArgSpec::Weight => pair("weight", EXAMPLE_WEIGHT.to_string()),
            ArgSpec::Description => pair("description", EXAMPLE_DESCRIPTION.to_string()),
            ArgSpec::Comment => pair("comment", EXAMPLE_COMMENT.to_string()),
            ArgSpec::Pk => Vec::new(),
        }
    }
}

/// Primary key from parsed arguments, if the command defines `--pk`
pub fn pk_arg(matches: &ArgMatches) -> Option<u64> {
    matches.try_get_one::<u64>("pk").ok().flatten().copied()
}

fn number_arg(name: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("NUMBER")
}

fn string_arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or("")
}

fn insert_non_empty(data: &mut Payload, key: &str, value: &str) {
    if !value.is_empty() {
        data.insert(key.to_string(), Value::from(value));
    }
}

fn insert_number<T>(data: &mut Payload, matches: &ArgMatches, key: &str)
where
    T: Copy + Clone + Send + Sync + 'static + Into<Value>,
{
    if let Some(value) = matches.get_one::<T>(key) {
        data.insert(key.to_string(), (*value).into());
    }
}
