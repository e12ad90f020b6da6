//! Generic record dispatcher
//!
//! Turns a parsed `<dtype> <action> [--flags]` invocation into exactly one
//! API request:
//!
//! | action   | method | path                                       | body    |
//! |----------|--------|--------------------------------------------|---------|
//! | `create` | POST   | `/api/v{version}_dns/{resource}/`          | payload |
//! | `update` | PATCH  | `/api/v{version}_dns/{resource}/{pk}/`     | payload |
//! | `delete` | DELETE | `/api/v{version}_dns/{resource}/{pk}/`     | none    |
//! | `detail` | GET    | `/api/v{version}_dns/{resource}/{pk}/`     | none    |
//!
//! Validation errors abort before the transport is touched. The
//! dispatcher never retries.

use crate::action::Action;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::fields::{Payload, pk_arg};
use crate::registry::{RecordDescriptor, Registry};
use crate::traits::{ApiRequest, ApiResponse, HttpMethod, Transport};
use clap::{ArgMatches, Command};

/// Build one subcommand per registered record type
///
/// Each record subcommand carries `create`, `update`, `delete` and
/// `detail` subcommands with the flags of their argument specs.
pub fn record_commands(registry: &Registry) -> Vec<Command> {
    registry.iter().map(record_command).collect()
}

fn record_command(descriptor: &RecordDescriptor) -> Command {
    let dtype = descriptor.dtype;

    Action::ALL.into_iter().fold(
        Command::new(dtype)
            .alias(dtype.to_ascii_lowercase())
            .about(format!("The interface for {} records", dtype))
            .subcommand_required(true)
            .arg_required_else_help(true),
        |command, action| {
            let sub = descriptor.args(action).iter().fold(
                Command::new(action.as_str())
                    .about(format!("{} a(n) {} record", action.verb(), dtype)),
                |sub, spec| spec.register(sub, action.requires_fields()),
            );
            command.subcommand(sub)
        },
    )
}

/// Fold an action's extractors into one payload
///
/// Fragments merge in declaration order, then the descriptor's
/// computed `ip_type` is applied on top.
pub fn build_payload(
    descriptor: &RecordDescriptor,
    action: Action,
    matches: &ArgMatches,
) -> Result<Payload> {
    let mut payload = Payload::new();
    for spec in descriptor.args(action) {
        payload.extend(spec.extract(matches, action)?);
    }
    descriptor.apply_ip_type(&mut payload);
    Ok(payload)
}

/// Result of one dispatched invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The request was sent and answered with a 2xx status
    Sent(ApiResponse),
    /// Dry-run mode: the request was built but not sent
    DryRun(ApiRequest),
}

/// What was dispatched, for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    /// Record type tag
    pub dtype: &'static str,
    /// Action performed
    pub action: Action,
    /// Primary key, for update/delete/detail
    pub pk: Option<u64>,
    /// Transport outcome
    pub outcome: Outcome,
}

/// Executes record actions against a transport
pub struct Dispatcher<'a> {
    registry: &'a Registry,
    transport: &'a dyn Transport,
    api_version: String,
    dry_run: bool,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher
    pub fn new(registry: &'a Registry, transport: &'a dyn Transport, config: &ClientConfig) -> Self {
        Self {
            registry,
            transport,
            api_version: config.api_version.clone(),
            dry_run: config.dry_run,
        }
    }

    /// Collection path of a resource
    pub fn collection_path(&self, descriptor: &RecordDescriptor) -> String {
        format!("/api/v{}_dns/{}/", self.api_version, descriptor.resource_name)
    }

    /// Item path of a resource
    pub fn item_path(&self, descriptor: &RecordDescriptor, pk: u64) -> String {
        format!("{}{}/", self.collection_path(descriptor), pk)
    }

    /// Resolve the record type and action subcommands
    pub fn resolve<'m>(
        &self,
        matches: &'m ArgMatches,
    ) -> Result<(&'a RecordDescriptor, Action, &'m ArgMatches)> {
        let (dtype, record_matches) = matches
            .subcommand()
            .ok_or_else(|| Error::validation("A record type is required"))?;
        let descriptor = self.registry.lookup(dtype)?;

        let (action_name, action_matches) = record_matches.subcommand().ok_or_else(|| {
            Error::validation(format!("An action is required for {} records", descriptor.dtype))
        })?;
        let action = Action::from_name(action_name)
            .ok_or_else(|| Error::validation(format!("Unknown action: {}", action_name)))?;

        Ok((descriptor, action, action_matches))
    }

    /// Build the request for an action without sending it
    pub fn prepare(
        &self,
        descriptor: &RecordDescriptor,
        action: Action,
        matches: &ArgMatches,
    ) -> Result<ApiRequest> {
        let payload = build_payload(descriptor, action, matches)?;

        let item_path = || {
            pk_arg(matches)
                .map(|pk| self.item_path(descriptor, pk))
                .ok_or_else(|| Error::validation("A primary key (--pk) is required"))
        };

        let request = match action {
            Action::Create => {
                ApiRequest::new(HttpMethod::Post, self.collection_path(descriptor)).with_body(payload)
            }
            Action::Update => ApiRequest::new(HttpMethod::Patch, item_path()?).with_body(payload),
            Action::Delete => {
                ApiRequest::new(HttpMethod::Delete, item_path()?).with_query("format", "json")
            }
            Action::Detail => {
                ApiRequest::new(HttpMethod::Get, item_path()?).with_query("format", "json")
            }
        };

        Ok(request)
    }

    /// Prepare and send one action
    pub async fn execute(
        &self,
        descriptor: &RecordDescriptor,
        action: Action,
        matches: &ArgMatches,
    ) -> Result<Outcome> {
        let request = self.prepare(descriptor, action, matches)?;

        if let Some(ref body) = request.body {
            let pretty = serde_json::to_string_pretty(body)?;
            tracing::debug!("{} payload: {}", descriptor.dtype, pretty);
        }

        if self.dry_run {
            tracing::warn!(
                "[DRY-RUN] Would send {} {} via {}",
                request.method,
                request.path,
                self.transport.transport_name()
            );
            return Ok(Outcome::DryRun(request));
        }

        tracing::info!(
            "{} {} record: {} {}",
            action.verb(),
            descriptor.dtype,
            request.method,
            request.path
        );

        let response = self.transport.send(request).await?;
        tracing::debug!("Response status: {}", response.status);
        Ok(Outcome::Sent(response))
    }

    /// Resolve, prepare and send the invocation in `matches`
    ///
    /// `matches` must be the level holding the record type subcommand.
    pub async fn route(&self, matches: &ArgMatches) -> Result<Dispatched> {
        let (descriptor, action, action_matches) = self.resolve(matches)?;
        let outcome = self.execute(descriptor, action, action_matches).await?;

        Ok(Dispatched {
            dtype: descriptor.dtype,
            action,
            pk: pk_arg(action_matches),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    struct NullTransport;

    #[async_trait::async_trait]
    impl Transport for NullTransport {
        async fn send(&self, _request: ApiRequest) -> Result<ApiResponse> {
            Err(Error::transport("not connected"))
        }

        fn transport_name(&self) -> &'static str {
            "null"
        }
    }

    fn root(registry: &Registry) -> Command {
        Command::new("invdns").subcommands(record_commands(registry))
    }

    fn action_matches(registry: &Registry, args: &[&str]) -> ArgMatches {
        let matches = root(registry)
            .try_get_matches_from(std::iter::once("invdns").chain(args.iter().copied()))
            .unwrap();
        let (_, record) = matches.subcommand().unwrap();
        record.subcommand().unwrap().1.clone()
    }

    #[test]
    fn test_command_tree_is_consistent() {
        root(&Registry::dns()).debug_assert();
    }

    #[test]
    fn test_every_record_has_four_actions() {
        for command in record_commands(&Registry::dns()) {
            let names: Vec<&str> = command.get_subcommands().map(|c| c.get_name()).collect();
            assert_eq!(names, vec!["create", "update", "delete", "detail"]);
        }
    }

    #[test]
    fn test_lowercase_alias_resolves() {
        let registry = Registry::dns();
        let matches = root(&registry)
            .try_get_matches_from(["invdns", "cname", "detail", "--pk", "9"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("CNAME"));
    }

    #[test]
    fn test_a_record_create_payload() {
        let registry = Registry::dns();
        let descriptor = registry.get("A").unwrap();
        let m = action_matches(
            &registry,
            &["A", "create", "--domain", "example.com", "--ip", "10.0.0.1", "--private"],
        );

        let payload = build_payload(descriptor, Action::Create, &m).unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({
                "label": "",
                "domain": "example.com",
                "ip_str": "10.0.0.1",
                "views": ["private"],
                "ip_type": "4"
            })
        );
    }

    #[test]
    fn test_update_payload_includes_pk_and_ip_type() {
        let registry = Registry::dns();
        let descriptor = registry.get("AAAA").unwrap();
        let m = action_matches(&registry, &["AAAA", "update", "--pk", "12", "--ttl", "60"]);

        let payload = build_payload(descriptor, Action::Update, &m).unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"ttl": 60, "pk": 12, "ip_type": "6"})
        );
    }

    #[test]
    fn test_prepare_paths_and_methods() {
        let registry = Registry::dns();
        let transport = NullTransport;
        let config = ClientConfig::default();
        let dispatcher = Dispatcher::new(&registry, &transport, &config);
        let mx = registry.get("MX").unwrap();

        let m = action_matches(&registry, &["MX", "delete", "--pk", "5"]);
        let request = dispatcher.prepare(mx, Action::Delete, &m).unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/api/v1_dns/mx/5/");
        assert_eq!(request.query, vec![("format".to_string(), "json".to_string())]);
        assert!(request.body.is_none());

        let m = action_matches(&registry, &["MX", "update", "--pk", "5", "--priority", "20"]);
        let request = dispatcher.prepare(mx, Action::Update, &m).unwrap();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.path, "/api/v1_dns/mx/5/");
        assert_eq!(
            request.body.map(Value::Object),
            Some(json!({"priority": 20, "pk": 5}))
        );
    }

    #[test]
    fn test_resolve_unknown_action_name() {
        let registry = Registry::dns();
        let transport = NullTransport;
        let config = ClientConfig::default();
        let dispatcher = Dispatcher::new(&registry, &transport, &config);

        let matches = Command::new("invdns")
            .subcommand(Command::new("TXT").subcommand(Command::new("purge")))
            .try_get_matches_from(["invdns", "TXT", "purge"])
            .unwrap();
        assert!(matches!(
            dispatcher.resolve(&matches),
            Err(Error::Validation(_))
        ));
    }
}
