//! Record descriptor table
//!
//! Every supported DNS record type is described by a plain
//! [`RecordDescriptor`]: its type tag, the REST resource it lives under,
//! the ordered argument specs of a create, and how its `ip_type` is
//! computed. The [`Registry`] is built once at startup and never
//! mutated; the CLI builder and the dispatcher borrow it.
//!
//! ## Usage
//!
//! ```rust
//! use invdns_core::{Action, Registry};
//!
//! let registry = Registry::dns();
//! let mx = registry.get("mx").unwrap();
//!
//! assert_eq!(mx.resource_name, "mx");
//! assert_eq!(mx.args(Action::Delete).len(), 1);
//! ```

use crate::action::Action;
use crate::error::{Error, Result};
use crate::fields::{ArgSpec, IpFamily, Payload};
use serde_json::Value;

/// How a record type fills in `ip_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpTypeRule {
    /// No `ip_type` field
    None,
    /// Always this family (A, AAAA)
    Fixed(IpFamily),
    /// Inferred from the `ip_str` already in the payload (PTR)
    Inferred,
}

/// Static description of one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// Type tag used as the CLI subcommand (e.g. "AAAA")
    pub dtype: &'static str,

    /// REST resource name (e.g. "addressrecord")
    pub resource_name: &'static str,

    /// Ordered specs of a create payload
    pub create_args: Vec<ArgSpec>,

    /// `ip_type` computation, applied after the fold
    pub ip_type: IpTypeRule,
}

impl RecordDescriptor {
    /// Ordered argument specs for an action
    ///
    /// Update is the create list plus the primary key; delete and
    /// detail only take the primary key.
    pub fn args(&self, action: Action) -> Vec<ArgSpec> {
        match action {
            Action::Create => self.create_args.clone(),
            Action::Update => {
                let mut args = self.create_args.clone();
                args.push(ArgSpec::Pk);
                args
            }
            Action::Delete | Action::Detail => vec![ArgSpec::Pk],
        }
    }

    /// Set the computed `ip_type` on a folded payload
    ///
    /// Runs after every extractor so user input cannot override it.
    pub fn apply_ip_type(&self, payload: &mut Payload) {
        let family = match self.ip_type {
            IpTypeRule::None => return,
            IpTypeRule::Fixed(family) => family,
            IpTypeRule::Inferred => {
                IpFamily::infer(payload.get("ip_str").and_then(Value::as_str).unwrap_or(""))
            }
        };
        payload.insert("ip_type".to_string(), Value::from(family.ip_type()));
    }

    /// Example command-line tokens for a create of this record type
    pub fn example_args(&self) -> Vec<String> {
        self.create_args.iter().flat_map(ArgSpec::example).collect()
    }
}

fn common_tail() -> [ArgSpec; 2] {
    [ArgSpec::Description, ArgSpec::Comment]
}

fn address(dtype: &'static str, family: IpFamily) -> RecordDescriptor {
    let mut create_args = vec![
        ArgSpec::Fqdn { service: false },
        ArgSpec::Ttl,
        ArgSpec::Ip(family),
        ArgSpec::Views,
    ];
    create_args.extend(common_tail());

    RecordDescriptor {
        dtype,
        resource_name: "addressrecord",
        create_args,
        ip_type: IpTypeRule::Fixed(family),
    }
}

fn ptr() -> RecordDescriptor {
    let mut create_args = vec![
        ArgSpec::Ttl,
        ArgSpec::Ip(IpFamily::V4),
        ArgSpec::Views,
        ArgSpec::Target("name"),
    ];
    create_args.extend(common_tail());

    RecordDescriptor {
        dtype: "PTR",
        resource_name: "ptr",
        create_args,
        ip_type: IpTypeRule::Inferred,
    }
}

fn named(
    dtype: &'static str,
    resource_name: &'static str,
    middle: &[ArgSpec],
) -> RecordDescriptor {
    let service = dtype == "SRV";
    let mut create_args = vec![ArgSpec::Fqdn { service }, ArgSpec::Ttl];
    create_args.extend_from_slice(middle);
    create_args.push(ArgSpec::Views);
    create_args.extend(common_tail());

    RecordDescriptor {
        dtype,
        resource_name,
        create_args,
        ip_type: IpTypeRule::None,
    }
}

/// Immutable table of record descriptors
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: Vec<RecordDescriptor>,
}

impl Registry {
    /// Build a registry from explicit descriptors
    pub fn new(descriptors: Vec<RecordDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The DNS record types served by the inventory API
    pub fn dns() -> Self {
        Self::new(vec![
            address("A", IpFamily::V4),
            address("AAAA", IpFamily::V6),
            named("CNAME", "cname", &[ArgSpec::Target("target")]),
            named("MX", "mx", &[ArgSpec::Priority, ArgSpec::Target("server")]),
            ptr(),
            named(
                "SRV",
                "srv",
                &[
                    ArgSpec::Port,
                    ArgSpec::Weight,
                    ArgSpec::Priority,
                    ArgSpec::Target("target"),
                ],
            ),
            named("TXT", "txt", &[ArgSpec::Target("txt_data")]),
        ])
    }

    /// Look up a descriptor by type tag, ignoring case
    pub fn get(&self, dtype: &str) -> Option<&RecordDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.dtype.eq_ignore_ascii_case(dtype))
    }

    /// Same as [`Registry::get`], failing with `UnknownRecordType`
    pub fn lookup(&self, dtype: &str) -> Result<&RecordDescriptor> {
        self.get(dtype)
            .ok_or_else(|| Error::unknown_record_type(dtype))
    }

    /// All descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RecordDescriptor> {
        self.descriptors.iter()
    }

    /// Registered type tags
    pub fn dtypes(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.dtype).collect()
    }
}
