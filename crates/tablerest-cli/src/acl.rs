use crate::cli::AclArgs;
use crate::config::ProjectConfig;
use crate::output::print_json;
use serde::Serialize;
use tablerest::{AccessControl, Permission, PermissionSet};

#[derive(Debug, Serialize)]
struct AclOutput<'a> {
    alias: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<&'a str>,
    /// Rule string form, e.g. `READ, META`.
    effective: String,
    allowed: Vec<&'static str>,
    denied: Vec<&'static str>,
}

impl<'a> AclOutput<'a> {
    fn new(alias: &'a str, resource: Option<&'a str>, set: PermissionSet) -> Self {
        let (allowed, denied): (Vec<Permission>, Vec<Permission>) =
            Permission::ALL.into_iter().partition(|p| set.contains(*p));
        Self {
            alias,
            resource,
            effective: set.to_string(),
            allowed: allowed.into_iter().map(Permission::name).collect(),
            denied: denied.into_iter().map(Permission::name).collect(),
        }
    }
}

pub fn run(args: AclArgs) -> anyhow::Result<()> {
    let project = ProjectConfig::load(args.config.clone())?;
    project.ensure_alias(&args.alias)?;

    let acl = AccessControl::from_config(&project.config)?;
    let set = acl.effective(&args.alias, args.resource.as_deref());

    print_json(&AclOutput::new(&args.alias, args.resource.as_deref(), set))
}
