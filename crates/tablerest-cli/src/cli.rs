use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "tablerest.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Find,
    Call,
    Acl,
    Tables,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Find(FindArgs),
    Call(CallArgs),
    Acl(AclArgs),
    Tables(TablesArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAction {
    Read,
    Count,
    Meta,
    Insert,
    Update,
    Delete,
}

impl RenderAction {
    fn parse(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "read" => Self::Read,
            "count" => Self::Count,
            "meta" => Self::Meta,
            "insert" => Self::Insert,
            "update" => Self::Update,
            "delete" => Self::Delete,
            other => anyhow::bail!("unknown action: {other}"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub config: PathBuf,
    pub alias: String,
    pub resource: Option<String>,
    pub action: RenderAction,
    pub id: Option<String>,
    pub by: Option<(String, String)>,
    pub set: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub primary_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FindArgs {
    pub config: PathBuf,
    pub alias: String,
    pub resource: String,
    pub finder: String,
    pub args: Vec<String>,
    pub params: Vec<(String, String)>,
    pub primary_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CallArgs {
    pub config: PathBuf,
    pub alias: String,
    pub procedure: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AclArgs {
    pub config: PathBuf,
    pub alias: String,
    pub resource: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TablesArgs {
    pub config: PathBuf,
    pub alias: String,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    let rest = it.map(|s| s.as_str());
    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(rest),
        "find" => parse_find(rest),
        "call" => parse_call(rest),
        "acl" => parse_acl(rest),
        "tables" => parse_tables(rest),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Default)]
struct Common {
    config: Option<PathBuf>,
    alias: Option<String>,
    resource: Option<String>,
    params: Vec<(String, String)>,
}

impl Common {
    /// Consume `token` (and its value) if it is a shared option.
    fn accept<'a>(
        &mut self,
        token: &'a str,
        it: &mut impl Iterator<Item = &'a str>,
    ) -> anyhow::Result<bool> {
        if let Some(v) = option_value("--config", token, it)? {
            self.config = Some(PathBuf::from(v));
        } else if let Some(v) = option_value("--alias", token, it)? {
            self.alias = Some(v.to_string());
        } else if let Some(v) = option_value("--resource", token, it)? {
            self.resource = Some(v.to_string());
        } else if let Some(v) = option_value("--param", token, it)? {
            self.params.push(parse_pair("--param", v)?);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    fn config(&mut self) -> PathBuf {
        self.config
            .take()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
    }

    fn alias(&mut self) -> anyhow::Result<String> {
        let Some(alias) = self.alias.take() else {
            anyhow::bail!("--alias is required");
        };
        Ok(alias)
    }
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut common = Common::default();
    let mut action: Option<RenderAction> = None;
    let mut id: Option<String> = None;
    let mut by: Option<(String, String)> = None;
    let mut set = Vec::new();
    let mut primary_key: Option<String> = None;

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Render));
        }
        if common.accept(token, &mut it)? {
            continue;
        }
        if let Some(v) = option_value("--id", token, &mut it)? {
            id = Some(v.to_string());
        } else if let Some(v) = option_value("--by", token, &mut it)? {
            by = Some(parse_pair("--by", v)?);
        } else if let Some(v) = option_value("--set", token, &mut it)? {
            set.push(parse_pair("--set", v)?);
        } else if let Some(v) = option_value("--primary-key", token, &mut it)? {
            primary_key = Some(v.to_string());
        } else if token.starts_with("--") {
            anyhow::bail!("unknown argument: {token}");
        } else if action.is_none() {
            action = Some(RenderAction::parse(token)?);
        } else {
            anyhow::bail!("unexpected argument: {token}");
        }
    }

    let Some(action) = action else {
        anyhow::bail!("render requires an action (read, count, meta, insert, update, delete)");
    };
    if id.is_some() && by.is_some() {
        anyhow::bail!("--id and --by cannot be combined");
    }

    Ok(Command::Render(RenderArgs {
        config: common.config(),
        alias: common.alias()?,
        resource: common.resource.take(),
        action,
        id,
        by,
        set,
        params: common.params,
        primary_key,
    }))
}

fn parse_find<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut common = Common::default();
    let mut finder: Option<String> = None;
    let mut args = Vec::new();
    let mut primary_key: Option<String> = None;

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Find));
        }
        if common.accept(token, &mut it)? {
            continue;
        }
        if let Some(v) = option_value("--primary-key", token, &mut it)? {
            primary_key = Some(v.to_string());
            continue;
        }
        if token.starts_with("--") {
            anyhow::bail!("unknown argument: {token}");
        }
        match finder {
            None => finder = Some(token.to_string()),
            Some(_) => args.push(token.to_string()),
        }
    }

    let Some(finder) = finder else {
        anyhow::bail!("find requires a finder name, e.g. findAllByName");
    };
    let Some(resource) = common.resource.take() else {
        anyhow::bail!("--resource is required");
    };

    Ok(Command::Find(FindArgs {
        config: common.config(),
        alias: common.alias()?,
        resource,
        finder,
        args,
        params: common.params,
        primary_key,
    }))
}

fn parse_call<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut common = Common::default();
    let mut procedure: Option<String> = None;
    let mut args = Vec::new();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Call));
        }
        if common.accept(token, &mut it)? {
            continue;
        }
        if token.starts_with("--") {
            anyhow::bail!("unknown argument: {token}");
        }
        match procedure {
            None => procedure = Some(token.to_string()),
            Some(_) => args.push(token.to_string()),
        }
    }

    let Some(procedure) = procedure else {
        anyhow::bail!("call requires a procedure name");
    };
    if common.resource.is_some() {
        anyhow::bail!("call does not take --resource");
    }

    Ok(Command::Call(CallArgs {
        config: common.config(),
        alias: common.alias()?,
        procedure,
        args,
    }))
}

fn parse_acl<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut common = Common::default();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Acl));
        }
        if !common.accept(token, &mut it)? {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    Ok(Command::Acl(AclArgs {
        config: common.config(),
        alias: common.alias()?,
        resource: common.resource.take(),
    }))
}

fn parse_tables<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut common = Common::default();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Tables));
        }
        if !common.accept(token, &mut it)? {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    if common.resource.is_some() {
        anyhow::bail!("tables does not take --resource");
    }

    Ok(Command::Tables(TablesArgs {
        config: common.config(),
        alias: common.alias()?,
    }))
}

/// Match `--name value` or `--name=value`.
fn option_value<'a>(
    name: &str,
    token: &'a str,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<Option<&'a str>> {
    if token == name {
        let Some(v) = it.next() else {
            anyhow::bail!("{name} requires a value");
        };
        return Ok(Some(v));
    }
    Ok(token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('=')))
}

fn parse_pair(flag: &str, v: &str) -> anyhow::Result<(String, String)> {
    match v.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => anyhow::bail!("{flag} expects KEY=VALUE, got: {v}"),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
tablerest - render REST-over-table requests into dialect SQL

USAGE:
  tablerest <COMMAND> [OPTIONS]

COMMANDS:
  render        Plan a read/count/meta/insert/update/delete request
  find          Plan a dynamic finder such as findAllByNameAndAge
  call          Plan a stored-procedure call
  acl           Show the effective permissions of an alias or resource
  tables        Print the list-tables statement of an alias

Every command prints JSON on stdout. Set RUST_LOG=debug to see rendered SQL
events on stderr.

Run `tablerest <command> --help` for more."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  tablerest render <ACTION> --alias <NAME> [--resource <NAME>] [OPTIONS]

ACTIONS:
  read | count | meta | insert | update | delete

OPTIONS:
  --config <FILE>       Config file path (default: tablerest.toml)
  --alias <NAME>        Configured alias
  --resource <NAME>     Table behind the request
  --id <VALUE>          Primary key value (read, count, update, delete)
  --by <COL=VALUE>      Read or count rows where COL = VALUE
  --set <COL=VALUE>     Column value for insert/update (repeatable)
  --primary-key <COL>   Key column, overriding the configured one
  --param <KEY=VALUE>   Query-string parameter: limit, offset, page, size,
                        sort, dir (repeatable)
  -h, --help            Print help"
            );
        }
        HelpTopic::Find => {
            println!(
                "\
USAGE:
  tablerest find <FINDER> [ARGS]... --alias <NAME> --resource <NAME> [OPTIONS]

OPTIONS:
  --config <FILE>       Config file path (default: tablerest.toml)
  --alias <NAME>        Configured alias
  --resource <NAME>     Table to search
  --primary-key <COL>   Default sort column, overriding the configured key
  --param <KEY=VALUE>   Query-string parameter (repeatable)
  -h, --help            Print help"
            );
        }
        HelpTopic::Call => {
            println!(
                "\
USAGE:
  tablerest call <PROCEDURE> [ARGS]... --alias <NAME>

Requires EXEC on the alias.

OPTIONS:
  --config <FILE>       Config file path (default: tablerest.toml)
  --alias <NAME>        Configured alias
  -h, --help            Print help"
            );
        }
        HelpTopic::Acl => {
            println!(
                "\
USAGE:
  tablerest acl --alias <NAME> [--resource <NAME>]

OPTIONS:
  --config <FILE>       Config file path (default: tablerest.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Tables => {
            println!(
                "\
USAGE:
  tablerest tables --alias <NAME>

OPTIONS:
  --config <FILE>       Config file path (default: tablerest.toml)
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("tablerest")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_arguments_prints_help() {
        let cmd = parse_args(&args(&[])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Root)));
    }

    #[test]
    fn parse_render_update() {
        let cmd = parse_args(&args(&[
            "render",
            "update",
            "--config=conf/rest.toml",
            "--alias",
            "demo",
            "--resource",
            "users",
            "--id",
            "7",
            "--set",
            "name=alice",
            "--set=email=a@example.com",
        ]))
        .unwrap();
        let Command::Render(r) = cmd else {
            panic!("expected render");
        };

        assert_eq!(r.config, PathBuf::from("conf/rest.toml"));
        assert_eq!(r.alias, "demo");
        assert_eq!(r.resource.as_deref(), Some("users"));
        assert_eq!(r.action, RenderAction::Update);
        assert_eq!(r.id.as_deref(), Some("7"));
        assert_eq!(
            r.set,
            vec![
                ("name".to_string(), "alice".to_string()),
                ("email".to_string(), "a@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn parse_render_defaults_config() {
        let cmd = parse_args(&args(&[
            "render", "read", "--alias", "demo", "--resource", "users", "--param", "limit=5",
        ]))
        .unwrap();
        let Command::Render(r) = cmd else {
            panic!("expected render");
        };
        assert_eq!(r.config, PathBuf::from("tablerest.toml"));
        assert_eq!(r.params, vec![("limit".to_string(), "5".to_string())]);
    }

    #[test]
    fn parse_find_collects_positional_args() {
        let cmd = parse_args(&args(&[
            "find",
            "findAllByNameAndAgeBetween",
            "alice",
            "--alias",
            "demo",
            "18",
            "--resource=users",
            "65",
        ]))
        .unwrap();
        let Command::Find(f) = cmd else {
            panic!("expected find");
        };
        assert_eq!(f.finder, "findAllByNameAndAgeBetween");
        assert_eq!(f.args, vec!["alice", "18", "65"]);
        assert_eq!(f.resource, "users");
        assert_eq!(f.primary_key, None);
    }

    #[test]
    fn parse_primary_key_override() {
        let cmd = parse_args(&args(&[
            "render", "delete", "--alias", "demo", "--resource", "cars", "--id", "9",
            "--primary-key=vin",
        ]))
        .unwrap();
        let Command::Render(r) = cmd else {
            panic!("expected render");
        };
        assert_eq!(r.primary_key.as_deref(), Some("vin"));
    }

    #[test]
    fn parse_call_collects_arguments() {
        let cmd = parse_args(&args(&[
            "call",
            "refresh_totals",
            "2024",
            "--alias",
            "demo",
            "eu",
        ]))
        .unwrap();
        let Command::Call(c) = cmd else {
            panic!("expected call");
        };
        assert_eq!(c.alias, "demo");
        assert_eq!(c.procedure, "refresh_totals");
        assert_eq!(c.args, vec!["2024", "eu"]);
    }

    #[test]
    fn subcommand_help() {
        let cmd = parse_args(&args(&["acl", "--help"])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Acl)));
        let cmd = parse_args(&args(&["render", "-h"])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Render)));
    }

    #[test]
    fn rejects_bad_arguments() {
        let cases: &[&[&str]] = &[
            &["bogus"],
            &["render", "--alias", "demo"],
            &["render", "upsert", "--alias", "demo"],
            &["render", "read"],
            &["render", "read", "--alias", "demo", "--id", "1", "--by", "a=b"],
            &["render", "insert", "--alias", "demo", "--set", "novalue"],
            &["render", "insert", "--alias", "demo", "--set", "=x"],
            &["find", "--alias", "demo", "--resource", "users"],
            &["find", "findByName", "--alias", "demo"],
            &["call", "--alias", "demo"],
            &["call", "p", "--alias", "demo", "--resource", "users"],
            &["render", "read", "--alias", "demo", "--primary-key"],
            &["acl", "--alias"],
            &["acl", "--alias", "demo", "--verbose"],
            &["tables", "--alias", "demo", "--resource", "users"],
        ];
        for case in cases {
            assert!(parse_args(&args(case)).is_err(), "{case:?}");
        }
    }
}
