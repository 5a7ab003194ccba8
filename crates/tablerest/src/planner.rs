//! Request planning: access check, parameter parsing, statement building and
//! rendering for one REST request.
//!
//! The planner owns nothing per request. It is built once from a [`Config`] and
//! can be shared across threads.

use crate::acl::{AccessControl, AccessControlHandle, Permission};
use crate::config::{AliasConfig, Config};
use crate::dialect::{Dialect, DialectKind, Statement, dialect_for};
use crate::error::{RestError, RestResult};
use crate::finder::DynamicFinder;
use crate::params::{LimitParam, OrderParam, QueryParams};
use crate::statement::{Call, Delete, Insert, Select, SelectCondition, Table, Update};
use std::collections::HashMap;

/// Which row(s) a read or count targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// `None` means the table's primary key.
    pub column: Option<String>,
    pub value: String,
}

impl Lookup {
    pub fn by_id(value: impl Into<String>) -> Self {
        Self {
            column: None,
            value: value.into(),
        }
    }

    pub fn by_column(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            value: value.into(),
        }
    }
}

/// What the request wants to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List the alias's tables, or describe one resource.
    Meta,
    /// Read rows, optionally restricted by one `column = value` lookup.
    Read { by: Option<Lookup> },
    /// Run a dynamic finder such as `findAllByNameAndAge`.
    Find { finder: String, args: Vec<String> },
    /// Count the rows a read would page through.
    Count { by: Option<Lookup> },
    Insert { values: Vec<(String, String)> },
    Update { id: String, values: Vec<(String, String)> },
    Delete { id: String },
    /// Call a stored procedure of the alias with positional arguments.
    Call { procedure: String, args: Vec<String> },
}

impl Action {
    pub fn permission(&self) -> Permission {
        match self {
            Action::Meta => Permission::Meta,
            Action::Read { .. } | Action::Find { .. } | Action::Count { .. } => Permission::Read,
            Action::Insert { .. } => Permission::Insert,
            Action::Update { .. } => Permission::Update,
            Action::Delete { .. } => Permission::Delete,
            Action::Call { .. } => Permission::Exec,
        }
    }
}

/// An inbound request, already split into primitives by the REST layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub alias: String,
    pub resource: Option<String>,
    pub action: Action,
    pub params: QueryParams,
    /// Overrides the configured primary key of the resource.
    pub primary_key: Option<String>,
}

impl Request {
    pub fn new(alias: impl Into<String>, resource: Option<&str>, action: Action) -> Self {
        Self {
            alias: alias.into(),
            resource: resource.map(str::to_string),
            action,
            params: QueryParams::new(),
            primary_key: None,
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }
}

/// The rendered outcome of planning a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub dialect: DialectKind,
    pub statement: Statement,
    /// Paging applied to a read; feed it to
    /// [`Pagination::of`](crate::Pagination::of) once the total is known.
    pub limit: Option<LimitParam>,
}

#[derive(Debug)]
struct AliasEntry {
    dialect: &'static dyn Dialect,
    config: AliasConfig,
}

/// Turns [`Request`]s into [`Plan`]s for the configured aliases.
#[derive(Debug)]
pub struct Planner {
    aliases: HashMap<String, AliasEntry>,
    access: AccessControlHandle,
    page_size: u32,
}

impl Planner {
    pub fn new(config: &Config) -> RestResult<Self> {
        config.validate()?;
        let access = AccessControl::from_config(config)?;

        let mut aliases = HashMap::with_capacity(config.aliases.len());
        for (name, alias) in &config.aliases {
            let dialect = dialect_for(alias.dialect_kind()?);
            aliases.insert(
                name.clone(),
                AliasEntry {
                    dialect,
                    config: alias.clone(),
                },
            );
        }

        Ok(Self {
            aliases,
            access: access.into(),
            page_size: config.page_size,
        })
    }

    /// The live access-control table; replace it to reload rules.
    pub fn access_control(&self) -> &AccessControlHandle {
        &self.access
    }

    pub fn dialect(&self, alias: &str) -> RestResult<&'static dyn Dialect> {
        self.entry(alias).map(|e| e.dialect)
    }

    pub fn plan(&self, request: &Request) -> RestResult<Plan> {
        let entry = self.entry(&request.alias)?;
        self.authorize(request)?;

        let resource = request.resource.as_deref();
        let (statement, limit) = match (resource, &request.action) {
            (None, Action::Meta) => (Statement::raw(entry.dialect.list_tables_statement()), None),
            (None, Action::Call { procedure, args }) => {
                let call = Call::new(procedure.as_str(), args.iter().map(String::as_str))?;
                (entry.dialect.render_call(&call)?, None)
            }
            (None, _) => {
                return Err(RestError::invalid_request(
                    "A resource is required for this operation",
                ));
            }
            (Some(resource), _) => self
                .plan_resource(entry, resource, request)
                .map_err(|e| e.with_resource(resource))?,
        };

        Ok(Plan {
            dialect: entry.dialect.kind(),
            statement,
            limit,
        })
    }

    fn entry(&self, alias: &str) -> RestResult<&AliasEntry> {
        self.aliases
            .get(alias)
            .ok_or_else(|| RestError::UnknownAlias(alias.to_string()))
    }

    fn authorize(&self, request: &Request) -> RestResult<()> {
        let permission = request.action.permission();
        let acl = self.access.snapshot();
        let allowed = match request.resource.as_deref() {
            Some(resource) => acl.validate_resource(&request.alias, resource, permission),
            None => acl.validate(&request.alias, permission),
        };
        if allowed {
            Ok(())
        } else {
            Err(RestError::AccessDenied {
                alias: request.alias.clone(),
                resource: request.resource.clone(),
                permission,
            })
        }
    }

    fn plan_resource(
        &self,
        entry: &AliasEntry,
        resource: &str,
        request: &Request,
    ) -> RestResult<(Statement, Option<LimitParam>)> {
        let dialect = entry.dialect;
        let params = &request.params;
        let mut table = entry.config.table(resource)?;
        if let Some(primary_key) = request.primary_key.as_deref() {
            table = table.with_primary_key(primary_key)?;
        }

        match &request.action {
            Action::Meta => {
                let limit = LimitParam::new(1, 0);
                let select = Select::new(table).limit(limit);
                Ok((dialect.render_select(&select)?, Some(limit)))
            }
            Action::Read { by } => {
                let limit = LimitParam::parse_with_page_size(params, self.page_size);
                let mut select =
                    filtered(Select::new(table.clone()), &table, by.as_ref())?.limit(limit);
                if let Some(order) = requested_order(params, &table)? {
                    select = select.order(order);
                }
                Ok((dialect.render_select(&select)?, Some(limit)))
            }
            Action::Count { by } => {
                let select = filtered(Select::new(table.clone()), &table, by.as_ref())?;
                Ok((dialect.render_count(&select)?, None))
            }
            Action::Find { finder, args } => {
                let limit = LimitParam::parse_with_page_size(params, self.page_size);
                let order = OrderParam::parse(params, table.primary_key())?;
                let finder = DynamicFinder::parse(table, finder, args.as_slice())?;
                Ok((dialect.render_finder(&finder, &limit, &order)?, Some(limit)))
            }
            Action::Insert { values } => {
                let insert = Insert::from_pairs(table, values.iter().map(pair))?;
                Ok((dialect.render_insert(&insert)?, None))
            }
            Action::Update { id, values } => {
                let update = Update::from_pairs(table, id.as_str(), values.iter().map(pair))?;
                Ok((dialect.render_update(&update)?, None))
            }
            Action::Delete { id } => {
                let delete = Delete::new(table, id.as_str());
                Ok((dialect.render_delete(&delete)?, None))
            }
            Action::Call { .. } => Err(RestError::invalid_request(
                "A stored procedure call does not take a resource",
            )),
        }
    }
}

fn pair((column, value): &(String, String)) -> (&str, &str) {
    (column.as_str(), value.as_str())
}

fn filtered(select: Select, table: &Table, by: Option<&Lookup>) -> RestResult<Select> {
    let Some(lookup) = by else {
        return Ok(select);
    };
    if lookup.value.is_empty() {
        return Err(RestError::invalid_request("Invalid argument"));
    }
    let condition = match lookup.column.as_deref() {
        Some(column) => SelectCondition::eq(column, lookup.value.as_str())?,
        None => SelectCondition::eq(table.primary_key(), lookup.value.as_str())?,
    };
    Ok(select.and(condition))
}

/// Ordering is only applied when the caller asked for it.
fn requested_order(params: &QueryParams, table: &Table) -> RestResult<Option<OrderParam>> {
    if params.first("sort").is_none() && params.first("dir").is_none() {
        return Ok(None);
    }
    OrderParam::parse(params, table.primary_key()).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[aliases.demo]
driver = "postgresql"
acl = "ALL"

[aliases.demo.resources]
audit = "READ"

[aliases.demo.primary_keys]
cars = "cid"

[aliases.reports]
driver = "mysql"
acl = "READ, META"
"#;

    fn planner() -> Planner {
        Planner::new(&Config::from_toml_str(CONFIG).unwrap()).unwrap()
    }

    #[test]
    fn meta_without_resource_lists_tables() {
        let plan = planner()
            .plan(&Request::new("demo", None, Action::Meta))
            .unwrap();
        assert_eq!(
            plan.statement.sql,
            "SELECT * FROM information_schema.tables WHERE table_schema = 'public'"
        );
        assert_eq!(plan.limit, None);
    }

    #[test]
    fn meta_with_resource_selects_one_row() {
        let plan = planner()
            .plan(&Request::new("demo", Some("cars"), Action::Meta))
            .unwrap();
        assert_eq!(plan.statement.sql, "SELECT t.* FROM cars t LIMIT 1 OFFSET 0");
    }

    #[test]
    fn read_by_id_uses_configured_primary_key() {
        let plan = planner()
            .plan(&Request::new(
                "demo",
                Some("cars"),
                Action::Read {
                    by: Some(Lookup::by_id("9")),
                },
            ))
            .unwrap();
        assert_eq!(
            plan.statement.sql,
            "SELECT t.* FROM cars t WHERE t.cid = ? LIMIT 25 OFFSET 0"
        );
        assert_eq!(plan.statement.params, ["9"]);
    }

    #[test]
    fn empty_lookup_value_is_rejected() {
        let err = planner()
            .plan(&Request::new(
                "demo",
                Some("cars"),
                Action::Read {
                    by: Some(Lookup::by_column("model", "")),
                },
            ))
            .unwrap_err();
        assert_eq!(err, RestError::invalid_request_on("cars", "Invalid argument"));
    }

    #[test]
    fn resource_rule_denies_write() {
        let err = planner()
            .plan(&Request::new(
                "demo",
                Some("audit"),
                Action::Delete { id: "1".into() },
            ))
            .unwrap_err();
        assert!(err.is_access_denied());
    }

    #[test]
    fn unknown_alias() {
        let err = planner()
            .plan(&Request::new("nope", None, Action::Meta))
            .unwrap_err();
        assert_eq!(err, RestError::UnknownAlias("nope".into()));
    }

    #[test]
    fn non_meta_actions_need_a_resource() {
        let err = planner()
            .plan(&Request::new("demo", None, Action::Read { by: None }))
            .unwrap_err();
        assert!(err.is_invalid_request());
    }

    fn call(procedure: &str, args: &[&str]) -> Action {
        Action::Call {
            procedure: procedure.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn call_renders_escape_with_bound_arguments() {
        let plan = planner()
            .plan(&Request::new("demo", None, call("close_period", &["2024", "Q4"])))
            .unwrap();
        assert_eq!(plan.statement.sql, "{CALL close_period(?,?)}");
        assert_eq!(plan.statement.params, ["2024", "Q4"]);
        assert_eq!(plan.limit, None);
    }

    #[test]
    fn call_requires_exec() {
        let err = planner()
            .plan(&Request::new("reports", None, call("close_period", &[])))
            .unwrap_err();
        assert_eq!(
            err,
            RestError::AccessDenied {
                alias: "reports".into(),
                resource: None,
                permission: Permission::Exec,
            }
        );
    }

    #[test]
    fn call_rejects_bad_procedure_name() {
        let err = planner()
            .plan(&Request::new("demo", None, call("x; DROP TABLE cars", &[])))
            .unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn call_does_not_take_a_resource() {
        let err = planner()
            .plan(&Request::new("demo", Some("cars"), call("close_period", &[])))
            .unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn request_primary_key_overrides_configured_one() {
        let by_id = Action::Read {
            by: Some(Lookup::by_id("7")),
        };
        let plan = planner()
            .plan(&Request::new("demo", Some("cars"), by_id.clone()).with_primary_key("vin"))
            .unwrap();
        assert_eq!(
            plan.statement.sql,
            "SELECT t.* FROM cars t WHERE t.vin = ? LIMIT 25 OFFSET 0"
        );

        let plan = planner()
            .plan(&Request::new("demo", Some("users"), by_id).with_primary_key("uid"))
            .unwrap();
        assert_eq!(
            plan.statement.sql,
            "SELECT t.* FROM users t WHERE t.uid = ? LIMIT 25 OFFSET 0"
        );
    }

    #[test]
    fn request_primary_key_keys_update_and_delete() {
        let update = Action::Update {
            id: "7".into(),
            values: vec![("model".into(), "T".into())],
        };
        let plan = planner()
            .plan(&Request::new("demo", Some("cars"), update).with_primary_key("vin"))
            .unwrap();
        assert_eq!(plan.statement.sql, "UPDATE cars SET model=? WHERE vin=?");
        assert_eq!(plan.statement.params, ["T", "7"]);

        let delete = Action::Delete { id: "7".into() };
        let plan = planner()
            .plan(&Request::new("demo", Some("cars"), delete).with_primary_key("vin"))
            .unwrap();
        assert_eq!(plan.statement.sql, "DELETE FROM cars WHERE vin=?");
    }

    #[test]
    fn request_primary_key_must_be_an_identifier() {
        let err = planner()
            .plan(
                &Request::new("demo", Some("cars"), Action::Read { by: None })
                    .with_primary_key("id; --"),
            )
            .unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn action_permissions() {
        assert_eq!(Action::Meta.permission(), Permission::Meta);
        assert_eq!(Action::Count { by: None }.permission(), Permission::Read);
        assert_eq!(
            Action::Find {
                finder: "findByName".into(),
                args: vec![]
            }
            .permission(),
            Permission::Read
        );
        assert_eq!(
            Action::Insert { values: vec![] }.permission(),
            Permission::Insert
        );
        assert_eq!(call("p", &[]).permission(), Permission::Exec);
    }
}
