use crate::cli::{CallArgs, FindArgs, RenderAction, RenderArgs, TablesArgs};
use crate::config::ProjectConfig;
use crate::output::{PlanOutput, print_json};
use tablerest::{Action, Lookup, QueryParams, Request};

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let project = ProjectConfig::load(args.config.clone())?;
    project.ensure_alias(&args.alias)?;
    let planner = project.planner()?;

    let mut request = Request::new(&args.alias, args.resource.as_deref(), action(&args))
        .with_params(query_params(&args.params));
    if let Some(primary_key) = &args.primary_key {
        request = request.with_primary_key(primary_key.as_str());
    }
    let plan = planner.plan(&request)?;

    print_json(&PlanOutput::new(&args.alias, args.resource.as_deref(), &plan))
}

pub fn run_find(args: FindArgs) -> anyhow::Result<()> {
    let project = ProjectConfig::load(args.config.clone())?;
    project.ensure_alias(&args.alias)?;
    let planner = project.planner()?;

    let action = Action::Find {
        finder: args.finder.clone(),
        args: args.args.clone(),
    };
    let mut request = Request::new(&args.alias, Some(args.resource.as_str()), action)
        .with_params(query_params(&args.params));
    if let Some(primary_key) = &args.primary_key {
        request = request.with_primary_key(primary_key.as_str());
    }
    let plan = planner.plan(&request)?;

    print_json(&PlanOutput::new(&args.alias, Some(args.resource.as_str()), &plan))
}

pub fn run_call(args: CallArgs) -> anyhow::Result<()> {
    let project = ProjectConfig::load(args.config.clone())?;
    project.ensure_alias(&args.alias)?;
    let planner = project.planner()?;

    let action = Action::Call {
        procedure: args.procedure.clone(),
        args: args.args.clone(),
    };
    let plan = planner.plan(&Request::new(&args.alias, None, action))?;
    print_json(&PlanOutput::new(&args.alias, None, &plan))
}

pub fn run_tables(args: TablesArgs) -> anyhow::Result<()> {
    let project = ProjectConfig::load(args.config.clone())?;
    project.ensure_alias(&args.alias)?;
    let planner = project.planner()?;

    let plan = planner.plan(&Request::new(&args.alias, None, Action::Meta))?;
    print_json(&PlanOutput::new(&args.alias, None, &plan))
}

fn action(args: &RenderArgs) -> Action {
    let lookup = match (&args.id, &args.by) {
        (Some(id), _) => Some(Lookup::by_id(id.as_str())),
        (None, Some((column, value))) => Some(Lookup::by_column(column.as_str(), value.as_str())),
        (None, None) => None,
    };
    // Mutations pass a missing id through so the core reports it.
    let id = args.id.clone().unwrap_or_default();

    match args.action {
        RenderAction::Read => Action::Read { by: lookup },
        RenderAction::Count => Action::Count { by: lookup },
        RenderAction::Meta => Action::Meta,
        RenderAction::Insert => Action::Insert {
            values: args.set.clone(),
        },
        RenderAction::Update => Action::Update {
            id,
            values: args.set.clone(),
        },
        RenderAction::Delete => Action::Delete { id },
    }
}

fn query_params(pairs: &[(String, String)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render_args(action: RenderAction) -> RenderArgs {
        RenderArgs {
            config: PathBuf::from("tablerest.toml"),
            alias: "demo".into(),
            resource: Some("users".into()),
            action,
            id: None,
            by: None,
            set: vec![("name".into(), "alice".into())],
            params: vec![],
            primary_key: None,
        }
    }

    #[test]
    fn by_column_becomes_lookup() {
        let mut args = render_args(RenderAction::Count);
        args.by = Some(("email".into(), "a@example.com".into()));
        assert_eq!(
            action(&args),
            Action::Count {
                by: Some(Lookup::by_column("email", "a@example.com"))
            }
        );
    }

    #[test]
    fn id_feeds_reads_and_mutations() {
        let mut args = render_args(RenderAction::Read);
        args.id = Some("7".into());
        assert_eq!(
            action(&args),
            Action::Read {
                by: Some(Lookup::by_id("7"))
            }
        );

        args.action = RenderAction::Update;
        assert_eq!(
            action(&args),
            Action::Update {
                id: "7".into(),
                values: vec![("name".into(), "alice".into())],
            }
        );
    }

    #[test]
    fn missing_id_is_left_to_the_planner() {
        let args = render_args(RenderAction::Delete);
        assert_eq!(action(&args), Action::Delete { id: String::new() });
    }

    #[test]
    fn repeated_params_keep_first_value() {
        let params = query_params(&[
            ("limit".into(), "5".into()),
            ("limit".into(), "9".into()),
        ]);
        assert_eq!(params.first("limit"), Some("5"));
        assert_eq!(params.get_all("limit").len(), 2);
    }
}
