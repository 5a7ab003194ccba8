use serde::Serialize;
use tablerest::{LimitParam, Plan};

/// JSON shape printed for every planned request.
#[derive(Debug, Serialize)]
pub struct PlanOutput<'a> {
    pub alias: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<&'a str>,
    pub dialect: String,
    pub sql: &'a str,
    pub params: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<LimitParam>,
}

impl<'a> PlanOutput<'a> {
    pub fn new(alias: &'a str, resource: Option<&'a str>, plan: &'a Plan) -> Self {
        Self {
            alias,
            resource,
            dialect: plan.dialect.to_string(),
            sql: &plan.statement.sql,
            params: &plan.statement.params,
            limit: plan.limit,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("failed to encode output: {e}"))?;
    println!("{json}");
    Ok(())
}
