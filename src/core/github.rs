//! GitHub project board client backed by the `gh` CLI
//!
//! Queries and mutations go through `gh api graphql`, so credentials are
//! whatever the user's `gh auth` session provides.

use serde::Deserialize;
use std::process::Command;
use tracing::debug;

use crate::core::board::{BoardClient, BoardError, BoardNode, BoardPage, BoardWriter};
use crate::core::config::BoardConfig;
use crate::core::entity::{PushList, PushStatus};

const ITEMS_QUERY: &str = r#"
query($org: String!, $number: Int!, $cursor: String) {
  organization(login: $org) {
    projectV2(number: $number) {
      items(first: 100, after: $cursor) {
        totalCount
        pageInfo {
          endCursor
        }
        nodes {
          id
          status: fieldValueByName(name: "Status") {
            ... on ProjectV2ItemFieldSingleSelectValue {
              name
            }
          }
          list: fieldValueByName(name: "List") {
            ... on ProjectV2ItemFieldSingleSelectValue {
              name
            }
          }
          content {
            ... on PullRequest {
              files(first: 100) {
                nodes {
                  path
                }
              }
              url
              labels(first: 10) {
                nodes {
                  name
                }
              }
              merged
            }
          }
        }
      }
    }
  }
}
"#;

const UPDATE_ITEM_MUTATION: &str = r#"
mutation($project: ID!, $item: ID!, $field: ID!, $option: String!) {
  updateProjectV2ItemFieldValue(
    input: {
      projectId: $project,
      itemId: $item,
      fieldId: $field,
      value: {singleSelectOptionId: $option},
    }
  ) {
    clientMutationId
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    organization: Organization,
}

#[derive(Debug, Deserialize)]
struct Organization {
    #[serde(rename = "projectV2")]
    project: Project,
}

#[derive(Debug, Deserialize)]
struct Project {
    items: Items,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Items {
    total_count: usize,
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<BoardNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
}

/// Parse the JSON body of an items query
pub fn parse_page(body: &str) -> Result<BoardPage, BoardError> {
    let response: GraphqlResponse<ItemsData> = serde_json::from_str(body)?;
    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(BoardError::Graphql(messages.join("; ")));
    }
    let items = response
        .data
        .ok_or_else(|| BoardError::Graphql("response has no data".to_string()))?
        .organization
        .project
        .items;
    Ok(BoardPage {
        nodes: items.nodes,
        end_cursor: items.page_info.end_cursor,
        total_count: items.total_count,
    })
}

fn check_mutation(body: &str) -> Result<(), BoardError> {
    let response: GraphqlResponse<serde_json::Value> = serde_json::from_str(body)?;
    if response.errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        Err(BoardError::Graphql(messages.join("; ")))
    }
}

/// A GraphQL variable passed to `gh api graphql`
#[derive(Debug, Clone)]
pub enum Var {
    /// Sent with `-f` as a string
    Text(&'static str, String),
    /// Sent with `-F` so gh encodes it as a number
    Int(&'static str, u64),
}

impl Var {
    fn to_args(&self) -> [String; 2] {
        match self {
            Var::Text(name, value) => ["-f".to_string(), format!("{}={}", name, value)],
            Var::Int(name, value) => ["-F".to_string(), format!("{}={}", name, value)],
        }
    }
}

/// Board client that shells out to `gh api graphql`
pub struct GhBoardClient {
    config: BoardConfig,
    program: String,
    verbose: bool,
}

impl GhBoardClient {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            program: "gh".to_string(),
            verbose: false,
        }
    }

    /// Use a different executable in place of `gh`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn graphql_args(query: &str, vars: &[Var]) -> Vec<String> {
        let mut args = vec![
            "api".to_string(),
            "graphql".to_string(),
            "-f".to_string(),
            format!("query={}", query),
        ];
        for var in vars {
            args.extend(var.to_args());
        }
        args
    }

    /// Render the command line for display, eliding the query text
    pub fn format_command(&self, vars: &[Var]) -> String {
        let mut parts = vec![self.program.clone(), "api graphql -f query=...".to_string()];
        parts.extend(vars.iter().map(|v| v.to_args().join(" ")));
        parts.join(" ")
    }

    fn run_graphql(&self, query: &str, vars: &[Var]) -> Result<String, BoardError> {
        if self.verbose {
            eprintln!("  {}", self.format_command(vars));
        }
        debug!(command = %self.format_command(vars), "running graphql");

        let output = Command::new(&self.program)
            .args(Self::graphql_args(query, vars))
            .output()
            .map_err(|source| BoardError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            // gh prints GraphQL errors as a JSON body on stdout
            if let Err(e @ BoardError::Graphql(_)) = check_mutation(&stdout) {
                return Err(e);
            }
            return Err(BoardError::Command {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(stdout)
    }

    fn update_field(&self, item_id: &str, field_id: &str, option_id: &str) -> Result<(), BoardError> {
        let vars = [
            Var::Text("project", self.config.project_id()?.to_string()),
            Var::Text("item", item_id.to_string()),
            Var::Text("field", field_id.to_string()),
            Var::Text("option", option_id.to_string()),
        ];
        let body = self.run_graphql(UPDATE_ITEM_MUTATION, &vars)?;
        check_mutation(&body)
    }
}

impl BoardWriter for GhBoardClient {
    fn set_status(&self, id: &str, status: PushStatus) -> Result<(), BoardError> {
        let field = self.config.status_field_id()?;
        let option = self.config.status_option_id(status)?;
        self.update_field(id, field, option)
    }

    fn set_list(&self, id: &str, list: PushList) -> Result<(), BoardError> {
        let field = self.config.list_field_id()?;
        let option = self.config.list_option_id(list)?;
        self.update_field(id, field, option)
    }
}

impl BoardClient for GhBoardClient {
    fn fetch_page(&self, cursor: Option<&str>) -> Result<BoardPage, BoardError> {
        let mut vars = vec![
            Var::Text("org", self.config.organization.clone()),
            Var::Int("number", u64::from(self.config.project_number)),
        ];
        if let Some(cursor) = cursor {
            vars.push(Var::Text("cursor", cursor.to_string()));
        }
        let body = self.run_graphql(ITEMS_QUERY, &vars)?;
        parse_page(&body)
    }
}
