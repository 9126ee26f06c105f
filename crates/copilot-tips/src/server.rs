/// MCP server implementation for the Copilot tips catalog.
///
/// Exposes five tools:
/// - `get_tip_by_id`: Look up a specific tip by its ID
/// - `get_tip_by_topic`: Fuzzy keyword search with relevance ranking
/// - `get_random_tip`: Random tip, optionally filtered
/// - `delete_tip`: Remove a tip from the in-memory catalog
/// - `reset_tips`: Restore the catalog from the source document
///
/// Plus two resources (`tips://categories`, `tips://stats`) and five prompts
/// for guided exploration of the catalog.
use std::sync::Arc;

use rmcp::{
    Json, RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use tips_core::error::CatalogError;
use tips_core::model::Tip;
use tips_core::store::TipStore;

use crate::prompts;
use crate::render;

const CATEGORIES_URI: &str = "tips://categories";
const STATS_URI: &str = "tips://stats";

#[derive(Clone)]
pub struct CopilotTipsServer {
    store: Arc<TipStore>,
    tool_router: ToolRouter<CopilotTipsServer>,
}

impl CopilotTipsServer {
    pub fn new(store: Arc<TipStore>) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    /// Body of `read_resource`, split out like the markdown renderers so the
    /// uri dispatch is testable without an MCP session.
    async fn resource_text(&self, uri: &str) -> Result<String, ErrorData> {
        match uri {
            CATEGORIES_URI => {
                let categories = self.store.categories().await.map_err(resource_error)?;
                Ok(render::categories_markdown(&categories))
            }
            STATS_URI => {
                let stats = self.store.stats().await.map_err(resource_error)?;
                Ok(render::stats_markdown(&stats))
            }
            other => Err(ErrorData::resource_not_found(
                format!("unknown resource: {other}"),
                None,
            )),
        }
    }
}

/// Render a catalog failure as a tool error string, folding in whatever
/// hint the variant carries.
fn describe_failure(error: &CatalogError) -> String {
    match error {
        CatalogError::TipNotFound { available_ids, .. } if !available_ids.is_empty() => {
            format!(
                "{error}. Available IDs include: {}, ...",
                available_ids.join(", ")
            )
        }
        CatalogError::NoMatches { .. } => {
            format!("{error}. Try broader search terms or remove filters.")
        }
        CatalogError::NoTipsForFilter {
            category,
            difficulty,
        } => {
            format!(
                "{error} (category: {}, difficulty: {})",
                category.as_deref().unwrap_or("any"),
                difficulty.as_deref().unwrap_or("any")
            )
        }
        _ => error.to_string(),
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GetTipByIdParams {
    /// The tip's unique ID, e.g. "prompt-001" or "shortcut-002" (case-insensitive)
    tip_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GetTipByTopicParams {
    /// Keyword or phrase to look for in tip titles and descriptions
    search_term: String,
    /// Optional category filter, e.g. "Prompting Techniques"
    category: Option<String>,
    /// Optional difficulty filter: "beginner", "intermediate", or "advanced"
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GetRandomTipParams {
    /// Optional category filter, e.g. "IDE Shortcuts"
    category: Option<String>,
    /// Optional difficulty filter: "beginner", "intermediate", or "advanced"
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DeleteTipParams {
    /// The unique ID of the tip to delete
    tip_id: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct TipDetailResponse {
    tip: Tip,
}

#[derive(Debug, Serialize, JsonSchema)]
struct SearchTipsResponse {
    /// Total number of matches; may exceed the number of tips returned
    count: usize,
    /// Best matches, highest relevance first (at most 10)
    tips: Vec<Tip>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct RandomTipResponse {
    tip: Tip,
    /// Size of the filtered pool the tip was drawn from
    pool_size: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
struct DeleteTipResponse {
    message: String,
    deleted_tip: Tip,
    remaining_count: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ResetTipsResponse {
    message: String,
    tip_count: usize,
}

#[tool_router]
impl CopilotTipsServer {
    #[tool(description = "Retrieve a specific GitHub Copilot tip by its unique ID (e.g. 'prompt-001', 'shortcut-002'). ID matching is case-insensitive.")]
    async fn get_tip_by_id(
        &self,
        Parameters(params): Parameters<GetTipByIdParams>,
    ) -> Result<Json<TipDetailResponse>, String> {
        let tip = self
            .store
            .get_by_id(&params.tip_id)
            .await
            .map_err(|e| describe_failure(&e))?;
        Ok(Json(TipDetailResponse { tip }))
    }

    #[tool(description = "Search Copilot tips by topic or keyword with fuzzy relevance ranking. Optionally filter by category and difficulty. Returns the best matches, highest relevance first.")]
    async fn get_tip_by_topic(
        &self,
        Parameters(params): Parameters<GetTipByTopicParams>,
    ) -> Result<Json<SearchTipsResponse>, String> {
        let matches = self
            .store
            .search(
                &params.search_term,
                params.category.as_deref(),
                params.difficulty.as_deref(),
            )
            .await
            .map_err(|e| describe_failure(&e))?;

        Ok(Json(SearchTipsResponse {
            count: matches.total,
            tips: matches.tips.into_iter().map(|m| m.tip).collect(),
        }))
    }

    #[tool(description = "Get a random GitHub Copilot tip, optionally filtered by category or difficulty. Useful for discovery and tip-of-the-day features.")]
    async fn get_random_tip(
        &self,
        Parameters(params): Parameters<GetRandomTipParams>,
    ) -> Result<Json<RandomTipResponse>, String> {
        let (tip, pool_size) = self
            .store
            .random(params.category.as_deref(), params.difficulty.as_deref())
            .await
            .map_err(|e| describe_failure(&e))?;
        Ok(Json(RandomTipResponse { tip, pool_size }))
    }

    #[tool(description = "Delete a tip by ID from the in-memory catalog. The source document is untouched; reset_tips restores everything.")]
    async fn delete_tip(
        &self,
        Parameters(params): Parameters<DeleteTipParams>,
    ) -> Result<Json<DeleteTipResponse>, String> {
        let (deleted_tip, remaining_count) = self
            .store
            .delete(&params.tip_id)
            .await
            .map_err(|e| describe_failure(&e))?;

        info!(id = %deleted_tip.id, remaining_count, "tip deleted via tool");
        Ok(Json(DeleteTipResponse {
            message: format!("Tip '{}' deleted successfully", params.tip_id),
            deleted_tip,
            remaining_count,
        }))
    }

    #[tool(description = "Reset the tip catalog to its original state, restoring every deleted tip from the source document.")]
    async fn reset_tips(&self) -> Result<Json<ResetTipsResponse>, String> {
        let tip_count = self.store.reset().await.map_err(|e| describe_failure(&e))?;
        info!(tip_count, "catalog reset via tool");
        Ok(Json(ResetTipsResponse {
            message: "Tips database reset to original state".to_string(),
            tip_count,
        }))
    }
}

fn resource_error(error: CatalogError) -> ErrorData {
    ErrorData::internal_error(error.to_string(), None)
}

fn resource_entries() -> Vec<Resource> {
    vec![
        RawResource::new(CATEGORIES_URI, "Tip categories").no_annotation(),
        RawResource::new(STATS_URI, "Tip statistics").no_annotation(),
    ]
}

fn required_argument(arguments: Option<&JsonObject>, name: &str) -> Result<String, ErrorData> {
    optional_argument(arguments, name).ok_or_else(|| {
        ErrorData::invalid_params(format!("missing required argument: {name}"), None)
    })
}

fn optional_argument(arguments: Option<&JsonObject>, name: &str) -> Option<String> {
    arguments
        .and_then(|args| args.get(name))
        .and_then(|value| value.as_str())
        .map(str::to_string)
}

/// Body of `get_prompt`: resolve the named prompt against its arguments.
fn render_prompt(name: &str, arguments: Option<&JsonObject>) -> Result<String, ErrorData> {
    match name {
        "tip_suggestion" => {
            let task = required_argument(arguments, "task_description")?;
            Ok(prompts::tip_suggestion(&task))
        }
        "category_explorer" => {
            let category = required_argument(arguments, "category_name")?;
            Ok(prompts::category_explorer(&category))
        }
        "learning_path" => {
            let level = required_argument(arguments, "current_skill_level")?;
            Ok(prompts::learning_path(&level))
        }
        "interactive_tip_finder" => Ok(prompts::interactive_tip_finder()),
        "quiz_me" => {
            let category = optional_argument(arguments, "category");
            Ok(prompts::quiz_me(category.as_deref()))
        }
        other => Err(ErrorData::invalid_params(
            format!("unknown prompt: {other}"),
            None,
        )),
    }
}

#[tool_handler]
impl ServerHandler for CopilotTipsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "copilot-tips".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "GitHub Copilot tips and tricks MCP server. Use get_tip_by_topic for keyword \
                 search, get_tip_by_id for a specific tip, and get_random_tip for discovery. \
                 delete_tip and reset_tips mutate the in-memory catalog only. The \
                 tips://categories and tips://stats resources summarize the catalog."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: resource_entries(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let text = self.resource_text(&request.uri).await?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult {
            prompts: prompt_catalog(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        let text = render_prompt(&request.name, request.arguments.as_ref())?;
        Ok(GetPromptResult {
            description: None,
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }
}

fn prompt_catalog() -> Vec<Prompt> {
    vec![
        Prompt::new(
            "tip_suggestion",
            Some("Recommend tips for a described task"),
            Some(vec![prompt_argument(
                "task_description",
                "What the user is trying to accomplish",
                true,
            )]),
        ),
        Prompt::new(
            "category_explorer",
            Some("Explore all tips in a category, organized by difficulty"),
            Some(vec![prompt_argument(
                "category_name",
                "The category to explore, e.g. 'Prompting Techniques'",
                true,
            )]),
        ),
        Prompt::new(
            "learning_path",
            Some("Build a personalized learning path from a skill level"),
            Some(vec![prompt_argument(
                "current_skill_level",
                "One of 'beginner', 'intermediate', 'advanced'",
                true,
            )]),
        ),
        Prompt::new(
            "interactive_tip_finder",
            Some("Guided questions to find the right tip"),
            None,
        ),
        Prompt::new(
            "quiz_me",
            Some("Quiz the user on Copilot tips"),
            Some(vec![prompt_argument(
                "category",
                "Optional category to focus the quiz on",
                false,
            )]),
        ),
    ]
}

fn prompt_argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(required),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(id: &str, title: &str, description: &str, category: &str, difficulty: &str) -> Tip {
        Tip {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            impact: Some("high".to_string()),
        }
    }

    fn test_server() -> CopilotTipsServer {
        let store = Arc::new(TipStore::from_tips(vec![
            tip(
                "prompt-001",
                "Be Specific in Your Prompts",
                "Detailed prompts with context produce better suggestions.",
                "Prompting Techniques",
                "beginner",
            ),
            tip(
                "prompt-002",
                "Prompt with Examples",
                "Show Copilot a sample of the output you want.",
                "Prompting Techniques",
                "intermediate",
            ),
            tip(
                "agent-001",
                "Delegate Multi-File Edits",
                "Agent mode plans changes across files.",
                "Agent Mode & Automation",
                "advanced",
            ),
        ]));
        CopilotTipsServer::new(store)
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = CopilotTipsServer::tool_router().list_all();
        for name in [
            "get_tip_by_id",
            "get_tip_by_topic",
            "get_random_tip",
            "delete_tip",
            "reset_tips",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[tokio::test]
    async fn test_get_tip_by_id_tool() {
        let server = test_server();
        let Json(response) = server
            .get_tip_by_id(Parameters(GetTipByIdParams {
                tip_id: "PROMPT-001".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(response.tip.id, "prompt-001");
    }

    #[tokio::test]
    async fn test_get_tip_by_id_error_carries_hint() {
        let server = test_server();
        let Err(err) = server
            .get_tip_by_id(Parameters(GetTipByIdParams {
                tip_id: "missing-999".to_string(),
            }))
            .await
        else {
            panic!("expected a missing id to fail")
        };
        assert!(err.contains("tip not found: 'missing-999'"));
        assert!(err.contains("prompt-001"));
    }

    #[tokio::test]
    async fn test_get_tip_by_topic_tool() {
        let server = test_server();
        let Json(response) = server
            .get_tip_by_topic(Parameters(GetTipByTopicParams {
                search_term: "prompt".to_string(),
                category: None,
                difficulty: None,
            }))
            .await
            .unwrap();
        assert_eq!(response.count, 2);
        // "Prompt with Examples" starts with the term, so it ranks first
        assert_eq!(response.tips[0].id, "prompt-002");
    }

    #[tokio::test]
    async fn test_get_tip_by_topic_no_matches_suggests_broadening() {
        let server = test_server();
        let Err(err) = server
            .get_tip_by_topic(Parameters(GetTipByTopicParams {
                search_term: "kubernetes".to_string(),
                category: None,
                difficulty: None,
            }))
            .await
        else {
            panic!("expected zero matches to fail")
        };
        assert!(err.contains("no tips found matching 'kubernetes'"));
        assert!(err.contains("broader search terms"));
    }

    #[tokio::test]
    async fn test_get_random_tip_respects_filters() {
        let server = test_server();
        let Json(response) = server
            .get_random_tip(Parameters(GetRandomTipParams {
                category: Some("Agent Mode & Automation".to_string()),
                difficulty: None,
            }))
            .await
            .unwrap();
        assert_eq!(response.tip.id, "agent-001");
        assert_eq!(response.pool_size, 1);
    }

    #[tokio::test]
    async fn test_get_random_tip_empty_pool_echoes_filters() {
        let server = test_server();
        let Err(err) = server
            .get_random_tip(Parameters(GetRandomTipParams {
                category: Some("Prompting Techniques".to_string()),
                difficulty: Some("advanced".to_string()),
            }))
            .await
        else {
            panic!("expected an empty pool to fail")
        };
        assert!(err.contains("no tips match the specified filters"));
        assert!(err.contains("category: Prompting Techniques"));
        assert!(err.contains("difficulty: advanced"));
    }

    #[tokio::test]
    async fn test_delete_and_reset_tools_round_trip() {
        let server = test_server();

        let Json(deleted) = server
            .delete_tip(Parameters(DeleteTipParams {
                tip_id: "prompt-001".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(deleted.deleted_tip.id, "prompt-001");
        assert_eq!(deleted.remaining_count, 2);

        let Err(err) = server
            .get_tip_by_id(Parameters(GetTipByIdParams {
                tip_id: "prompt-001".to_string(),
            }))
            .await
        else {
            panic!("expected the deleted tip to be gone")
        };
        assert!(err.contains("tip not found"));

        let Json(reset) = server.reset_tips().await.unwrap();
        assert_eq!(reset.tip_count, 3);
        assert!(server
            .get_tip_by_id(Parameters(GetTipByIdParams {
                tip_id: "prompt-001".to_string(),
            }))
            .await
            .is_ok());
    }

    #[test]
    fn test_resource_entries_cover_both_uris() {
        let uris: Vec<String> = resource_entries()
            .iter()
            .map(|r| r.raw.uri.clone())
            .collect();
        assert_eq!(uris, [CATEGORIES_URI, STATS_URI]);
    }

    #[tokio::test]
    async fn test_resource_text_renders_both_resources() {
        let server = test_server();

        let categories = server.resource_text(CATEGORIES_URI).await.unwrap();
        assert!(categories.contains("# GitHub Copilot Tip Categories"));
        assert!(categories.contains("**Prompting Techniques** (2 tips)"));

        let stats = server.resource_text(STATS_URI).await.unwrap();
        assert!(stats.contains("**Total Tips:** 3"));
        assert!(stats.contains("| Advanced | 1 |"));

        let err = server.resource_text("tips://nope").await.unwrap_err();
        assert!(err.message.contains("unknown resource"));
    }

    #[test]
    fn test_prompt_catalog_names_every_prompt() {
        let names: Vec<String> = prompt_catalog().iter().map(|p| p.name.clone()).collect();
        assert_eq!(
            names,
            [
                "tip_suggestion",
                "category_explorer",
                "learning_path",
                "interactive_tip_finder",
                "quiz_me",
            ]
        );
    }

    #[test]
    fn test_render_prompt_requires_its_argument() {
        let err = render_prompt("tip_suggestion", None).unwrap_err();
        assert!(err.message.contains("missing required argument: task_description"));

        let err = render_prompt("no_such_prompt", None).unwrap_err();
        assert!(err.message.contains("unknown prompt"));
    }

    #[test]
    fn test_render_prompt_passes_arguments_through() {
        let mut args = JsonObject::new();
        args.insert(
            "category".to_string(),
            serde_json::Value::String("Chat Features".to_string()),
        );
        let text = render_prompt("quiz_me", Some(&args)).unwrap();
        assert!(text.contains("\"Chat Features\" category"));

        // quiz_me's category is optional
        let text = render_prompt("quiz_me", None).unwrap();
        assert!(text.contains("knowledge!"));
    }

    #[test]
    fn test_delete_response_serializes_expected_fields() {
        let response = DeleteTipResponse {
            message: "Tip 'prompt-001' deleted successfully".to_string(),
            deleted_tip: tip("prompt-001", "T", "d", "C", "beginner"),
            remaining_count: 2,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["deleted_tip"]["id"], "prompt-001");
        assert_eq!(value["remaining_count"], 2);
        assert!(value["message"].as_str().unwrap().contains("deleted"));
    }

    #[test]
    fn test_tip_without_impact_omits_the_field() {
        let mut t = tip("a", "T", "d", "C", "beginner");
        t.impact = None;
        let value = serde_json::to_value(&t).unwrap();
        assert!(value.get("impact").is_none());
    }
}
