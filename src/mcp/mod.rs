//! MCP server exposing the planning board as tools.

mod types;

pub use types::*;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;
use uuid::Uuid;

use crate::models::*;
use crate::planner::grid::{ArrowView, BoardView};
use crate::planner::render::DEFAULT_CELL_WIDTH;
use crate::planner::{Planner, PlannerError};
use crate::SharedPlanner;

#[derive(Clone)]
pub struct McpServer {
    planner: SharedPlanner,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(planner: SharedPlanner) -> Self {
        Self {
            planner,
            tool_router: Self::tool_router(),
        }
    }

    fn parse_uuid(s: &str) -> Result<Uuid, McpError> {
        Uuid::parse_str(s)
            .map_err(|e| McpError::invalid_params(format!("Invalid UUID: {}", e), None))
    }

    fn parse_phase(s: &str) -> Result<Phase, McpError> {
        PlannerError::parse_phase(s).map_err(Self::rejected)
    }

    fn rejected(e: PlannerError) -> McpError {
        tracing::warn!("Rejected tool call: {}", e);
        McpError::invalid_params(e.to_string(), None)
    }

    fn planner(&self) -> std::sync::MutexGuard<'_, Planner> {
        self.planner.lock().expect("planner lock poisoned")
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // ============================================================
    // Tool logic, callable directly from tests
    // ============================================================

    pub fn board(&self) -> BoardView {
        self.planner().board()
    }

    pub fn arrow_layout(&self) -> Vec<ArrowView> {
        self.planner().arrow_layout()
    }

    pub fn render(&self, width: Option<usize>) -> String {
        self.planner().render(width.unwrap_or(DEFAULT_CELL_WIDTH))
    }

    pub fn handle_add_activity(&self, req: AddActivityRequest) -> Result<Activity, McpError> {
        let phase = Self::parse_phase(&req.phase)?;
        self.planner()
            .add_activity(CreateActivityInput {
                phase,
                month: req.month,
                text: req.text,
            })
            .map_err(Self::rejected)
    }

    pub fn handle_delete_activity(
        &self,
        req: DeleteActivityRequest,
    ) -> Result<DeleteResponse, McpError> {
        let id = Self::parse_uuid(&req.activity_id)?;
        let removed = self.planner().remove_activity(id);
        Ok(DeleteResponse {
            id: id.to_string(),
            removed,
        })
    }

    pub fn handle_add_arrow(&self, req: AddArrowRequest) -> Result<Arrow, McpError> {
        let start_phase = Self::parse_phase(&req.start_phase)?;
        let end_phase = Self::parse_phase(&req.end_phase)?;
        self.planner()
            .add_arrow(CreateArrowInput {
                month: req.month,
                start_phase,
                end_phase,
            })
            .map_err(Self::rejected)
    }

    pub fn handle_delete_arrow(&self, req: DeleteArrowRequest) -> Result<DeleteResponse, McpError> {
        let id = Self::parse_uuid(&req.arrow_id)?;
        let removed = self.planner().remove_arrow(id);
        Ok(DeleteResponse {
            id: id.to_string(),
            removed,
        })
    }

    pub fn handle_rename_month(&self, req: RenameMonthRequest) -> RenameMonthResult {
        let mut planner = self.planner();
        let renamed = planner.rename_month(req.index, req.label);
        RenameMonthResult {
            renamed,
            months: planner.months().to_vec(),
        }
    }
}

#[tool_router]
impl McpServer {
    #[tool(
        description = "Get the whole planning board: phase rows, month columns (with arrow counts), every cell's stacked activities, and the geometry of every flow arrow."
    )]
    async fn get_board(&self) -> Result<CallToolResult, McpError> {
        Self::json_result(&self.board())
    }

    #[tool(
        description = "Render the board as a text table. Each cell lists its activities; arrows appear as a column of glyphs: 'o' where an arrow starts, '|' where it passes, 'v' or '^' where it ends."
    )]
    async fn render_board(
        &self,
        params: Parameters<RenderBoardRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            self.render(params.0.width),
        )]))
    }

    #[tool(
        description = "Place an activity note in a phase × month cell. Several activities may share a cell. The month must be one of the board's current month labels and the text must not be blank."
    )]
    async fn add_activity(
        &self,
        params: Parameters<AddActivityRequest>,
    ) -> Result<CallToolResult, McpError> {
        let activity = self.handle_add_activity(params.0)?;
        Self::json_result(&activity)
    }

    #[tool(
        description = "Delete an activity by id. Deleting an id that does not exist is not an error; the response reports removed=false."
    )]
    async fn delete_activity(
        &self,
        params: Parameters<DeleteActivityRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.handle_delete_activity(params.0)?;
        Self::json_result(&result)
    }

    #[tool(
        description = "Draw a flow arrow between two different phases within one month column. A month holds at most 3 arrows; a 4th is rejected and the board is left unchanged."
    )]
    async fn add_arrow(
        &self,
        params: Parameters<AddArrowRequest>,
    ) -> Result<CallToolResult, McpError> {
        let arrow = self.handle_add_arrow(params.0)?;
        Self::json_result(&arrow)
    }

    #[tool(
        description = "Delete a flow arrow by id. Remaining arrows in the month shift to fill its slot. Unknown ids report removed=false."
    )]
    async fn delete_arrow(
        &self,
        params: Parameters<DeleteArrowRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.handle_delete_arrow(params.0)?;
        Self::json_result(&result)
    }

    #[tool(
        description = "Rename the month column at a 0-based index. Every activity and arrow in that month moves to the new label. An out-of-range index changes nothing and reports renamed=false."
    )]
    async fn rename_month(
        &self,
        params: Parameters<RenameMonthRequest>,
    ) -> Result<CallToolResult, McpError> {
        Self::json_result(&self.handle_rename_month(params.0))
    }

    #[tool(
        description = "Get the geometry of every flow arrow: grid rows spanned, direction, start and end points as fractions of the block, and slot within its month."
    )]
    async fn get_arrow_layout(&self) -> Result<CallToolResult, McpError> {
        Self::json_result(&self.arrow_layout())
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "phase-planner".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"Phase planner manages a design-thinking planning board.

BOARD:
- Rows are six fixed phases, top to bottom: Empathize, Define, Ideate, Prototype, Test, Implement.
- Columns are month labels, in order. Labels can be renamed in place.
- Activities are short notes placed in a phase × month cell.
- Flow arrows connect two different phases inside one month column. A month holds at most 3 arrows.

WORKFLOW:
1. Call get_board or render_board to see the current board
2. Use add_activity / delete_activity to manage notes
3. Use add_arrow / delete_arrow to manage flows
4. Use rename_month to relabel a column; its activities and arrows follow"#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(planner: SharedPlanner) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(planner);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
