pub mod request;
pub mod response;

pub use request::{
    DrivingParams, GeoParams, InitializeParams, JsonRpcRequest, RegeocodeParams, RpcId,
    TextSearchParams, ToolCallParams, WeatherExtensions, WeatherParams, JSONRPC_VERSION,
};
pub use response::{
    ContentKind, JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ToolResult,
    ToolResultContent,
};
