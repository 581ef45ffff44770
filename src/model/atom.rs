use serde::{Deserialize, Serialize};

/// Who or what executes an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionType {
    Agent,
    Human,
    Tool,
    External,
}

/// Execution contract for an atom.
///
/// Exactly one payload matching `execution_type` should be present. All four
/// are typed optional so a document with a missing or mismatched payload still
/// loads; the validator flags the inconsistency as a schema error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomSpec {
    pub estimated_duration: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub error_modes: Vec<String>,
    pub execution_type: ExecutionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_definition: Option<AgentDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_instruction: Option<HumanInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_invocation: Option<ToolInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_integration: Option<ExternalIntegration>,
}

/// Capability tier of the model an agent atom runs on.
///
/// Serializes as `low`/`mid`/`high`; the legacy spellings are accepted on
/// input for documents produced before the rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    #[serde(alias = "haiku")]
    Low,
    #[serde(alias = "sonnet")]
    Mid,
    #[serde(alias = "opus")]
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub tools: Vec<String>,
    pub model: ModelTier,
    pub model_rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    AskUserQuestion,
    Webhook,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanInstruction {
    pub action: String,
    pub context: String,
    pub decision_criteria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_path: Option<String>,
    pub integration_method: IntegrationMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryPolicy {
    None,
    Fixed,
    Exponential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub parameters: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<RetryPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    RestApi,
    Grpc,
    MessageQueue,
    FileSystem,
    Database,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalIntegration {
    pub system: String,
    pub operation: String,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}
