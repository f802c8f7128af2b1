//! Prompt construction for the naming request.

use crate::models::GenerationRequest;

pub const MAX_NAME_LENGTH: usize = 25;
pub const MAX_DESCRIPTION_LENGTH: usize = 100;

pub const SYSTEM_PROMPT: &str = r#"You are RepoNameWhisperer, an expert in creating GitHub repository names.
Your response must be a valid JSON object with the following format:
{
  "name": "example-repo-name",
  "description": "A short description of the repository"
}"#;

/// Render the user message for a validated request.
pub fn user_prompt(request: &GenerationRequest) -> String {
    let tech_stack = request.tech_stack();

    let mut lines = vec![
        "Please generate a repository name and description following these guidelines:".to_string(),
        String::new(),
        "1. Name Requirements:".to_string(),
        "   - Use kebab-case (lowercase with hyphens)".to_string(),
        format!("   - Maximum {} characters", MAX_NAME_LENGTH),
        "   - Must be memorable and professional".to_string(),
        r#"   - Avoid generic terms like "app" or "project" at the end"#.to_string(),
    ];

    if let Some(terms) = request.must_include() {
        lines.push(format!("   - Must include these terms: {}", terms));
    }

    lines.extend([
        String::new(),
        "2. Description Requirements:".to_string(),
        format!("   - Maximum {} characters", MAX_DESCRIPTION_LENGTH),
        r#"   - Start with "A/An""#.to_string(),
        "   - Highlight key functionality".to_string(),
        format!(
            "   - Must mention {}",
            tech_stack.unwrap_or("relevant technology")
        ),
        "   - Professional and concise tone".to_string(),
        "   - No emojis or special characters".to_string(),
        String::new(),
        format!("Project Description: {}", request.description()),
        format!("Tech Stack: {}", tech_stack.unwrap_or("not specified")),
        String::new(),
        r#"Return the result as a JSON object with "name" and "description" fields."#.to_string(),
    ]);

    lines.join("\n")
}
