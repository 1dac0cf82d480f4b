//! # Session Exports
//!
//! Text, JSON, and Markdown renderings of a completed session.
//!
//! Every exporter requires the PRESENTER step to have completed; a failed
//! or still-running session has nothing presentable to export.

use anyhow::{Context, Result};
use serde_json::json;

use crate::agents::AGENTS;
use crate::pipeline::session::StudioSession;

/// The final presentation as plain text
pub fn export_text(session: &StudioSession) -> Result<String> {
    let output = session
        .final_output()
        .context("Session has no completed presentation to export")?;
    Ok(output.to_string())
}

/// The full session as a pretty-printed JSON document
pub fn export_json(session: &StudioSession) -> Result<String> {
    let final_output = session
        .final_output()
        .context("Session has no completed presentation to export")?;

    let document = json!({
        "session": {
            "id": session.id,
            "prompt": session.prompt,
            "domain": session.domain,
            "completedAt": session.steps[3].timestamp.to_rfc3339(),
        },
        "agents": session
            .steps
            .iter()
            .enumerate()
            .map(|(idx, step)| json!({
                "agent": AGENTS[idx].name,
                "role": step.role,
                "output": step.output,
            }))
            .collect::<Vec<_>>(),
        "finalOutput": final_output,
    });

    serde_json::to_string_pretty(&document).context("Failed to serialize session export")
}

/// The full session as a Markdown report
pub fn export_markdown(session: &StudioSession) -> Result<String> {
    let final_output = session
        .final_output()
        .context("Session has no completed presentation to export")?;

    let contributions = session
        .steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            format!(
                "### {} ({})\n\n{}\n\n",
                AGENTS[idx].name,
                step.role.as_str(),
                step.output
            )
        })
        .collect::<String>();

    Ok(format!(
        "# Multi-Agent Creative Studio Output\n\n\
         **Domain:** {}\n\
         **Prompt:** {}\n\n\
         ## Final Presentation\n\n{}\n\n\
         ## Agent Contributions\n\n{}",
        session.domain, session.prompt, final_output, contributions
    ))
}

/// Suggested file name for the plain-text export
pub fn text_file_name(session: &StudioSession) -> String {
    format!("agent-studio-output-{}.txt", session.domain)
}

/// Suggested file name for the JSON export
pub fn json_file_name(session: &StudioSession) -> String {
    format!("agent-studio-session-{}.json", session.id)
}

/// Suggested file name for the Markdown export
pub fn markdown_file_name(session: &StudioSession) -> String {
    format!("agent-studio-output-{}.md", session.domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::session::StepUpdate;

    fn completed_session() -> StudioSession {
        let mut session = StudioSession::new("Design a solar microgrid", "tech");
        let outputs = ["a concept", "- risk one", "a better concept", "the brief"];
        for (step, output) in outputs.iter().enumerate() {
            session.apply(StepUpdate::Activated { step });
            session.apply(StepUpdate::Completed {
                step,
                output: output.to_string(),
            });
        }
        session.finish();
        session
    }

    #[test]
    fn test_text_export_is_presenter_output() {
        let session = completed_session();
        assert_eq!(export_text(&session).unwrap(), "the brief");
    }

    #[test]
    fn test_incomplete_session_refused() {
        let session = StudioSession::new("goal", "tech");
        assert!(export_text(&session).is_err());
        assert!(export_json(&session).is_err());
        assert!(export_markdown(&session).is_err());
    }

    #[test]
    fn test_json_export_shape() {
        let session = completed_session();
        let document: serde_json::Value =
            serde_json::from_str(&export_json(&session).unwrap()).unwrap();

        assert_eq!(document["session"]["id"], session.id.as_str());
        assert_eq!(document["session"]["domain"], "tech");
        assert!(document["session"]["completedAt"].is_string());

        let agents = document["agents"].as_array().unwrap();
        assert_eq!(agents.len(), 4);
        assert_eq!(agents[0]["agent"], "Spark");
        assert_eq!(agents[0]["role"], "IDEA");
        assert_eq!(agents[3]["output"], "the brief");

        assert_eq!(document["finalOutput"], "the brief");
    }

    #[test]
    fn test_markdown_export_layout() {
        let session = completed_session();
        let markdown = export_markdown(&session).unwrap();

        assert!(markdown.starts_with("# Multi-Agent Creative Studio Output\n\n"));
        assert!(markdown.contains("**Domain:** tech"));
        assert!(markdown.contains("**Prompt:** Design a solar microgrid"));
        assert!(markdown.contains("## Final Presentation\n\nthe brief"));
        assert!(markdown.contains("### Spark (IDEA)\n\na concept"));
        assert!(markdown.contains("### Oracle (PRESENTER)\n\nthe brief"));
    }

    #[test]
    fn test_suggested_file_names() {
        let session = completed_session();
        assert_eq!(text_file_name(&session), "agent-studio-output-tech.txt");
        assert!(json_file_name(&session).starts_with("agent-studio-session-"));
        assert_eq!(markdown_file_name(&session), "agent-studio-output-tech.md");
    }
}
