//! Default instruction templates bundled at compile time.
//!
//! One template per agent role, sent as the system instruction of the
//! corresponding generation request. Each template caps the expected
//! response length to keep every step within the fixed output cap.

use super::AgentRole;

/// Idea - generates the initial concept
pub const IDEA: &str = include_str!("defaults/idea.md");

/// Critic - lists key risks and issues
pub const CRITIC: &str = include_str!("defaults/critic.md");

/// Refiner - improves the concept using the critique
pub const REFINER: &str = include_str!("defaults/refiner.md");

/// Presenter - writes the structured executive summary
pub const PRESENTER: &str = include_str!("defaults/presenter.md");

/// Instruction template for a role
pub fn for_role(role: AgentRole) -> &'static str {
    match role {
        AgentRole::Idea => IDEA,
        AgentRole::Critic => CRITIC,
        AgentRole::Refiner => REFINER,
        AgentRole::Presenter => PRESENTER,
    }
}

/// All templates with their roles, in pipeline order
pub fn all_templates() -> Vec<(AgentRole, &'static str)> {
    AgentRole::all()
        .into_iter()
        .map(|role| (role, for_role(role)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_non_empty() {
        for (role, content) in all_templates() {
            assert!(
                !content.trim().is_empty(),
                "Template for {:?} should not be empty",
                role
            );
        }
    }

    #[test]
    fn test_template_count() {
        assert_eq!(all_templates().len(), 4, "Should have 4 role templates");
    }
}
