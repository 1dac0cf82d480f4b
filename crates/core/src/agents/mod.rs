//! # Agent Roster
//!
//! The fixed four-agent team and the selectable project domains.
//!
//! The roster order is load-bearing: the orchestrator addresses session
//! steps by position, so `AGENTS[0]` is always IDEA, `AGENTS[1]` CRITIC,
//! `AGENTS[2]` REFINER, and `AGENTS[3]` PRESENTER.

pub mod prompts;

use serde::{Deserialize, Serialize};

/// The four fixed agent roles, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentRole {
    /// Generates the initial concept
    Idea,
    /// Surfaces risks and missing metrics
    Critic,
    /// Synthesizes idea + critique into an improved concept
    Refiner,
    /// Polishes the result into an executive brief
    Presenter,
}

impl AgentRole {
    /// All roles in pipeline order
    pub fn all() -> [AgentRole; 4] {
        [
            AgentRole::Idea,
            AgentRole::Critic,
            AgentRole::Refiner,
            AgentRole::Presenter,
        ]
    }

    /// Canonical upper-case name, used in context-blob headings
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Idea => "IDEA",
            AgentRole::Critic => "CRITIC",
            AgentRole::Refiner => "REFINER",
            AgentRole::Presenter => "PRESENTER",
        }
    }

    /// Position of this role in the step sequence
    pub fn index(&self) -> usize {
        match self {
            AgentRole::Idea => 0,
            AgentRole::Critic => 1,
            AgentRole::Refiner => 2,
            AgentRole::Presenter => 3,
        }
    }
}

/// Static descriptor for one agent in the roster
///
/// Immutable, defined once at process start. The color and icon are
/// presentation metadata carried through to session exports and any UI.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDefinition {
    /// Stable identifier (e.g. "agent-idea")
    pub id: &'static str,
    /// Pipeline role
    pub role: AgentRole,
    /// Display name
    pub name: &'static str,
    /// One-line description of the agent's specialty
    pub description: &'static str,
    /// Presentation color token
    pub color: &'static str,
    /// Presentation icon
    pub icon: &'static str,
}

/// The fixed agent team, in pipeline order
pub const AGENTS: [AgentDefinition; 4] = [
    AgentDefinition {
        id: "agent-idea",
        role: AgentRole::Idea,
        name: "Spark",
        description: "Generates creative, high-signal initial concepts.",
        color: "text-blue-400",
        icon: "\u{1F4A1}",
    },
    AgentDefinition {
        id: "agent-critic",
        role: AgentRole::Critic,
        name: "Sentinel",
        description: "Analyzes feasibility, risks, and missing metrics.",
        color: "text-red-400",
        icon: "\u{1F50D}",
    },
    AgentDefinition {
        id: "agent-refiner",
        role: AgentRole::Refiner,
        name: "Alchemist",
        description: "Synthesizes feedback to improve the original vision.",
        color: "text-emerald-400",
        icon: "\u{26A1}",
    },
    AgentDefinition {
        id: "agent-presenter",
        role: AgentRole::Presenter,
        name: "Oracle",
        description: "Polishes the final output into a professional brief.",
        color: "text-purple-400",
        icon: "\u{1F4C4}",
    },
];

/// Look up the definition for a role
pub fn agent_for_role(role: AgentRole) -> &'static AgentDefinition {
    &AGENTS[role.index()]
}

/// A selectable project domain
#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    /// Stable tag (stored on sessions)
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Presentation icon
    pub icon: &'static str,
}

/// The eight fixed domain tags
pub const DOMAINS: [Domain; 8] = [
    Domain {
        id: "esg",
        label: "ESG Sustainability",
        icon: "\u{1F331}",
    },
    Domain {
        id: "agri",
        label: "Regenerative Agriculture",
        icon: "\u{1F69C}",
    },
    Domain {
        id: "startup",
        label: "Startup Ideation",
        icon: "\u{1F680}",
    },
    Domain {
        id: "creative",
        label: "Creative Content",
        icon: "\u{1F3A8}",
    },
    Domain {
        id: "tech",
        label: "Technology Innovation",
        icon: "\u{1F4BB}",
    },
    Domain {
        id: "health",
        label: "Healthcare Solutions",
        icon: "\u{1F3E5}",
    },
    Domain {
        id: "finance",
        label: "Financial Services",
        icon: "\u{1F4B0}",
    },
    Domain {
        id: "education",
        label: "Education Reform",
        icon: "\u{1F4DA}",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_order_is_fixed() {
        assert_eq!(AGENTS[0].role, AgentRole::Idea);
        assert_eq!(AGENTS[1].role, AgentRole::Critic);
        assert_eq!(AGENTS[2].role, AgentRole::Refiner);
        assert_eq!(AGENTS[3].role, AgentRole::Presenter);
    }

    #[test]
    fn test_role_index_matches_roster_position() {
        for (idx, agent) in AGENTS.iter().enumerate() {
            assert_eq!(agent.role.index(), idx);
            assert_eq!(agent_for_role(agent.role).id, agent.id);
        }
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(AgentRole::Idea.as_str(), "IDEA");
        let json = serde_json::to_string(&AgentRole::Presenter).unwrap();
        assert_eq!(json, "\"PRESENTER\"");
        let role: AgentRole = serde_json::from_str("\"CRITIC\"").unwrap();
        assert_eq!(role, AgentRole::Critic);
    }

    #[test]
    fn test_domain_count() {
        assert_eq!(DOMAINS.len(), 8);
        assert!(DOMAINS.iter().any(|d| d.id == "tech"));
    }
}
