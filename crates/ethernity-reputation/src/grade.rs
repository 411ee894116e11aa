//! Tabelas de conversão de pontuação em nota e selo.
//!
//! Nota e selo usam cortes diferentes: a nota segue uma escala acadêmica e o
//! selo uma linguagem mais direta para a interface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nota acadêmica da carteira
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

const GRADE_TABLE: [(u8, Grade); 4] = [
    (82, Grade::A),
    (72, Grade::B),
    (62, Grade::C),
    (50, Grade::D),
];

impl Grade {
    pub fn from_score(score: u8) -> Self {
        GRADE_TABLE
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    /// Cor usada pela interface para a nota
    pub fn color(&self) -> &'static str {
        match self {
            Grade::A => "#10b981",
            Grade::B => "#3b82f6",
            Grade::C => "#f59e0b",
            Grade::D => "#ef4444",
            Grade::F => "#dc2626",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Faixa qualitativa do selo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    Trusted,
    Reliable,
    Neutral,
    Caution,
    HighRisk,
}

/// Nível de risco exibido junto ao selo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

struct BadgeEntry {
    min: u8,
    tier: BadgeTier,
    label: &'static str,
    color: &'static str,
    icon: &'static str,
    description: &'static str,
}

const BADGE_TABLE: [BadgeEntry; 5] = [
    BadgeEntry {
        min: 85,
        tier: BadgeTier::Trusted,
        label: "Trusted Wallet",
        color: "#10b981",
        icon: "🛡️",
        description: "Long, diverse and clean on-chain history",
    },
    BadgeEntry {
        min: 70,
        tier: BadgeTier::Reliable,
        label: "Reliable",
        color: "#3b82f6",
        icon: "✅",
        description: "Consistent activity with few risk signals",
    },
    BadgeEntry {
        min: 55,
        tier: BadgeTier::Neutral,
        label: "Neutral",
        color: "#f59e0b",
        icon: "⚖️",
        description: "Mixed signals, review the flags before trusting",
    },
    BadgeEntry {
        min: 30,
        tier: BadgeTier::Caution,
        label: "Use Caution",
        color: "#f97316",
        icon: "⚠️",
        description: "Limited history or several risk signals",
    },
    BadgeEntry {
        min: 0,
        tier: BadgeTier::HighRisk,
        label: "High Risk",
        color: "#dc2626",
        icon: "🚨",
        description: "Strong indicators of bot, spam or illicit activity",
    },
];

/// Selo qualitativo com dados de apresentação
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub tier: BadgeTier,
    pub label: String,
    pub color: String,
    pub icon: String,
    pub description: String,
}

impl Badge {
    pub fn from_score(score: u8) -> Self {
        // a última faixa tem mínimo zero, então sempre há correspondência
        let entry = BADGE_TABLE
            .iter()
            .find(|entry| score >= entry.min)
            .unwrap_or(&BADGE_TABLE[BADGE_TABLE.len() - 1]);
        Self {
            tier: entry.tier,
            label: entry.label.to_string(),
            color: entry.color.to_string(),
            icon: entry.icon.to_string(),
            description: entry.description.to_string(),
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self.tier {
            BadgeTier::Trusted | BadgeTier::Reliable => RiskLevel::Low,
            BadgeTier::Neutral | BadgeTier::Caution => RiskLevel::Medium,
            BadgeTier::HighRisk => RiskLevel::High,
        }
    }
}
