use serde::{Deserialize, Serialize};

/// Named reputation bucket used for display classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuraTier {
    Legendary,
    Strong,
    Rising,
    Neutral,
    Weak,
    Broken,
    Unranked,
}

impl AuraTier {
    pub const fn label(self) -> &'static str {
        match self {
            AuraTier::Legendary => "Legendary",
            AuraTier::Strong => "Strong",
            AuraTier::Rising => "Rising",
            AuraTier::Neutral => "Neutral",
            AuraTier::Weak => "Weak",
            AuraTier::Broken => "Broken",
            AuraTier::Unranked => "Unranked",
        }
    }
}

/// Display metadata for one tier threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub tier: AuraTier,
    pub label: &'static str,
    pub min_score: u16,
    pub description: &'static str,
}

/// Ordered descending by `min_score`; lookups return the first match.
pub const AURA_TIERS: [TierInfo; 6] = [
    TierInfo {
        tier: AuraTier::Legendary,
        label: "Legendary Aura",
        min_score: 850,
        description: "The gold standard of on-chain trustworthiness.",
    },
    TierInfo {
        tier: AuraTier::Strong,
        label: "Strong Aura",
        min_score: 700,
        description: "Reliable borrower with an excellent track record.",
    },
    TierInfo {
        tier: AuraTier::Rising,
        label: "Rising Aura",
        min_score: 550,
        description: "Building a solid reputation on-chain.",
    },
    TierInfo {
        tier: AuraTier::Neutral,
        label: "Neutral Aura",
        min_score: 400,
        description: "Average history. Room to grow.",
    },
    TierInfo {
        tier: AuraTier::Weak,
        label: "Weak Aura",
        min_score: 200,
        description: "Concerning patterns detected. Improve your repayments.",
    },
    TierInfo {
        tier: AuraTier::Broken,
        label: "Broken Aura",
        min_score: 0,
        description: "Major trust issues. Defaults are dragging the score down.",
    },
];

/// Total over the whole score range: `Broken` covers zero, so the
/// `Unranked` fallback is unreachable for any in-range score.
pub fn tier_for_score(score: u16) -> AuraTier {
    for info in &AURA_TIERS {
        if score >= info.min_score {
            return info.tier;
        }
    }
    AuraTier::Unranked
}

/// Display metadata for a tier, when the tier has a table entry.
pub fn tier_info(tier: AuraTier) -> Option<&'static TierInfo> {
    AURA_TIERS.iter().find(|info| info.tier == tier)
}
