use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Canonical plan tiers. Every plan key stored anywhere in the system must
/// resolve to exactly one of these; see [`PlanKey::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKey {
    Free,
    Starter,
    Plus,
    Pro,
}

impl PlanKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKey::Free => "free",
            PlanKey::Starter => "starter",
            PlanKey::Plus => "plus",
            PlanKey::Pro => "pro",
        }
    }

    /// Normalize a raw plan key as stored in override or subscription rows.
    ///
    /// Trims, lower-cases and maps the legacy aliases (`basic`, `unlimited`,
    /// `professional`) onto the canonical tiers. Anything else indicates
    /// upstream data corruption: it resolves to `Free` and is logged as a
    /// data-integrity warning.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "free" => PlanKey::Free,
            "starter" | "basic" => PlanKey::Starter,
            "plus" | "professional" => PlanKey::Plus,
            "pro" | "unlimited" => PlanKey::Pro,
            other => {
                tracing::warn!(plan_key = other, "Unknown plan key, resolving to free");
                PlanKey::Free
            }
        }
    }

    pub fn definition(&self) -> &'static PlanDefinition {
        match self {
            PlanKey::Free => &FREE,
            PlanKey::Starter => &STARTER,
            PlanKey::Plus => &PLUS,
            PlanKey::Pro => &PRO,
        }
    }
}

/// Boolean capability flags gated per plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    ScanLetter,
    AiDraft,
    AiChat,
    ExportPdf,
    UrgentReply,
}

/// Usage ceilings for a plan. `None` is the unlimited sentinel and encodes
/// to JSON `null` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub max_cases_per_month: Option<i32>,
    pub max_chat_messages_per_day: Option<i32>,
}

/// One entry of the plan catalog.
#[derive(Debug, Clone)]
pub struct PlanDefinition {
    pub key: PlanKey,
    pub limits: PlanLimits,
    pub features: &'static [Feature],
}

impl PlanDefinition {
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

// The single canonical plan catalog. Display layers consume this read-only;
// nothing else in the system may hardcode plan limits.
static FREE: PlanDefinition = PlanDefinition {
    key: PlanKey::Free,
    limits: PlanLimits {
        max_cases_per_month: Some(1),
        max_chat_messages_per_day: Some(10),
    },
    features: &[Feature::ScanLetter],
};

static STARTER: PlanDefinition = PlanDefinition {
    key: PlanKey::Starter,
    limits: PlanLimits {
        max_cases_per_month: Some(5),
        max_chat_messages_per_day: Some(50),
    },
    features: &[Feature::ScanLetter, Feature::AiDraft],
};

static PLUS: PlanDefinition = PlanDefinition {
    key: PlanKey::Plus,
    limits: PlanLimits {
        max_cases_per_month: Some(20),
        max_chat_messages_per_day: Some(200),
    },
    features: &[
        Feature::ScanLetter,
        Feature::AiDraft,
        Feature::AiChat,
        Feature::ExportPdf,
    ],
};

static PRO: PlanDefinition = PlanDefinition {
    key: PlanKey::Pro,
    limits: PlanLimits {
        max_cases_per_month: None,
        max_chat_messages_per_day: None,
    },
    features: &[
        Feature::ScanLetter,
        Feature::AiDraft,
        Feature::AiChat,
        Feature::ExportPdf,
        Feature::UrgentReply,
    ],
};
