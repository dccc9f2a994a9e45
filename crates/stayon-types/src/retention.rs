//! Retention case vocabulary: urgency tiers, emphasis topics, scenario drafts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How firmly the customer intends to withdraw or cancel.
///
/// Serialized as its display label (e.g. `"high (very firm)"`). Parsing is
/// lenient about the suffix so `"high"`, `"High/very firm"` and the labels
/// found in older transcripts all resolve to the same tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 3] = [UrgencyTier::Low, UrgencyTier::Medium, UrgencyTier::High];

    /// Full label shown on the intake form and written to transcripts.
    pub fn label(self) -> &'static str {
        match self {
            UrgencyTier::Low => "low (open to persuasion)",
            UrgencyTier::Medium => "medium (undecided)",
            UrgencyTier::High => "high (very firm)",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            UrgencyTier::Low => "low",
            UrgencyTier::Medium => "medium",
            UrgencyTier::High => "high",
        }
    }
}

impl Default for UrgencyTier {
    fn default() -> Self {
        UrgencyTier::Medium
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UrgencyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let head = normalized
            .split(|c: char| c.is_whitespace() || c == '/' || c == '(')
            .find(|part| !part.is_empty())
            .unwrap_or("");

        match head {
            "low" | "하" => Ok(UrgencyTier::Low),
            "medium" | "중" => Ok(UrgencyTier::Medium),
            "high" | "상" => Ok(UrgencyTier::High),
            _ => Err(format!("invalid urgency tier: '{}'", s.trim())),
        }
    }
}

impl TryFrom<String> for UrgencyTier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UrgencyTier> for String {
    fn from(tier: UrgencyTier) -> Self {
        tier.label().to_string()
    }
}

/// An optional talking point the agent wants woven into the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmphasisTopic {
    BrandTrust,
    ProposalComparison,
    EnrollmentReminder,
    DedicatedConsultant,
    FamilyCoverage,
}

impl EmphasisTopic {
    pub const ALL: [EmphasisTopic; 5] = [
        EmphasisTopic::BrandTrust,
        EmphasisTopic::ProposalComparison,
        EmphasisTopic::EnrollmentReminder,
        EmphasisTopic::DedicatedConsultant,
        EmphasisTopic::FamilyCoverage,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            EmphasisTopic::BrandTrust => "brand_trust",
            EmphasisTopic::ProposalComparison => "proposal_comparison",
            EmphasisTopic::EnrollmentReminder => "enrollment_reminder",
            EmphasisTopic::DedicatedConsultant => "dedicated_consultant",
            EmphasisTopic::FamilyCoverage => "family_coverage",
        }
    }

    /// Label shown in the multi-select on the intake form.
    pub fn label(self) -> &'static str {
        match self {
            EmphasisTopic::BrandTrust => "Goodrich brand trust and reputation",
            EmphasisTopic::ProposalComparison => "Comparison with the competing proposal",
            EmphasisTopic::EnrollmentReminder => "Reminder of the original enrollment situation",
            EmphasisTopic::DedicatedConsultant => "Dedicated consultant care system",
            EmphasisTopic::FamilyCoverage => "Family coverage management service",
        }
    }

    /// Paragraph injected into the script prompt when the topic is selected.
    pub fn description(self) -> &'static str {
        match self {
            EmphasisTopic::BrandTrust => {
                "Stress that Goodrich ranks among the top three insurance agencies by brand index, \
                 with more than 5,000 active consultants and an app used by 7 million people, \
                 making it a platform customers can trust."
            }
            EmphasisTopic::ProposalComparison => {
                "Compare the proposal the customer received from the other company with the Goodrich \
                 proposal, and stress that a second-round analysis can further optimize their coverage."
            }
            EmphasisTopic::EnrollmentReminder => {
                "Remind the customer of the concerns and needs that led them to enroll in the first \
                 place, and persuade by contrasting that with their current situation."
            }
            EmphasisTopic::DedicatedConsultant => {
                "Explain that the Goodrich dedicated-consultant system supports the customer from plan \
                 design through after-care, including practical benefits such as easier claims and app use."
            }
            EmphasisTopic::FamilyCoverage => {
                "Stress that the Goodrich app lets the customer manage their family's policies alongside \
                 their own, which is valuable over the long term."
            }
        }
    }
}

impl fmt::Display for EmphasisTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EmphasisTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        EmphasisTopic::ALL
            .into_iter()
            .find(|topic| {
                topic.slug().eq_ignore_ascii_case(needle) || topic.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("invalid emphasis topic: '{needle}'"))
    }
}

/// A randomly generated practice case used to pre-fill the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDraft {
    pub customer_name: String,
    pub situation_text: String,
    pub urgency_tier: UrgencyTier,
}
