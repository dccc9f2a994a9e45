//! Retention script prompt builder.
//!
//! The system prompt is assembled from tagged sections so the model can tell
//! the fixed rules apart from the case-specific facts:
//!
//! ```text
//! <role>...</role>
//! <identity>agent and customer facts, naming rules</identity>
//! <strategy>one block, chosen by urgency tier</strategy>
//! <emphasis>selected topic descriptions (omitted when none)</emphasis>
//! <style_guide>script rules and the TIP section format</style_guide>
//! ```

use std::collections::BTreeSet;

use stayon_types::retention::{EmphasisTopic, UrgencyTier};

/// Used when the agent has no display name.
pub const DEFAULT_AGENT_NAME: &str = "Consultant";

const ROLE: &str = "You are an expert AI assistant that helps insurance consultants respond to \
customers asking to withdraw their application or cancel their policy.
Using the customer's situation and urgency tier entered by the consultant, write a persuasive, \
tailored call script that calms the customer and rebuilds trust.
Put a divider line between the call script and the consultation tips.";

pub const TIER_LOW_STRATEGY: &str = "Urgency tier: low (open to persuasion)
- The customer is interested in another product but has not made up their mind.
- Remind them why they need the current policy and what it does well; a simple alternative is often enough.
- Gently highlight the strengths of the existing policy and offer a comparison with the other product.
- Tailor the script around supplementary coverage or benefits that fit their situation.
- Buy time and invite them to reconsider.";

pub const TIER_MEDIUM_STRATEGY: &str = "Urgency tier: medium (undecided)
- The customer is leaning strongly toward another product but has not committed.
- Acknowledge why they are considering cancellation, then actively propose a remedy that fits them.
- Include persuasive figures and benefits, and explain any disadvantages of cancelling.
- Explain both the advantages of keeping the policy and the risks of switching.
- Invite them to a phone or in-person consultation.";

pub const TIER_HIGH_STRATEGY: &str = "Urgency tier: high (very firm)
- The customer has already decided on another product and acted on it.
- Open by respecting their decision, then calmly explain the disadvantages and caveats of cancelling.
- Avoid emotional language; appear accepting and keep an informative, trustworthy tone.
- State the disadvantages and inconveniences clearly.
- Close by leaving the door open for a future consultation.";

const STYLE_GUIDE: &str = "Script-writing rules
1. Show that you understand exactly why the customer wants to cancel, and empathize sincerely.
2. Avoid formulaic explanations. Write concrete, conversational lines the consultant can say as-is.
3. Write 2 to 3 consultation tips focused on rebuilding trust, retention strategy, or re-explaining benefits.
4. Separate paragraphs with a blank line.
5. Work the customer's name and the consultant's name naturally into the conversation.
6. If the consultant selected emphasis points, weave them into the flow where they strengthen the argument. Do not just list them.
---
📌 Consultation tips
▶️ (specific tip 1)
▶️ (specific tip 2)
▶️ (tip 3 if needed)";

/// Persuasion strategy for a tier.
pub fn strategy_block(tier: UrgencyTier) -> &'static str {
    match tier {
        UrgencyTier::Low => TIER_LOW_STRATEGY,
        UrgencyTier::Medium => TIER_MEDIUM_STRATEGY,
        UrgencyTier::High => TIER_HIGH_STRATEGY,
    }
}

/// Everything the script prompt needs about one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPromptConfig {
    pub customer_name: String,
    pub situation_text: String,
    pub urgency_tier: UrgencyTier,
    pub agent_name: String,
    pub emphasis_topics: BTreeSet<EmphasisTopic>,
}

impl ScriptPromptConfig {
    /// The human turn sent alongside the system prompt.
    pub fn customer_facts(&self) -> String {
        format!(
            "- Customer name: {}\n- Cancellation request: {}\n- Urgency tier: {}",
            self.customer_name.trim(),
            self.situation_text.trim(),
            self.urgency_tier.label()
        )
    }

    fn agent_display_name(&self) -> &str {
        match self.agent_name.trim() {
            "" => DEFAULT_AGENT_NAME,
            name => name,
        }
    }
}

pub struct ScriptPromptBuilder;

impl ScriptPromptBuilder {
    pub fn build(config: &ScriptPromptConfig) -> String {
        let mut sections = Vec::with_capacity(5);

        sections.push(format!("<role>\n{ROLE}\n</role>"));
        sections.push(format!("<identity>\n{}\n</identity>", Self::identity_section(config)));
        sections.push(format!(
            "<strategy>\n{}\n</strategy>",
            strategy_block(config.urgency_tier)
        ));

        if !config.emphasis_topics.is_empty() {
            sections.push(format!(
                "<emphasis>\n{}\n</emphasis>",
                Self::emphasis_section(&config.emphasis_topics)
            ));
        }

        sections.push(format!("<style_guide>\n{STYLE_GUIDE}\n</style_guide>"));

        sections.join("\n\n")
    }

    fn identity_section(config: &ScriptPromptConfig) -> String {
        let agent = config.agent_display_name();
        format!(
            "Strict rules:
- Use only the consultant name given under [Consultant]. Never invent or change it.
- Use only the customer name given under [Customer]. Never invent any other names.
- Do not mix up the customer's name and the consultant's name.

[Consultant]
- Consultant name: {agent}

[Customer]
{facts}

Open the script with the consultant greeting the customer politely and giving their own name, \
for example: \"Hello, this is {agent}, your consultant at Goodrich.\"",
            facts = config.customer_facts(),
        )
    }

    fn emphasis_section(topics: &BTreeSet<EmphasisTopic>) -> String {
        let lines: Vec<String> = topics
            .iter()
            .map(|topic| format!("- {}", topic.description()))
            .collect();
        format!(
            "The consultant chose to emphasize the points below. Reflect them naturally where they \
strengthen the argument; do not force them in as a list.\n\n{}",
            lines.join("\n")
        )
    }
}
