//! Random practice-scenario generation.

use stayon_types::retention::{ScenarioDraft, UrgencyTier};

pub const RANDOM_SCENARIO_SYSTEM_PROMPT: &str = "You are an AI assistant that invents realistic, \
fictional insurance withdrawal or cancellation cases for consultant training.

[Instructions]
Reflect situations that come up often in real consultations, and vary them.

Every case must include:

- Customer name: a natural-sounding full name.
- Situation: a concrete reason and background that includes at least one of these types:
    1. Considering cancelling after a proposal from another company's agent (terms, benefits, plan differences)
    2. Found better terms at an insurance fair or on an online platform
    3. Considering cancelling and re-enrolling to get a gift or promotional benefit
    4. Wants to enroll through an agent who is a friend or acquaintance
    5. Feels the coverage or product makeup is not what they expected
    6. General financial reasons: premium burden, payment period, surrender value

- Urgency: exactly one of low / medium / high
    - low: open to persuasion
    - medium: undecided
    - high: already decided (very firm)

[Output format]
Always use exactly this format:

Customer name: (name)
Situation: (description)
Urgency: (low / medium / high)";

pub const RANDOM_SCENARIO_REQUEST: &str =
    "Generate a random insurance withdrawal or cancellation case.";

const NAME_PREFIX: &str = "Customer name:";
const SITUATION_PREFIX: &str = "Situation:";
const URGENCY_PREFIX: &str = "Urgency:";

/// Parse the model's scenario reply.
///
/// Returns `None` unless both a name and a situation are present. A missing
/// or unrecognized urgency falls back to `Medium`.
pub fn parse_scenario(text: &str) -> Option<ScenarioDraft> {
    let mut name = None;
    let mut situation = None;
    let mut urgency = None;

    for raw in text.lines() {
        let line = raw.replace("**", "");
        let line = line.trim().trim_start_matches(['-', '*']).trim_start();
        if let Some(value) = line.strip_prefix(NAME_PREFIX) {
            name = non_empty(value);
        } else if let Some(value) = line.strip_prefix(SITUATION_PREFIX) {
            situation = non_empty(value);
        } else if let Some(value) = line.strip_prefix(URGENCY_PREFIX) {
            urgency = non_empty(value);
        }
    }

    let urgency_tier = urgency
        .and_then(|u| u.parse::<UrgencyTier>().ok())
        .unwrap_or_default();

    Some(ScenarioDraft {
        customer_name: name?,
        situation_text: situation?,
        urgency_tier,
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reply() {
        let reply = "Customer name: Park Jiyoung\n\
                     Situation: Met an agent at an insurance fair who offered lower premiums.\n\
                     Urgency: high";
        let draft = parse_scenario(reply).unwrap();
        assert_eq!(draft.customer_name, "Park Jiyoung");
        assert_eq!(
            draft.situation_text,
            "Met an agent at an insurance fair who offered lower premiums."
        );
        assert_eq!(draft.urgency_tier, UrgencyTier::High);
    }

    #[test]
    fn tolerates_markdown_decoration() {
        let reply = "**Customer name:** Lee\n- **Situation:** Premium too high\n**Urgency:** low";
        let draft = parse_scenario(reply).unwrap();
        assert_eq!(draft.customer_name, "Lee");
        assert_eq!(draft.situation_text, "Premium too high");
        assert_eq!(draft.urgency_tier, UrgencyTier::Low);
    }

    #[test]
    fn unknown_urgency_falls_back_to_medium() {
        let reply = "Customer name: Lee\nSituation: Moving abroad\nUrgency: extreme";
        assert_eq!(parse_scenario(reply).unwrap().urgency_tier, UrgencyTier::Medium);
    }

    #[test]
    fn missing_situation_is_none() {
        assert!(parse_scenario("Customer name: Lee\nUrgency: low").is_none());
        assert!(parse_scenario("I cannot help with that.").is_none());
    }
}
