//! Outbound chat-app message drafting.

use stayon_types::chat::{ChatTurn, TurnRole};

use super::SUGGESTED_LINE_MARKER;

/// Human turn sent with the outbound system prompt.
pub const OUTBOUND_REQUEST: &str = "Please write the follow-up chat messages.";

/// Condense the follow-up chat into agent requests and suggested lines.
///
/// Assistant turns only contribute their quoted (`> `) lines, and only when
/// they carry [`SUGGESTED_LINE_MARKER`].
pub fn summarize_conversation(messages: &[ChatTurn]) -> String {
    let mut points = Vec::new();
    for turn in messages {
        match turn.role {
            TurnRole::User => points.push(format!("- Agent request: {}", turn.content)),
            TurnRole::Assistant if turn.content.contains(SUGGESTED_LINE_MARKER) => {
                points.extend(
                    turn.content
                        .lines()
                        .filter_map(|line| line.strip_prefix("> "))
                        .map(|quoted| format!("- Suggested line: {quoted}")),
                );
            }
            TurnRole::Assistant => {}
        }
    }
    points.join("\n")
}

/// System prompt asking for three message variants built on the script and
/// the conversation summary.
pub fn outbound_prompt(script_text: &str, summary: &str) -> String {
    format!(
        "[Retention call summary]
{script_text}

[Follow-up conversation summary]
{summary}

Important: the chat messages you write must reflect both the retention call summary and the follow-up conversation summary above.
- You are the insurance consultant who just spoke with a customer asking to cancel.
- After the call, write three kinds of follow-up messages that rebuild trust and leave room for the customer to reconsider.
- Each message takes a different approach, but all of them show respect for the customer, rebuild trust, give information, and invite follow-up questions.

[Output format]
Write one message of each of the following types.

### 1️⃣ Trust-focused, emphasizing Goodrich's reliability
- Focus on the company's stability, sincere customer care, and commitment to ongoing support.
- Leave the impression that choosing this company was a trustworthy decision.

### 2️⃣ Insurance expert
- Use professional terms but explain them so the customer can follow.
- Lay out the expected disadvantages of cancelling, alternative ways to keep coverage, and the key points the consultant covered.
- Encourage reconsideration with an expert's care and command of the facts.

### 3️⃣ Trust plus real-world cases
- Mention a realistic similar case (for example, another customer who regretted cancelling) to make the point.
- Avoid overly emotional language; persuade with realistic situations and comparisons.

[Writing rules]
1. Each message is about 15 sentences.
2. Put each sentence on its own line.
3. Separate topic changes with a blank line.
4. Include the customer's name naturally.
5. Always cover how the request is being handled, the current stage, expected timing, and that further questions are welcome.
6. Never use pushy wording; always close with phrases like \"Feel free to reach out\" or \"Contact us any time\".
7. In the real-world case type, cite cases naturally but sincerely, without inventing or exaggerating.
8. Avoid wording that causes anxiety; use wording that conveys trust and stability.
9. Keep a respectful, considerate tone in every type."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_keeps_requests_and_marked_quotes() {
        let messages = vec![
            ChatTurn::assistant("Hello, this is the script.\n> not a suggestion"),
            ChatTurn::user("Customer says the premium is too high"),
            ChatTurn::assistant(format!(
                "**{SUGGESTED_LINE_MARKER}**\n> \"I hear you on the premium.\"\nTip: slow down."
            )),
        ];
        let summary = summarize_conversation(&messages);
        assert_eq!(
            summary,
            "- Agent request: Customer says the premium is too high\n\
             - Suggested line: \"I hear you on the premium.\""
        );
    }

    #[test]
    fn empty_conversation_gives_empty_summary() {
        assert_eq!(summarize_conversation(&[]), "");
    }

    #[test]
    fn prompt_embeds_script_and_summary() {
        let prompt = outbound_prompt("SCRIPT BODY", "- Agent request: hi");
        assert!(prompt.starts_with("[Retention call summary]\nSCRIPT BODY\n"));
        assert!(prompt.contains("[Follow-up conversation summary]\n- Agent request: hi\n"));
        assert!(prompt.contains("### 1️⃣"));
        assert!(prompt.contains("### 2️⃣"));
        assert!(prompt.contains("### 3️⃣"));
    }
}
