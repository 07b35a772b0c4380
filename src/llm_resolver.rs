//! LLM-backed move source.

use crate::engine::SkillProfile;
use crate::games::tictactoe::{Board, Side};
use crate::llm_client::LlmClient;
use crate::oracle::{MoveResolver, ResolverError, ResolverErrorKind};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Expected reply shape: `{"move": <index>}`.
#[derive(Debug, Deserialize)]
struct MoveReply {
    #[serde(rename = "move")]
    position: i64,
}

/// Asks an LLM for a move.
#[derive(Debug, Clone)]
pub struct LlmResolver {
    client: LlmClient,
}

impl LlmResolver {
    /// Creates a resolver over an LLM client.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

/// Persona and rules for the requested skill, addressed to the model
/// playing `side`.
pub fn system_prompt(skill: SkillProfile, side: Side) -> String {
    let opponent = side.opponent();
    let persona = match skill {
        SkillProfile::Random => format!(
            "You are a beginner. Pick any empty square at random; your only goal is to place '{side}' on an empty square."
        ),
        SkillProfile::Intermediate => format!(
            "You are an intermediate player. Apply these rules in order and stop at the first that applies: \
             1. Take a square that wins immediately. \
             2. Block a square where '{opponent}' would win next turn. \
             3. Take the center (index 4). \
             4. Take an empty corner (0, 2, 6, 8). \
             5. Take any empty square. \
             Do not look for forks."
        ),
        SkillProfile::Perfect => format!(
            "You play perfect tic-tac-toe by following this procedure exactly, stopping at the first step that applies: \
             1. Win: take a square that completes a line for '{side}'. \
             2. Block: take the square where '{opponent}' would complete a line. \
             3. Fork: take a square that creates two winning threats at once. \
             4. Block fork: stop '{opponent}' from creating a fork, preferably by making a threat of your own. \
             5. Center: take index 4. \
             6. Opposite corner: if '{opponent}' holds a corner and the opposite corner is empty, take it. \
             7. Empty corner: take one of 0, 2, 6, 8. \
             8. Empty side: take one of 1, 3, 5, 7."
        ),
    };
    format!(
        "You are a tic-tac-toe player. Your mark is '{side}' and your opponent's mark is '{opponent}'. {persona}"
    )
}

/// Board description and reply format.
pub fn user_prompt(board: &Board, side: Side) -> String {
    format!(
        "The board is a list of 9 cells, indexed like this:\n\
         0 | 1 | 2\n\
         ---------\n\
         3 | 4 | 5\n\
         ---------\n\
         6 | 7 | 8\n\n\
         Current board: {cells}\n\n\
         Choose the move for '{side}' on an empty (null) cell. \
         Reply with only a JSON object of the form {{\"move\": <index>}}.",
        cells = board.to_json_cells(),
    )
}

/// Reads `{"move": n}` out of a model reply, tolerating code fences and
/// text around the object. Range and occupancy are not checked here.
#[instrument(level = "debug")]
pub fn parse_move_reply(text: &str) -> Result<i64, ResolverError> {
    let malformed = || ResolverError::new(ResolverErrorKind::Malformed(text.trim().to_string()));
    let start = text.find('{').ok_or_else(malformed)?;
    let end = text.rfind('}').ok_or_else(malformed)?;
    if end < start {
        return Err(malformed());
    }
    let reply: MoveReply = serde_json::from_str(&text[start..=end]).map_err(|e| {
        debug!(error = %e, "Reply is not a move object");
        malformed()
    })?;
    Ok(reply.position)
}

#[async_trait::async_trait]
impl MoveResolver for LlmResolver {
    #[instrument(skip(self, board), fields(board = %board, model = %self.client.config().model()))]
    async fn resolve(
        &self,
        board: Board,
        side: Side,
        skill: SkillProfile,
    ) -> Result<i64, ResolverError> {
        let text = self
            .client
            .generate(&system_prompt(skill, side), &user_prompt(&board, side))
            .await
            .map_err(|e| ResolverError::from_failure(e.message))?;
        parse_move_reply(&text)
    }

    fn name(&self) -> &str {
        self.client.config().model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        assert_eq!(parse_move_reply("{\"move\": 4}").unwrap(), 4);
        assert_eq!(parse_move_reply("  {\"move\":0}\n").unwrap(), 0);
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"move\": 8}\n```";
        assert_eq!(parse_move_reply(text).unwrap(), 8);
    }

    #[test]
    fn test_parse_keeps_out_of_range_for_validation() {
        assert_eq!(parse_move_reply("{\"move\": -3}").unwrap(), -3);
        assert_eq!(parse_move_reply("{\"move\": 12}").unwrap(), 12);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "4", "{\"square\": 4}", "{\"move\": \"4\"}", "{\"move\": 4.5}", "} {"] {
            let err = parse_move_reply(text).unwrap_err();
            assert!(
                matches!(err.kind, ResolverErrorKind::Malformed(_)),
                "{text:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_prompts_name_both_sides() {
        let prompt = system_prompt(SkillProfile::Perfect, Side::O);
        assert!(prompt.contains("Your mark is 'O'"));
        assert!(prompt.contains("'X' would complete a line"));

        let board: Board = "X...O....".parse().unwrap();
        let user = user_prompt(&board, Side::O);
        assert!(user.contains(r#"["X",null,null,null,"O",null,null,null,null]"#));
        assert!(user.contains("{\"move\": <index>}"));
    }
}
