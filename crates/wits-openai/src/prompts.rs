//! Prompt construction for debate turns.

use wits_core::{GenerationSnapshot, TurnKind};

use crate::dto::ChatMessage;

const OPENING_INSTRUCTIONS: &str = "\
OPENING STATEMENT INSTRUCTIONS:
- Present your main thesis and 2-3 key supporting arguments
- Set the framework for how you'll approach this debate
- Be compelling and establish your credibility
- Do not yet respond to opponent arguments (they haven't spoken yet)";

const REBUTTAL_INSTRUCTIONS: &str = "\
REBUTTAL INSTRUCTIONS:
- This is a REBUTTAL - jump straight into addressing your opponent's arguments
- NO formal openings like \"Ladies and gentlemen\" - you're responding directly
- Point out specific flaws, contradictions, or weaknesses in their reasoning
- Present counter-evidence or alternative interpretations
- Strengthen your own position while dismantling theirs
- Reference specific points they made and explain why they're wrong
- Be conversational and direct - you're in the middle of an ongoing debate";

const CLOSING_INSTRUCTIONS: &str = "\
CLOSING ARGUMENT INSTRUCTIONS:
- Summarize your strongest points from the entire debate
- Highlight where you successfully countered your opponent
- Make a final compelling case for your position
- End with a memorable conclusion that reinforces your thesis
- This is your last chance to persuade - make it count";

const fn turn_instructions(kind: TurnKind) -> &'static str {
    match kind {
        TurnKind::Opening => OPENING_INSTRUCTIONS,
        TurnKind::Rebuttal => REBUTTAL_INSTRUCTIONS,
        TurnKind::Closing => CLOSING_INSTRUCTIONS,
    }
}

/// System prompt for the turn described by `snapshot`.
pub fn system_prompt(snapshot: &GenerationSnapshot) -> String {
    let config = &snapshot.config;
    let turns = config.turns_per_side;
    let turn = snapshot.turn_index;

    format!(
        "You are an expert debater participating in a structured debate. Here are your key instructions:

DEBATE TOPIC: {topic}

YOUR POSITION: {position}
OPPONENT'S POSITION: {opponent}

DEBATE STRUCTURE:
- Total turns per debater: {turns}
- Current turn: {turn}
- Turn type: {kind}

ROLE AND BEHAVIOR:
- You are {name} in this debate
- Defend your position with logical arguments, evidence, and persuasive rhetoric
- Address your opponent's points directly when they have been made
- Stay focused on the topic and maintain a respectful but assertive tone
- Be aware that this is turn {turn} of {turns} - pace your arguments accordingly

RESPONSE GUIDELINES:
- Keep responses between 100-300 words for opening/closing, 150-250 words for rebuttals
- Structure your argument clearly with main points
- Use evidence and reasoning to support your claims
- Acknowledge strong opposing points but counter them effectively
- Match the intensity and sophistication of your opponent

{instructions}

Remember: You are speaking aloud in a live debate. Make your response engaging and suitable for audio presentation.",
        topic = config.topic,
        position = snapshot.position(),
        opponent = snapshot.opponent_position(),
        kind = snapshot.kind,
        name = snapshot.role.display_name(),
        instructions = turn_instructions(snapshot.kind),
    )
}

/// User message carrying the applied transcript.
pub fn user_message(snapshot: &GenerationSnapshot) -> String {
    let history = snapshot.history_text();
    if history.is_empty() {
        "Begin your opening statement.".to_string()
    } else {
        format!("Here is the debate so far:\n\n{history}\n\nNow it's your turn to respond.")
    }
}

/// Full message list for a chat completion.
pub fn messages(snapshot: &GenerationSnapshot) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(snapshot)),
        ChatMessage::user(user_message(snapshot)),
    ]
}
