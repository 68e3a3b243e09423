//! Prompt templates for the review and debate flows

use crate::debate::ReviewGroup;
use crate::task::Task;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Task description appended to a linguist's system prompt for independent review
    pub fn review_task_description() -> &'static str {
        r#"
Your task is to assign a score (1-10, where 10 is best) to the translation
based on how well it preserves the specific 'Face' act (e.g., Mitigate Negative Face) from the Greek source.
Err on the side of being more critical in the score.
The entire conversation and final output MUST be in English.
Base your score ONLY on concrete lexical, grammatical, or rhetorical fidelity to the pragmatic goal, NOT theological opinion."#
    }

    /// Task description appended to a linguist's system prompt for debate
    pub fn debate_task_description() -> &'static str {
        r#"
You are a participant in a translation debate over how to score a translation of Greek text.
You will debate the other participants and try to come to a consensus as to a score.
Be critical and err on the side of a lower score."#
    }

    /// System prompt for a linguist
    pub fn linguist_system(name: &str, task_description: &str) -> String {
        format!(
            "You are {}, a descriptive linguist and cross-cultural pragmatics expert.{}",
            name, task_description
        )
    }

    /// User prompt that opens an independent analysis
    pub fn analysis_prompt(book: &str, task: &Task) -> String {
        format!(
            r#"ROLE: You are performing a cross-lingual pragmatic analysis.
---------------------------------------------------------------------------------
GROUND TRUTH ANALYSIS:
1. Context: {book} {chapter}:{verse}
2. Greek Text: "{greek}"
3. Pragmatic Goal ('Face'): "{face}"
4. Expert Rationale (The Constraint): "{notes}"

TASK:
Evaluate the following translation against the Greek pragmatic goal and rationale.
Translation: "{translation}"

FIRST, assign a score (1-10) to the translation for its fidelity to the 'Face' goal. SECOND, justify your score in English by identifying the specific linguistic feature (e.g., verb tense, politeness markers) that either succeeds or fails. Provide the justification in Markdown format."#,
            book = book,
            chapter = task.chapter(),
            verse = task.verse(),
            greek = task.greek_text(),
            face = task.face_annotation(),
            notes = task.notes(),
            translation = task.translation(),
        )
    }

    /// System prompt for the linguistic critic
    pub fn critic_system() -> &'static str {
        r#"You are the Linguistic Critic. Your role is to rigorously review a submitted translation analysis.

Your ONLY criteria for approval are that:
    1. The analysis must be based on verifiable linguistic, stylistic, or semantic arguments.
    2. Words and phrases being analyzed **MUST** be present in the texts being analyzed.

You **MUST** output your response as a single JSON object with two fields: 'accepted' (boolean) and 'reasoning' (string).

- If the critique is scientifically rigorous (linguistically sound), set "accepted" to **true**.
- If the critique relies on popular commentary, personal opinion, or non-linguistic fields, set "accepted" to **false**, and use the "reasoning" field to provide clear revision instructions.

DO NOT include any explanation or text outside of the JSON object."#
    }

    /// Instruction asking the critic to judge the current critique
    pub fn critic_instruction(critic_name: &str, schema_json: &str, critique: &str) -> String {
        format!(
            "{}: Review the following analysis and respond ONLY in JSON.\n\n{}\n\nAnalysis:\n{}",
            critic_name, schema_json, critique
        )
    }

    /// Instruction asking the linguist to revise a rejected critique
    pub fn revision_prompt(linguist_name: &str, reasoning: &str) -> String {
        format!(
            "{}: Your previous analysis was rejected because:\n'{}'.\n\
             Please revise your critique to ensure it is based solely on verifiable linguistic principles. \
             Retain the 'Score: [N]' format.",
            linguist_name, reasoning
        )
    }

    /// Opening message of a debate: verse metadata plus every initial analysis
    pub fn debate_context(group: &ReviewGroup) -> String {
        let lead = group.lead();
        let mut prompt = format!(
            "## Debate Context for {} {}\n**Greek Text** {}\n\n** Translation ** {}\n\n**Face Annotation:** {}\n\n### Initial Independent Analyses:\n",
            lead.chapter, lead.verse, lead.greek_text, lead.translation, lead.face_annotation
        );

        for review in &group.reviews {
            prompt.push_str(&format!(
                "- **{}** (Initial Score: {}): {}\n",
                review.agent_name, review.score, review.reasoning
            ));
        }

        prompt.push_str(
            "\n**TASK:** Debate these initial findings. Critique each other. \
             Come to a consensus score. Err on the side of being critical (lower scores).",
        );

        prompt
    }

    /// System prompt for the debate moderator
    pub fn moderator_system(greek_text: &str, translation: &str, face: &str) -> String {
        format!(
            r#"You are a moderator of a debate between linguists.
The linguists are supposed to be discussing the translation of the following Greek text:
>>> {}

The translation being evaluated is as follows:
>>> {}

The translation is intended to retain the following:
>>> {}

Listen to the debate. Make sure the participants only evaluate the translation from a linguistic perspective.

ONLY Intervene as a moderator if a linguist's response **DOES NOT** meet the following criteria:
1. The analysis must be based on verifiable linguistic, stylistic, or semantic arguments.
2. Words and phrases being analyzed **MUST** be present in the texts being analyzed."#,
            greek_text, translation, face
        )
    }

    /// System prompt for the moderator once closing statements begin
    pub fn moderator_closing_system(greek_text: &str, translation: &str, face: &str) -> String {
        let mut prompt = Self::moderator_system(greek_text, translation, face);
        prompt.push_str(
            "\n\nThe debate is now in closing statements. Summarize the consensus reached by the participants. \
             Choose the lowest score in the event of non-consensus.",
        );
        prompt
    }

    /// Seed message of the closing phase
    pub fn closing_instruction() -> &'static str {
        "Now we transition to closing statements.\nParticipants, please give your closing statement providing all details to justify your final score."
    }
}
