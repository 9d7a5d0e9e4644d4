// FICHIER : engine/src/ai/llm/prompts.rs

// =========================================================================
//  PERSONAS DES OPÉRATEURS (Prompts Système)
// =========================================================================

pub const ROLE_SYSTEM_PROMPT: &str = "You are an expert text analyst. \
Your task is to infer the most likely role of the speaker of a short piece of text. \
Focus on context, tone and content to determine their perspective \
(e.g. a concerned citizen, a health expert, an official spokesperson).";

pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are an expert prompt engineer. \
Your task is to produce a Topic and a Prompt from a given context, following this internal process:
1. Analyze: read the Reference Text and the Role to understand situation, tone and perspective.
2. Define Topic: from your analysis, state a concise Topic capturing the core theme.
3. Construct Prompt: using that Topic and your analysis, write a high-quality instruction \
that guides another model to write a text aligned with the Role, the Topic and the Reference Text.";

pub const CROSSOVER_SYSTEM_PROMPT: &str = "You are an assistant specialized in genetic algorithms. \
Perform a semantic crossover between two parents, judged by their relevance to a Reference Text. \
Decide the child's Role and Topic independently. For each attribute either:
1. Inherit: keep the parent attribute that is semantically stronger and more relevant to the Reference Text.
2. Combine: when both are strong, fuse their ideas into a new attribute still aligned with the Reference Text.";

pub const MUTATION_REFINE_SYSTEM_PROMPT: &str = "You are an assistant specialized in genetic algorithms. \
Perform a semantic mutation by re-conceptualization: suggest a slightly different, improved version \
of the given value. Keep its main intent and stay relevant to the provided context.";

pub const MUTATION_EXPLORE_SYSTEM_PROMPT: &str = "You are an assistant specialized in genetic algorithms. \
Perform a semantic mutation by creative leap: suggest a significantly different, creative alternative \
to the given value. Explore a new concept while staying relevant to the provided context.";

pub const REGENERATE_PROMPT_SYSTEM_PROMPT: &str = "You are an expert prompt engineer. \
Write a single high-quality instruction (prompt) from a Role, a Topic and a Reference Text. \
The prompt must be aligned with all three and guide another model to write a short, 1-2 sentence text.";

pub const DATA_SYSTEM_PROMPT: &str = "You are a text generator. \
Produce a single concise output (1-2 sentences maximum) fulfilling the instruction given in the Prompt, \
strictly aligned with the Role, the Topic and the Reference Text.
Rules:
1. The output is plain text only.
2. The output is short (1-2 sentences).
3. No emojis, hashtags, URLs or other social media artifacts.";

/// Suffixe commun : rappelle au modèle le schéma de sortie.
pub fn schema_instruction(schema: &serde_json::Value) -> String {
    format!(
        "Your response MUST be a single JSON object conforming to this schema:\n{}",
        schema
    )
}

// =========================================================================
//  CONSIGNES UTILISATEUR
// =========================================================================

pub fn role_user_prompt(reference: &str) -> String {
    format!(
        "Reference Text: \"{}\"\n\nInfer the speaker's role based on this text.",
        reference
    )
}

pub fn synthesis_user_prompt(role: &str, reference: &str) -> String {
    format!(
        "Reference Text: \"{}\"\nRole: \"{}\"\n\nGenerate the Topic and Prompt based on this context.",
        reference, role
    )
}

pub fn crossover_user_prompt(
    reference: &str,
    (role1, topic1): (&str, &str),
    (role2, topic2): (&str, &str),
) -> String {
    format!(
        "Reference Text (your anchor for all decisions):\n\"{}\"\n\n\
         Parent 1:\n- Role: \"{}\"\n- Topic: \"{}\"\n\n\
         Parent 2:\n- Role: \"{}\"\n- Topic: \"{}\"\n\n\
         Perform the semantic crossover based on relevance to the Reference Text.",
        reference, role1, topic1, role2, topic2
    )
}

pub fn mutation_user_prompt(
    reference: &str,
    (target_name, target_value): (&str, &str),
    (anchor_name, anchor_value): (&str, &str),
) -> String {
    format!(
        "Context:\n- Reference Text: \"{}\"\n- (Context Anchor) {}: \"{}\"\n\n\
         Task:\nMutate this {}: \"{}\"",
        reference, anchor_name, anchor_value, target_name, target_value
    )
}

pub fn regenerate_prompt_user_prompt(role: &str, topic: &str, reference: &str) -> String {
    format!(
        "- Reference Text: \"{}\"\n- Role: \"{}\"\n- Topic: \"{}\"\n\n\
         Generate the instruction (prompt) based on these components.",
        reference, role, topic
    )
}

pub fn data_user_prompt(role: &str, topic: &str, prompt: &str, reference: &str) -> String {
    format!(
        "Context:\n- Reference Text: \"{}\"\n- Role: \"{}\"\n- Topic: \"{}\"\n\n\
         Instruction:\n- Prompt: \"{}\"\n\nGenerate the data based on the instruction.",
        reference, role, topic, prompt
    )
}
