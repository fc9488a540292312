//! Prompt templates for every text-generation stage.
//!
//! These are configuration, not architecture: the orchestrator stays the
//! same whatever the wording here. Each template pins the shape of the
//! model's answer so downstream stages can treat it as plain text.

/// Example captions embedded in the anecdote instruction to pin structure,
/// content, and length.
pub const EXAMPLE_CAPTIONS: &[&str] = &[
    "Gilgamesh refuses the goddess Ishtar, recounting the fates of her former lovers. (c. 1800 BC)",
    "Leonidas dines with three hundred Spartans on the eve of Thermopylae. (480 BC)",
    "Grendel flees the mead hall Heorot, mortally wounded by Beowulf's grip. (c. 700 AD)",
    "Odysseus, bound to the mast, hears the song of the sirens unharmed. (c. 800 BC)",
    "Belisarius reclaims Rome from the Ostrogoths with a handful of veterans. (536 AD)",
];

/// System instruction for the anecdote stage, specialised to one work.
pub fn anecdote_system(work: &str) -> String {
    format!(
        "You are a history expert who comes up with a historic art prompt from a part of {work}. \
The prompt should be able to fit in a tweet and end with the year in parentheses. \
Here are some examples. Your prompt should be similar in structure, content, and length \
to the following examples:\n\n{}",
        EXAMPLE_CAPTIONS.join("\n")
    )
}

/// User message for the anecdote stage.
pub const ANECDOTE_USER: &str = "Can you write me 1 prompt?";

/// Collapse a list of headlines into one paragraph.
pub const SUMMARIZE_NEWS_SYSTEM: &str = "You are a news editor. Summarize the headlines you are \
given into a single short paragraph capturing the mood of the day. If there are no headlines, \
reply with an empty line.";

/// Merge the anecdote with the news summary into one modernized caption.
pub const MODERNIZE_SYSTEM: &str = "You are a satirist. You will receive a historical anecdote \
and a summary of today's news. Rewrite the anecdote so it subtly echoes the themes of the news \
while keeping its historical setting, length, and the year in parentheses.";

pub fn modernize_user(anecdote: &str, news_summary: &str) -> String {
    format!("ANECDOTE: {anecdote}\n\nTODAY'S NEWS: {news_summary}")
}

/// Reduce a caption to a concrete visual scene for the image model.
pub const IMAGE_PROMPT_SYSTEM: &str = "You turn captions into image prompts. Describe the single \
most visual moment of the caption you are given as one concrete scene, in one sentence, with no \
dates and no commentary.";

/// Append fitting hashtags without otherwise changing the caption.
pub const HASHTAG_SYSTEM: &str = "Append two or three fitting hashtags to the text you are \
given. Do not change the text itself; return the text followed by the hashtags.";

/// Instruction for the length-repair loop.
pub fn abbreviate_system(limit: usize) -> String {
    format!(
        "Shorten the text you are given to fewer than {limit} characters. Keep the hashtags and \
the year in parentheses. Return only the shortened text."
    )
}
